// SkillVerify API server
// Decision: PostgreSQL when DATABASE_URL is set, in-memory storage otherwise
// Decision: Auth mode from AUTH_MODE (none for local development, full for JWT)

use anyhow::{Context, Result};
use skillverify_control_plane::app::build_app;
use skillverify_control_plane::auth::AuthConfig;
use skillverify_control_plane::config::ServerConfig;
use skillverify_control_plane::storage::StorageBackend;
use skillverify_core::telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Configure via environment variables:
    // - OTEL_SERVICE_NAME: Service name (default: "skillverify-control-plane")
    // - OTEL_EXPORTER_OTLP_ENDPOINT: OTLP endpoint (e.g., "http://localhost:4317")
    // - RUST_LOG / LOG_LEVEL: Log filter
    // - LOG_FORMAT: "json" for structured output
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "skillverify" {
        telemetry_config.service_name = "skillverify-control-plane".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter =
            Some("skillverify_control_plane=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());

    // Keep the guard alive for the lifetime of the application
    let _telemetry_guard = init_telemetry(telemetry_config);

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }
    tracing::info!("skillverify-control-plane starting...");

    let server_config = ServerConfig::from_env();

    let db = match &server_config.database_url {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            StorageBackend::in_memory()
        }
    };

    if server_config.run_migrations && !db.is_dev_mode() {
        db.run_migrations()
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let auth_config = AuthConfig::from_env();
    tracing::info!(
        mode = auth_config.mode.as_str(),
        admin_configured = auth_config.admin.is_some(),
        "Authentication configured"
    );

    if !server_config.api_prefix.is_empty() {
        tracing::info!(prefix = %server_config.api_prefix, "API prefix configured");
    }
    if server_config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?server_config.cors_allowed_origins, "CORS origins configured");
    }

    let app = build_app(Arc::new(db), auth_config, &server_config);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", server_config.bind_addr))?;
    tracing::info!("HTTP server listening on {}", server_config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

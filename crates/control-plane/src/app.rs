// Router assembly
// Decision: Built in the library so integration tests drive the same router as the binary

use crate::api;
use crate::auth::{self, AuthConfig, AuthState};
use crate::config::ServerConfig;
use crate::openapi::ApiDoc;
use crate::storage::StorageBackend;
use axum::http::{header, Method};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    auth_mode: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    auth_mode: &'static str,
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        auth_mode: state.auth_mode,
        storage: state.storage,
    })
}

/// All versioned API routes, unprefixed
pub fn api_routes(db: Arc<StorageBackend>, auth_state: AuthState) -> Router {
    let notifications_state =
        api::notifications::NotificationsState::new(db.clone(), auth_state.clone());
    let students_state = api::students::StudentsState::new(db, auth_state.clone());

    Router::new()
        .merge(api::notifications::routes(notifications_state))
        .merge(api::skills::routes(students_state.clone()))
        .merge(api::students::routes(students_state))
        .merge(auth::routes::routes(auth_state))
}

/// Full application: health, prefixed API, Swagger UI, CORS and request tracing
pub fn build_app(db: Arc<StorageBackend>, auth_config: AuthConfig, server: &ServerConfig) -> Router {
    let health_state = HealthState {
        auth_mode: auth_config.mode.as_str(),
        storage: db.kind(),
    };
    let auth_state = AuthState::new(auth_config, db.clone());

    // Health is never prefixed
    let app = Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(build_router_with_prefix(
            api_routes(db, auth_state),
            &server.api_prefix,
        ))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // CORS only when origins are configured
    let app = if server.cors_allowed_origins.is_empty() {
        app
    } else {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(server.cors_allowed_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ])
                .allow_credentials(true),
        )
    };

    app.layer(TraceLayer::new_for_http())
}

/// Build router with optional API prefix (extracted for testing)
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/v1/test", get(|| async { "ok" }))
    }

    #[tokio::test]
    async fn test_api_prefix_empty() {
        let app = build_router_with_prefix(test_routes(), "");

        let response = app
            .oneshot(Request::builder().uri("/v1/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_api_prefix_set() {
        let app = build_router_with_prefix(test_routes(), "/api");

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/v1/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        // Unprefixed path is gone
        let response = app
            .oneshot(Request::builder().uri("/v1/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_health_reports_modes() {
        let app = build_app(
            Arc::new(StorageBackend::in_memory()),
            AuthConfig::default(),
            &ServerConfig::default(),
        );

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["authMode"], "none");
        assert_eq!(json["storage"], "memory");
    }

    #[tokio::test]
    async fn test_health_is_not_prefixed() {
        let server = ServerConfig {
            api_prefix: "/api".to_string(),
            ..Default::default()
        };
        let app = build_app(
            Arc::new(StorageBackend::in_memory()),
            AuthConfig::default(),
            &server,
        );

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/notifications")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}

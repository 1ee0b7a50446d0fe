// HTTP server and storage settings
// Decision: No DATABASE_URL means in-memory dev storage, not a startup failure

use axum::http::HeaderValue;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// PostgreSQL connection string; `None` selects the in-memory backend
    pub database_url: Option<String>,
    /// Apply embedded migrations at startup (PostgreSQL only)
    pub run_migrations: bool,
    /// Prefix for every API route, e.g. "/api" gives /api/v1/notifications
    pub api_prefix: String,
    /// Origins allowed by CORS; empty means same-origin only
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            run_migrations: true,
            api_prefix: String::new(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let run_migrations = std::env::var("DATABASE_RUN_MIGRATIONS")
            .map(|s| parse_bool(&s))
            .unwrap_or(true);

        let api_prefix = normalize_prefix(&std::env::var("API_PREFIX").unwrap_or_default());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        Self {
            bind_addr,
            database_url,
            run_migrations,
            api_prefix,
            cors_allowed_origins,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// "api" and "/api/" both become "/api"; blank stays empty
fn normalize_prefix(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Comma-separated origins; entries that are not valid header values are skipped
fn parse_origins(value: &str) -> Vec<HeaderValue> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %s, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert!(config.database_url.is_none());
        assert!(config.run_migrations);
        assert!(config.api_prefix.is_empty());
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/api/"), "/api");
        assert_eq!(normalize_prefix(" /api/v2 "), "/api/v2");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool("YES"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("https://app.example.com, ,https://admin.example.com");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://app.example.com");
    }
}

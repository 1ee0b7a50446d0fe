// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for token settings, ADMIN_ prefix for the operator account
// Decision: Default to "none" mode for local development

use rand::Rng;
use std::time::Duration;

/// Default access token lifetime: one day
pub const DEFAULT_ACCESS_TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;

/// Longer configured lifetimes are clamped to one year
pub const MAX_ACCESS_TOKEN_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

/// Authentication mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// No authentication required; every caller acts as admin (local development)
    #[default]
    None,
    /// JWT required on protected routes
    Full,
}

impl AuthMode {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "full" | "jwt" => AuthMode::Full,
            _ => AuthMode::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::None => "none",
            AuthMode::Full => "full",
        }
    }
}

/// Operator account that logs in with credentials from the environment
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_lifetime: Duration::from_secs(DEFAULT_ACCESS_TOKEN_LIFETIME_SECS),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Authentication mode
    pub mode: AuthMode,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Admin credentials, checked before student credentials on login
    pub admin: Option<AdminConfig>,
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mode = std::env::var("AUTH_MODE")
            .map(|s| AuthMode::from_str(&s))
            .unwrap_or_default();

        let secret = match std::env::var("AUTH_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                if mode == AuthMode::Full {
                    tracing::warn!(
                        "AUTH_JWT_SECRET not set, using a random secret; tokens will not survive a restart"
                    );
                }
                random_secret()
            }
        };

        let access_token_lifetime =
            parse_access_token_lifetime(std::env::var("AUTH_ACCESS_TOKEN_LIFETIME").ok().as_deref());

        let admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminConfig {
                    email: email.trim().to_lowercase(),
                    password,
                })
            }
            _ => None,
        };

        if mode == AuthMode::Full && admin.is_none() {
            tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, no admin can log in");
        }

        Self {
            mode,
            jwt: JwtConfig {
                secret,
                access_token_lifetime,
            },
            admin,
        }
    }
}

/// Seconds from the environment; unparsable values fall back to the default
fn parse_access_token_lifetime(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME_SECS);
    if secs > MAX_ACCESS_TOKEN_LIFETIME_SECS {
        tracing::warn!(
            configured = secs,
            max = MAX_ACCESS_TOKEN_LIFETIME_SECS,
            "AUTH_ACCESS_TOKEN_LIFETIME too large, clamping"
        );
    }
    Duration::from_secs(secs.min(MAX_ACCESS_TOKEN_LIFETIME_SECS))
}

/// 32 random bytes, hex encoded
fn random_secret() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

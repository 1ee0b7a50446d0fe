// Authentication middleware and extractors
// Decision: Support both cookie-based (UI) and header-based (API) auth
// Decision: In "none" mode, every caller is an anonymous admin

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use skillverify_core::Role;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    config::{AuthConfig, AuthMode},
    jwt::JwtService,
};
use crate::services::StudentService;
use crate::storage::StorageBackend;

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authentication error
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub message: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: StatusCode::FORBIDDEN,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Authenticated principal extracted from request
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Student ID, or nil for admins (who have no student record)
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    /// Authentication method used
    pub auth_method: AuthMethod,
}

impl AuthUser {
    /// Create an anonymous admin for no-auth mode
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::nil(),
            email: "anonymous@local".to_string(),
            role: Role::Admin, // Full access in no-auth mode
            auth_method: AuthMethod::None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Admins act for anyone; everyone else only for themselves
    pub fn can_act_for(&self, student_id: Uuid) -> bool {
        self.is_admin() || self.id == student_id
    }

    /// Fail with 403 unless [`Self::can_act_for`] holds
    pub fn ensure_can_act_for(&self, student_id: Uuid) -> Result<(), AuthError> {
        if self.can_act_for(student_id) {
            Ok(())
        } else {
            tracing::debug!(
                principal = %self.id,
                target = %student_id,
                "Denied access to another student's records"
            );
            Err(AuthError::forbidden("You can only access your own records"))
        }
    }
}

/// Authentication method used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// No authentication (anonymous)
    None,
    /// JWT access token
    Jwt,
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub jwt_service: Arc<JwtService>,
    pub students: Arc<StudentService>,
}

impl AuthState {
    pub fn new(config: AuthConfig, db: Arc<StorageBackend>) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            jwt_service,
            students: Arc::new(StudentService::new(db)),
        }
    }
}

/// Extractor for authenticated user
/// This is required - returns 401 if not authenticated
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        extract_auth_user(parts, &auth_state)
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Extract authenticated user from request
fn extract_auth_user(parts: &Parts, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    // In no-auth mode, always return anonymous user
    if auth_state.config.mode == AuthMode::None {
        return Ok(AuthUser::anonymous());
    }

    // Authorization header first
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AuthError::unauthorized("Invalid authorization header"))?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) => validate_jwt_token(token.trim(), auth_state),
            None => Err(AuthError::unauthorized("Unsupported authorization scheme")),
        };
    }

    // Then the cookie (for UI)
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        return validate_jwt_token(cookie.value(), auth_state);
    }

    Err(AuthError::unauthorized("Authentication required"))
}

/// Validate JWT token and return user
fn validate_jwt_token(token: &str, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    let claims = auth_state
        .jwt_service
        .validate_access_token(token)
        .map_err(|e| {
            tracing::debug!("JWT validation failed: {:#}", e);
            AuthError::unauthorized("Invalid or expired token")
        })?;

    Ok(AuthUser {
        id: claims.id,
        email: claims.email,
        role: claims.role,
        auth_method: AuthMethod::Jwt,
    })
}

/// Require admin role extractor
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AuthError::forbidden("Admin access required"));
        }

        Ok(AdminUser(user))
    }
}

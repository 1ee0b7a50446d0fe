// Authentication HTTP routes
// Decision: Use /v1/auth/* prefix for all auth endpoints (consistent with other API routes)
// Decision: Support both JSON and cookie-based sessions

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use skillverify_core::Role;
use utoipa::ToSchema;
use uuid::Uuid;

use super::middleware::{AuthError, AuthState, AuthUser, ACCESS_TOKEN_COOKIE};
use crate::api::ApiJson;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Principal info returned by login and /me
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<&AuthUser> for UserInfoResponse {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub user: UserInfoResponse,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/logout", post(logout))
        .route("/v1/auth/me", get(get_current_user))
        .with_state(state)
}

/// POST /v1/auth/login - Login with email and password
///
/// The configured admin account is checked first, then student accounts.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; access_token cookie set", body = TokenResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Stored credentials could not be checked")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(AuthError {
            message: "Email and password are required".to_string(),
            status: StatusCode::BAD_REQUEST,
        });
    }

    if let Some(admin) = &state.config.admin {
        if email == admin.email && req.password == admin.password {
            tracing::info!("Admin logged in");
            let user = AuthUser {
                id: Uuid::nil(),
                email,
                role: Role::Admin,
                auth_method: super::middleware::AuthMethod::Jwt,
            };
            return generate_token_response(&state, jar, &user);
        }
    }

    let student = state
        .students
        .authenticate(&email, &req.password)
        .await
        .map_err(|e| {
            tracing::error!("Login failed: {}", e);
            AuthError::internal(e.to_string())
        })?
        .ok_or_else(|| AuthError::unauthorized("Invalid email or password"))?;

    tracing::info!(student.id = %student.id, "Student logged in");

    let user = AuthUser {
        id: student.id,
        email: student.email,
        role: Role::Student,
        auth_method: super::middleware::AuthMethod::Jwt,
    };

    generate_token_response(&state, jar, &user)
}

/// POST /v1/auth/logout - Logout (clear cookie)
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses((status = 200, description = "Cookie cleared")),
    tag = "auth"
)]
pub async fn logout(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
}

/// GET /v1/auth/me - Get current principal
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Current principal", body = UserInfoResponse),
        (status = 401, description = "Not authenticated")
    ),
    tag = "auth"
)]
pub async fn get_current_user(user: AuthUser) -> Json<UserInfoResponse> {
    Json(UserInfoResponse::from(&user))
}

/// Helper: Generate token response with cookie
fn generate_token_response(
    state: &AuthState,
    jar: CookieJar,
    user: &AuthUser,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email, user.role)
        .map_err(|e| {
            tracing::error!("Token generation error: {}", e);
            AuthError::unauthorized("Login failed")
        })?;
    let expires_in = state.jwt_service.access_token_lifetime_secs();

    let access_cookie = Cookie::build((ACCESS_TOKEN_COOKIE, access_token.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(expires_in))
        .build();

    Ok((
        jar.add(access_cookie),
        Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: UserInfoResponse::from(user),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::{AuthConfig, AuthMode, JwtConfig};
    use crate::storage::{CreateStudentRow, StorageBackend};
    use std::sync::Arc;

    async fn state_with_student(password_hash: Option<&str>) -> AuthState {
        let db = Arc::new(StorageBackend::in_memory());
        db.create_student(CreateStudentRow {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: password_hash.map(str::to_string),
            skills: serde_json::json!([]),
        })
        .await
        .unwrap();

        let config = AuthConfig {
            mode: AuthMode::Full,
            jwt: JwtConfig {
                secret: "routes-test-secret".to_string(),
                ..Default::default()
            },
            admin: None,
        };
        AuthState::new(config, db)
    }

    fn login_request(password: &str) -> ApiJson<LoginRequest> {
        ApiJson(LoginRequest {
            email: "asha@example.com".to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_server_error() {
        let state = state_with_student(Some("not-a-phc-string")).await;

        let err = login(State(state), CookieJar::new(), login_request("long-enough"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(err.message, "Invalid email or password");
    }

    #[tokio::test]
    async fn test_student_without_password_cannot_log_in() {
        let state = state_with_student(None).await;

        let err = login(State(state), CookieJar::new(), login_request("long-enough"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid email or password");
    }
}

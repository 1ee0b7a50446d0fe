// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use skillverify_core::{Notification, Student};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::middleware::AuthError;
use crate::services::ServiceError;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Message describing what went wrong.
    #[schema(example = "Notification not found")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Error tuple returned by every handler
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shorthand for a 400 with a specific message
pub fn bad_request(message: impl Into<String>) -> ApiError {
    ErrorResponse::new(message).into_response(StatusCode::BAD_REQUEST)
}

impl From<ServiceError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            // Workflow rule violations are client errors
            ServiceError::Validation(_) | ServiceError::Workflow(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        ErrorResponse::new(err.to_string()).into_response(status)
    }
}

impl From<AuthError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.message).into_response(err.status)
    }
}

/// JSON body extractor whose rejections use the `{message}` error shape.
///
/// Wrong field types, syntax errors and a missing content type all become 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(status = %rejection.status(), "Rejected request body");
    bad_request(format!("Invalid request body: {}", rejection.body_text()))
}

/// Parse a required ID carried in a JSON body or query string.
/// Absent or blank yields `missing`; anything that is not a UUID yields `invalid`.
pub fn parse_required_id(
    value: Option<&str>,
    missing: &str,
    invalid: &str,
) -> Result<Uuid, ApiError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty());
    match raw {
        None => Err(bad_request(missing)),
        Some(raw) => Uuid::parse_str(raw).map_err(|_| bad_request(invalid)),
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Result of a workflow action: a confirmation line plus the updated record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationActionResponse {
    #[schema(example = "Request sent to admin successfully")]
    pub message: String,
    pub notification: Notification,
}

impl NotificationActionResponse {
    pub fn new(message: impl Into<String>, notification: Notification) -> Self {
        Self {
            message: message.into(),
            notification,
        }
    }
}

/// Result of a student action such as skill verification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentActionResponse {
    #[schema(example = "Skill verified successfully")]
    pub message: String,
    pub student: Student,
}

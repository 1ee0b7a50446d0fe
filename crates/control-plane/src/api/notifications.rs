// Skill-verification notification HTTP routes
//
// Students raise a request, admins accept (with an interview schedule) or
// reject it, and anyone involved can list and mark notifications read.

use crate::auth::middleware::{AdminUser, AuthState, AuthUser, FromRef};
use crate::services::NotificationService;
use crate::storage::StorageBackend;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use skillverify_core::{InterviewSchedule, NotificationWithStudent};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::{
    parse_required_id, ApiError, ApiJson, ListResponse, NotificationActionResponse,
};
use super::validation::validate_schedule_input;

pub const STUDENT_ID_REQUIRED: &str = "Student ID is required";
pub const INVALID_STUDENT_ID: &str = "Invalid student ID";
pub const NOTIFICATION_ID_REQUIRED: &str = "Notification ID is required";
pub const INVALID_NOTIFICATION_ID: &str = "Invalid notification ID";

/// Request to raise a skill-verification request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// ID of the student asking for verification.
    #[schema(example = "01933b5a-0000-7000-8000-000000000001")]
    pub student_id: Option<String>,
}

/// Request to accept a pending request and schedule the interview
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptNotificationRequest {
    pub notification_id: Option<String>,
    /// Stored verbatim, no format checks.
    #[schema(example = "2026-11-02")]
    pub interview_date: Option<String>,
    /// Stored verbatim, no format checks.
    #[schema(example = "10:30")]
    pub interview_time: Option<String>,
    #[schema(example = "https://meet.example.com/abc-defg-hij")]
    pub meeting_link: Option<String>,
    /// Optional note shown to the student.
    pub admin_message: Option<String>,
}

/// Request naming a single notification (reject, mark-read)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationIdRequest {
    pub notification_id: Option<String>,
}

/// Query parameters for listing notifications
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    /// Only return notifications raised by this student
    pub student_id: Option<String>,
}

/// App state for notification routes
#[derive(Clone)]
pub struct NotificationsState {
    pub service: Arc<NotificationService>,
    pub auth: AuthState,
}

impl NotificationsState {
    pub fn new(db: Arc<StorageBackend>, auth: AuthState) -> Self {
        Self {
            service: Arc::new(NotificationService::new(db)),
            auth,
        }
    }
}

impl FromRef<NotificationsState> for AuthState {
    fn from_ref(input: &NotificationsState) -> Self {
        input.auth.clone()
    }
}

/// Create notification routes
pub fn routes(state: NotificationsState) -> Router {
    Router::new()
        .route("/v1/notification-request", post(create_request))
        .route("/v1/notification-accept", post(accept_request))
        .route("/v1/notification-reject", post(reject_request))
        .route("/v1/notification-mark-read", post(mark_read))
        .route("/v1/notifications", get(list_notifications))
        .with_state(state)
}

/// POST /v1/notification-request - Ask an admin for a skill-verification meeting
#[utoipa::path(
    post,
    path = "/v1/notification-request",
    request_body = CreateNotificationRequest,
    responses(
        (status = 200, description = "Request created", body = NotificationActionResponse),
        (status = 400, description = "Missing student ID or a request is already pending", body = super::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Students may only request for themselves"),
        (status = 404, description = "Student not found", body = super::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn create_request(
    State(state): State<NotificationsState>,
    user: AuthUser,
    ApiJson(req): ApiJson<CreateNotificationRequest>,
) -> Result<Json<NotificationActionResponse>, ApiError> {
    let student_id = parse_required_id(
        req.student_id.as_deref(),
        STUDENT_ID_REQUIRED,
        INVALID_STUDENT_ID,
    )?;
    user.ensure_can_act_for(student_id)?;

    let notification = state.service.request_verification(student_id).await?;

    Ok(Json(NotificationActionResponse::new(
        "Request sent to admin successfully",
        notification,
    )))
}

/// POST /v1/notification-accept - Accept a pending request with an interview schedule
#[utoipa::path(
    post,
    path = "/v1/notification-accept",
    request_body = AcceptNotificationRequest,
    responses(
        (status = 200, description = "Meeting scheduled", body = NotificationActionResponse),
        (status = 400, description = "Missing fields or request already processed", body = super::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Notification not found", body = super::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn accept_request(
    State(state): State<NotificationsState>,
    _admin: AdminUser,
    ApiJson(req): ApiJson<AcceptNotificationRequest>,
) -> Result<Json<NotificationActionResponse>, ApiError> {
    let notification_id = parse_required_id(
        req.notification_id.as_deref(),
        NOTIFICATION_ID_REQUIRED,
        INVALID_NOTIFICATION_ID,
    )?;

    validate_schedule_input(
        req.interview_date.as_deref(),
        req.interview_time.as_deref(),
        req.meeting_link.as_deref(),
        req.admin_message.as_deref(),
    )?;

    let schedule = InterviewSchedule::new(
        req.interview_date,
        req.interview_time,
        req.meeting_link,
        req.admin_message,
    )
    .map_err(crate::services::ServiceError::from)?;

    let notification = state.service.accept(notification_id, schedule).await?;

    Ok(Json(NotificationActionResponse::new(
        "Meeting scheduled successfully",
        notification,
    )))
}

/// POST /v1/notification-reject - Reject a pending request
#[utoipa::path(
    post,
    path = "/v1/notification-reject",
    request_body = NotificationIdRequest,
    responses(
        (status = 200, description = "Request rejected", body = NotificationActionResponse),
        (status = 400, description = "Missing ID or request already processed", body = super::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Notification not found", body = super::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn reject_request(
    State(state): State<NotificationsState>,
    _admin: AdminUser,
    ApiJson(req): ApiJson<NotificationIdRequest>,
) -> Result<Json<NotificationActionResponse>, ApiError> {
    let notification_id = parse_required_id(
        req.notification_id.as_deref(),
        NOTIFICATION_ID_REQUIRED,
        INVALID_NOTIFICATION_ID,
    )?;

    let notification = state.service.reject(notification_id).await?;

    Ok(Json(NotificationActionResponse::new(
        "Request rejected",
        notification,
    )))
}

/// POST /v1/notification-mark-read - Mark a notification as read
#[utoipa::path(
    post,
    path = "/v1/notification-mark-read",
    request_body = NotificationIdRequest,
    responses(
        (status = 200, description = "Marked as read", body = NotificationActionResponse),
        (status = 400, description = "Missing or malformed ID", body = super::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Notification not found", body = super::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn mark_read(
    State(state): State<NotificationsState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<NotificationIdRequest>,
) -> Result<Json<NotificationActionResponse>, ApiError> {
    let notification_id = parse_required_id(
        req.notification_id.as_deref(),
        NOTIFICATION_ID_REQUIRED,
        INVALID_NOTIFICATION_ID,
    )?;

    let notification = state.service.mark_read(notification_id).await?;

    Ok(Json(NotificationActionResponse::new(
        "Notification marked as read",
        notification,
    )))
}

/// GET /v1/notifications - List notifications, newest first
///
/// Admins see everything (optionally filtered by `studentId`); students only
/// ever see their own.
#[utoipa::path(
    get,
    path = "/v1/notifications",
    params(ListNotificationsQuery),
    responses(
        (status = 200, description = "Notifications, newest first", body = ListResponse<NotificationWithStudent>),
        (status = 400, description = "Malformed student ID", body = super::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Students may only list their own notifications"),
        (status = 500, description = "Internal server error", body = super::ErrorResponse)
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<NotificationsState>,
    user: AuthUser,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ListResponse<NotificationWithStudent>>, ApiError> {
    let requested: Option<Uuid> = match query.student_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_required_id(
            Some(raw),
            STUDENT_ID_REQUIRED,
            INVALID_STUDENT_ID,
        )?),
        _ => None,
    };

    let filter = if user.is_admin() {
        requested
    } else {
        if let Some(student_id) = requested {
            user.ensure_can_act_for(student_id)?;
        }
        Some(user.id)
    };

    let notifications = state.service.list(filter).await?;

    Ok(Json(ListResponse::new(notifications)))
}

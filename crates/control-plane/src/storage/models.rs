// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Students
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    /// JSON array of `{name, verified}` objects
    pub skills: sqlx::types::JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateStudentRow {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub skills: sqlx::types::JsonValue,
}

// ============================================
// Notifications
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub kind: String,
    pub student_id: Uuid,
    pub message: String,
    pub status: String,
    pub interview_date: Option<String>,
    pub interview_time: Option<String>,
    pub meeting_link: Option<String>,
    pub admin_message: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Notification joined with the requesting student's identity
#[derive(Debug, Clone, FromRow)]
pub struct NotificationWithStudentRow {
    #[sqlx(flatten)]
    pub notification: NotificationRow,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateNotificationRow {
    pub kind: String,
    pub student_id: Uuid,
    pub message: String,
}

/// Scheduling fields written when a request is accepted
#[derive(Debug, Clone)]
pub struct AcceptNotificationRow {
    pub interview_date: String,
    pub interview_time: String,
    pub meeting_link: String,
    pub admin_message: Option<String>,
}

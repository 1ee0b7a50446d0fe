// Notification domain types
//
// A notification is a student's request to an admin for a skill-verification
// meeting. Lifecycle: pending -> accepted | rejected. The `read` flag is
// independent of status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::WorkflowError;
use crate::student::Skill;

/// Notification kind. Only skill-verification requests exist today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A student asking for a meeting to verify declared skills.
    SkillVerificationRequest,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::SkillVerificationRequest => "skill_verification_request",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NotificationKind {
    // Single kind today; every stored value maps to it
    fn from(_: &str) -> Self {
        NotificationKind::SkillVerificationRequest
    }
}

/// Request status.
/// - `pending`: waiting for an admin
/// - `accepted`: meeting scheduled
/// - `rejected`: declined by an admin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Waiting for an admin decision.
    Pending,
    /// Accepted; interview details are attached.
    Accepted,
    /// Rejected by an admin.
    Rejected,
}

impl NotificationStatus {
    /// Accepted and rejected are terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NotificationStatus::Pending)
    }

    /// Guard for accept/reject.
    pub fn ensure_pending(&self) -> Result<(), WorkflowError> {
        if self.is_terminal() {
            return Err(WorkflowError::AlreadyProcessed(*self));
        }
        Ok(())
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::Pending => write!(f, "pending"),
            NotificationStatus::Accepted => write!(f, "accepted"),
            NotificationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl From<&str> for NotificationStatus {
    fn from(s: &str) -> Self {
        match s {
            "accepted" => NotificationStatus::Accepted,
            "rejected" => NotificationStatus::Rejected,
            _ => NotificationStatus::Pending,
        }
    }
}

/// Interview details an admin attaches when accepting a request.
/// Values are kept verbatim; no date/time format or timezone handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSchedule {
    pub interview_date: String,
    pub interview_time: String,
    pub meeting_link: String,
    pub admin_message: Option<String>,
}

impl InterviewSchedule {
    /// Build a schedule; date, time and link must all be present and non-blank.
    pub fn new(
        interview_date: Option<String>,
        interview_time: Option<String>,
        meeting_link: Option<String>,
        admin_message: Option<String>,
    ) -> Result<Self, WorkflowError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        match (
            present(interview_date),
            present(interview_time),
            present(meeting_link),
        ) {
            (Some(interview_date), Some(interview_time), Some(meeting_link)) => Ok(Self {
                interview_date,
                interview_time,
                meeting_link,
                admin_message: admin_message.filter(|m| !m.is_empty()),
            }),
            _ => Err(WorkflowError::IncompleteSchedule),
        }
    }
}

/// Notification - a skill-verification request and its admin response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier for the notification.
    pub id: Uuid,
    /// Kind of notification.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Student who raised the request.
    pub student_id: Uuid,
    /// Snapshot of the student's name, email and skills at request time.
    pub message: String,
    /// Current workflow status.
    pub status: NotificationStatus,
    /// Interview date, set on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "2026-11-02"))]
    pub interview_date: Option<String>,
    /// Interview time, set on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "10:30"))]
    pub interview_time: Option<String>,
    /// Meeting link, set on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    /// Optional note from the admin, set on acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_message: Option<String>,
    /// Whether the notification has been read.
    pub read: bool,
    /// Timestamp when the request was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last change.
    pub updated_at: DateTime<Utc>,
}

/// Student identity joined into notification listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NotificationStudent {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Notification with the requesting student's name and email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NotificationWithStudent {
    #[serde(flatten)]
    pub notification: Notification,
    /// `null` when the student record no longer exists.
    pub student: Option<NotificationStudent>,
}

/// Compose the request message shown to admins.
pub fn compose_verification_message(name: &str, email: &str, skills: &[Skill]) -> String {
    let skill_list = if skills.is_empty() {
        "none listed".to_string()
    } else {
        skills
            .iter()
            .map(|s| {
                if s.verified {
                    format!("{} (verified)", s.name)
                } else {
                    s.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Skill verification request from {} ({}). Skills: {}",
        name, email, skill_list
    )
}

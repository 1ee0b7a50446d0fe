// Notification service: skill-verification request workflow
//
// pending -> accepted | rejected, plus an independent read flag.
// Guards are checked up front for clear errors, and every write is
// conditional in storage so concurrent requests cannot break the rules.

use crate::storage::{
    AcceptNotificationRow, CreateNotificationRow, NotificationRow, NotificationWithStudentRow,
    StorageBackend,
};
use skillverify_core::telemetry::fields;
use skillverify_core::{
    compose_verification_message, InterviewSchedule, Notification, NotificationKind,
    NotificationStatus, NotificationStudent, NotificationWithStudent, WorkflowError,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use super::student::StudentService;

pub const NOTIFICATION_NOT_FOUND: &str = "Notification not found";
pub const STUDENT_NOT_FOUND: &str = "Student not found";

pub struct NotificationService {
    db: Arc<StorageBackend>,
}

impl NotificationService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Create a pending skill-verification request for a student.
    pub async fn request_verification(&self, student_id: Uuid) -> ServiceResult<Notification> {
        let span = tracing::info_span!(
            "notification.request",
            "student.id" = %student_id,
            "notification.id" = tracing::field::Empty,
        );

        self.request_verification_inner(student_id)
            .instrument(span)
            .await
    }

    async fn request_verification_inner(&self, student_id: Uuid) -> ServiceResult<Notification> {
        let kind = NotificationKind::SkillVerificationRequest;

        let row = self
            .db
            .get_student(student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))?;
        let student = StudentService::row_to_student(row)?;

        if self
            .db
            .find_pending_notification(student_id, kind.as_str())
            .await?
            .is_some()
        {
            tracing::info!("Student already has a pending verification request");
            return Err(WorkflowError::AlreadyPending.into());
        }

        let message = compose_verification_message(&student.name, &student.email, &student.skills);

        // A concurrent request may have slipped in after the check above
        let created = self
            .db
            .create_pending_notification(CreateNotificationRow {
                kind: kind.as_str().to_string(),
                student_id,
                message,
            })
            .await?
            .ok_or(WorkflowError::AlreadyPending)?;

        tracing::Span::current().record(fields::NOTIFICATION_ID, created.id.to_string().as_str());
        tracing::info!("Verification request created");

        Ok(Self::row_to_notification(created))
    }

    /// Accept a pending request and attach the interview schedule.
    pub async fn accept(
        &self,
        notification_id: Uuid,
        schedule: InterviewSchedule,
    ) -> ServiceResult<Notification> {
        let span = tracing::info_span!(
            "notification.accept",
            "notification.id" = %notification_id,
            "notification.status" = tracing::field::Empty,
        );

        async move {
            self.ensure_pending(notification_id).await?;

            let input = AcceptNotificationRow {
                interview_date: schedule.interview_date,
                interview_time: schedule.interview_time,
                meeting_link: schedule.meeting_link,
                admin_message: schedule.admin_message,
            };

            match self.db.accept_notification(notification_id, input).await? {
                Some(row) => {
                    tracing::Span::current().record(fields::NOTIFICATION_STATUS, "accepted");
                    tracing::info!("Verification request accepted");
                    Ok(Self::row_to_notification(row))
                }
                None => Err(self.lost_transition(notification_id).await),
            }
        }
        .instrument(span)
        .await
    }

    /// Reject a pending request.
    pub async fn reject(&self, notification_id: Uuid) -> ServiceResult<Notification> {
        let span = tracing::info_span!(
            "notification.reject",
            "notification.id" = %notification_id,
            "notification.status" = tracing::field::Empty,
        );

        async move {
            self.ensure_pending(notification_id).await?;

            match self.db.reject_notification(notification_id).await? {
                Some(row) => {
                    tracing::Span::current().record(fields::NOTIFICATION_STATUS, "rejected");
                    tracing::info!("Verification request rejected");
                    Ok(Self::row_to_notification(row))
                }
                None => Err(self.lost_transition(notification_id).await),
            }
        }
        .instrument(span)
        .await
    }

    /// Set `read = true`, whatever the status.
    pub async fn mark_read(&self, notification_id: Uuid) -> ServiceResult<Notification> {
        let row = self
            .db
            .mark_notification_read(notification_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(NOTIFICATION_NOT_FOUND))?;

        Ok(Self::row_to_notification(row))
    }

    /// List newest first, optionally for a single student.
    pub async fn list(&self, student_id: Option<Uuid>) -> ServiceResult<Vec<NotificationWithStudent>> {
        let rows = self.db.list_notifications(student_id).await?;
        Ok(rows.into_iter().map(Self::row_to_view).collect())
    }

    async fn ensure_pending(&self, notification_id: Uuid) -> ServiceResult<()> {
        let current = self
            .db
            .get_notification(notification_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(NOTIFICATION_NOT_FOUND))?;

        NotificationStatus::from(current.status.as_str()).ensure_pending()?;
        Ok(())
    }

    /// The conditional write matched nothing: another writer got there first
    /// (or the record vanished). Report whichever happened.
    async fn lost_transition(&self, notification_id: Uuid) -> ServiceError {
        match self.db.get_notification(notification_id).await {
            Ok(Some(row)) => {
                let status = NotificationStatus::from(row.status.as_str());
                tracing::warn!(%status, "Concurrent update won the transition");
                WorkflowError::AlreadyProcessed(status).into()
            }
            Ok(None) => ServiceError::not_found(NOTIFICATION_NOT_FOUND),
            Err(e) => ServiceError::Internal(e),
        }
    }

    pub(crate) fn row_to_notification(row: NotificationRow) -> Notification {
        Notification {
            id: row.id,
            kind: NotificationKind::from(row.kind.as_str()),
            student_id: row.student_id,
            message: row.message,
            status: NotificationStatus::from(row.status.as_str()),
            interview_date: row.interview_date,
            interview_time: row.interview_time,
            meeting_link: row.meeting_link,
            admin_message: row.admin_message,
            read: row.is_read,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn row_to_view(row: NotificationWithStudentRow) -> NotificationWithStudent {
        let student = match (row.student_name, row.student_email) {
            (Some(name), Some(email)) => Some(NotificationStudent {
                id: row.notification.student_id,
                name,
                email,
            }),
            _ => None,
        };

        NotificationWithStudent {
            notification: Self::row_to_notification(row.notification),
            student,
        }
    }
}

// Error types for the verification workflow

use thiserror::Error;

use crate::notification::NotificationStatus;

/// Rule violations in the skill-verification request lifecycle.
/// Display strings are user-facing and returned verbatim by the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The student already has an unanswered request of the same kind
    #[error("You have already applied for a meeting. Please wait for the admin to respond.")]
    AlreadyPending,

    /// Accept/reject attempted on a request that is no longer pending
    #[error("This request has already been processed")]
    AlreadyProcessed(NotificationStatus),

    /// Accept attempted without the full interview schedule
    #[error("Interview date, time and meeting link are required")]
    IncompleteSchedule,
}

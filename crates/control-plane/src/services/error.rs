// Service-layer errors
// Decision: Services return typed errors; HTTP mapping lives in api::common

use skillverify_core::WorkflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Workflow rule violated (duplicate request, already processed)
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Caller is authenticated but not allowed to act on this record
    #[error("{0}")]
    Forbidden(String),

    /// Anything unexpected (storage failures, serialization)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ServiceError::Forbidden(msg.into())
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

// Services layer for business logic
// Services own workflow rules and validation, calling storage directly

pub mod error;
pub mod notification;
pub mod student;

pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use student::StudentService;

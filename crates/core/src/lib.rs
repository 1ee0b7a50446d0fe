// SkillVerify core domain
//
// Key design decisions:
// - Domain entity types (Student, Notification) are defined here, DB-agnostic
// - Workflow rules that do not need storage (status transitions, message
//   composition, skill merging) live next to the types they govern
// - Storage rows and HTTP DTOs are defined by the control-plane crate

// Telemetry (tracing subscriber + optional OpenTelemetry export)
pub mod telemetry;

// Domain entity types
pub mod notification;
pub mod role;
pub mod student;

pub mod error;

pub use error::WorkflowError;
pub use notification::{
    compose_verification_message, InterviewSchedule, Notification, NotificationKind,
    NotificationStatus, NotificationStudent, NotificationWithStudent,
};
pub use role::Role;
pub use student::{merge_skills, normalize_skill_names, Skill, Student};

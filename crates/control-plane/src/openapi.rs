// OpenAPI specification generation
//
// Used by the API server (Swagger UI) and the export-openapi binary.

use crate::api;
use crate::api::ListResponse;
use crate::auth;
use skillverify_core::{
    Notification, NotificationKind, NotificationStatus, NotificationStudent,
    NotificationWithStudent, Role, Skill, Student,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the SkillVerify API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::notifications::create_request,
        api::notifications::accept_request,
        api::notifications::reject_request,
        api::notifications::mark_read,
        api::notifications::list_notifications,
        api::students::register_student,
        api::students::list_students,
        api::students::get_student,
        api::students::update_skills,
        api::skills::verify_skill,
        auth::routes::login,
        auth::routes::logout,
        auth::routes::get_current_user,
    ),
    components(
        schemas(
            Notification, NotificationKind, NotificationStatus,
            NotificationStudent, NotificationWithStudent,
            Student, Skill, Role,
            api::ErrorResponse,
            api::common::NotificationActionResponse,
            api::common::StudentActionResponse,
            api::notifications::CreateNotificationRequest,
            api::notifications::AcceptNotificationRequest,
            api::notifications::NotificationIdRequest,
            api::students::RegisterStudentRequest,
            api::students::UpdateSkillsRequest,
            api::skills::VerifySkillRequest,
            auth::routes::LoginRequest,
            auth::routes::TokenResponse,
            auth::routes::UserInfoResponse,
            ListResponse<NotificationWithStudent>,
            ListResponse<Student>,
        )
    ),
    tags(
        (name = "notifications", description = "Skill-verification request workflow"),
        (name = "students", description = "Student registry"),
        (name = "skills", description = "Admin skill verification"),
        (name = "auth", description = "Login and session endpoints")
    ),
    info(
        title = "SkillVerify API",
        description = "Skill-verification notification workflow for the VHireToday placement platform",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_workflow_paths() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();
        let paths = json["paths"].as_object().unwrap();

        for path in [
            "/v1/notification-request",
            "/v1/notification-accept",
            "/v1/notification-reject",
            "/v1/notification-mark-read",
            "/v1/notifications",
            "/v1/students",
            "/v1/students/{student_id}",
            "/v1/skills/verify",
            "/v1/auth/login",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }
}

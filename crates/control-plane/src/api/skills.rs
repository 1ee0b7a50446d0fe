// Skill verification HTTP route (admin)

use crate::auth::middleware::AdminUser;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use super::common::{
    bad_request, parse_required_id, ApiError, ApiJson, StudentActionResponse,
};
use super::notifications::{INVALID_STUDENT_ID, STUDENT_ID_REQUIRED};
use super::students::StudentsState;
use super::validation::validate_skill_name;

/// Request to mark one of a student's skills as verified
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifySkillRequest {
    pub student_id: Option<String>,
    /// Skill name, matched ignoring case.
    #[schema(example = "Rust")]
    pub skill: Option<String>,
}

/// Create skill routes
pub fn routes(state: StudentsState) -> Router {
    Router::new()
        .route("/v1/skills/verify", post(verify_skill))
        .with_state(state)
}

/// POST /v1/skills/verify - Mark a student's skill as verified
#[utoipa::path(
    post,
    path = "/v1/skills/verify",
    request_body = VerifySkillRequest,
    responses(
        (status = 200, description = "Skill verified", body = StudentActionResponse),
        (status = 400, description = "Missing student ID or skill", body = super::ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Student or skill not found", body = super::ErrorResponse),
        (status = 500, description = "Internal server error", body = super::ErrorResponse)
    ),
    tag = "skills"
)]
pub async fn verify_skill(
    State(state): State<StudentsState>,
    _admin: AdminUser,
    ApiJson(req): ApiJson<VerifySkillRequest>,
) -> Result<Json<StudentActionResponse>, ApiError> {
    let student_id = parse_required_id(
        req.student_id.as_deref(),
        STUDENT_ID_REQUIRED,
        INVALID_STUDENT_ID,
    )?;

    let skill = req
        .skill
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| bad_request("Skill is required"))?;
    validate_skill_name(skill)?;

    let student = state.service.verify_skill(student_id, skill).await?;

    Ok(Json(StudentActionResponse {
        message: "Skill verified successfully".to_string(),
        student,
    }))
}

// Student registry HTTP routes

use crate::auth::middleware::{AdminUser, AuthState, AuthUser, FromRef};
use crate::services::notification::STUDENT_NOT_FOUND;
use crate::services::StudentService;
use crate::storage::StorageBackend;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use skillverify_core::Student;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiError, ApiJson, ErrorResponse, ListResponse};
use super::validation::{validate_registration_input, validate_skills};

/// Request to register a new student
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterStudentRequest {
    #[serde(default)]
    #[schema(example = "Asha Raman")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "asha@example.com")]
    pub email: String,
    /// At least 8 characters.
    #[serde(default)]
    pub password: String,
    /// Declared skills; duplicates (ignoring case) are dropped.
    #[serde(default)]
    #[schema(example = json!(["Rust", "PostgreSQL"]))]
    pub skills: Vec<String>,
}

/// Request to replace a student's declared skills
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSkillsRequest {
    #[serde(default)]
    #[schema(example = json!(["Rust", "Go"]))]
    pub skills: Vec<String>,
}

/// App state for student routes
#[derive(Clone)]
pub struct StudentsState {
    pub service: Arc<StudentService>,
    pub auth: AuthState,
}

impl StudentsState {
    pub fn new(db: Arc<StorageBackend>, auth: AuthState) -> Self {
        Self {
            service: Arc::new(StudentService::new(db)),
            auth,
        }
    }
}

impl FromRef<StudentsState> for AuthState {
    fn from_ref(input: &StudentsState) -> Self {
        input.auth.clone()
    }
}

/// Create student routes
pub fn routes(state: StudentsState) -> Router {
    Router::new()
        .route("/v1/students", post(register_student).get(list_students))
        .route("/v1/students/:student_id", get(get_student))
        .route("/v1/students/:student_id/skills", put(update_skills))
        .with_state(state)
}

/// POST /v1/students - Register a student
#[utoipa::path(
    post,
    path = "/v1/students",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn register_student(
    State(state): State<StudentsState>,
    ApiJson(req): ApiJson<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    validate_registration_input(&req.name, &req.email, &req.skills)?;

    let student = state.service.register(req).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /v1/students - List students, newest first
#[utoipa::path(
    get,
    path = "/v1/students",
    responses(
        (status = 200, description = "List of students", body = ListResponse<Student>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn list_students(
    State(state): State<StudentsState>,
    _admin: AdminUser,
) -> Result<Json<ListResponse<Student>>, ApiError> {
    let students = state.service.list().await?;
    Ok(Json(ListResponse::new(students)))
}

/// GET /v1/students/{student_id} - Get a student
#[utoipa::path(
    get,
    path = "/v1/students/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not your record"),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn get_student(
    State(state): State<StudentsState>,
    user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    user.ensure_can_act_for(student_id)?;

    let student = state
        .service
        .get(student_id)
        .await?
        .ok_or_else(|| ErrorResponse::new(STUDENT_NOT_FOUND).into_response(StatusCode::NOT_FOUND))?;

    Ok(Json(student))
}

/// PUT /v1/students/{student_id}/skills - Replace declared skills
///
/// Skills kept in the new list retain their verified flag.
#[utoipa::path(
    put,
    path = "/v1/students/{student_id}/skills",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateSkillsRequest,
    responses(
        (status = 200, description = "Skills replaced", body = Student),
        (status = 400, description = "Input exceeds allowed limits", body = ErrorResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not your record"),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn update_skills(
    State(state): State<StudentsState>,
    user: AuthUser,
    Path(student_id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateSkillsRequest>,
) -> Result<Json<Student>, ApiError> {
    user.ensure_can_act_for(student_id)?;
    validate_skills(&req.skills)?;

    let student = state.service.replace_skills(student_id, req.skills).await?;

    Ok(Json(student))
}

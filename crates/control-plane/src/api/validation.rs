// Input validation for SkillVerify APIs
//
// Last-resort size limits against abuse. Hard limits, not configurable.
// Required-field checks produce specific messages; size checks return one
// generic message so clients cannot tell which field tripped.

use super::common::ErrorResponse;
use axum::http::StatusCode;
use axum::Json;
use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for a student name.
pub const MAX_STUDENT_NAME_BYTES: usize = 256;

/// Maximum size for an email address (RFC 5321 path limit is lower, 320 is the
/// conventional local@domain ceiling).
pub const MAX_EMAIL_BYTES: usize = 320;

/// Maximum number of skills a student may declare.
pub const MAX_SKILLS: usize = 64;

/// Maximum size for one skill name.
pub const MAX_SKILL_NAME_BYTES: usize = 128;

/// Maximum size for a meeting link. 2 KB covers any conferencing URL.
pub const MAX_MEETING_LINK_BYTES: usize = 2 * 1024; // 2 KB

/// Maximum size for interview date and time, each.
pub const MAX_INTERVIEW_FIELD_BYTES: usize = 128;

/// Maximum size for the admin's free-text note.
pub const MAX_ADMIN_MESSAGE_BYTES: usize = 10 * 1024; // 10 KB

/// Generic validation error message returned to clients.
pub const VALIDATION_ERROR_MESSAGE: &str = "Input exceeds allowed limits";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

// =============================================================================
// Validation Functions
// =============================================================================

/// Validation error - returns generic message to avoid leaking details
#[derive(Debug)]
pub struct ValidationError;

impl From<ValidationError> for (StatusCode, Json<ErrorResponse>) {
    fn from(_: ValidationError) -> Self {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(VALIDATION_ERROR_MESSAGE)),
        )
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        tracing::warn!(
            "{} exceeds limit: {} bytes (max: {})",
            field,
            value.len(),
            max
        );
        return Err(ValidationError);
    }
    Ok(())
}

/// Loose shape check: something@something.tld, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate skill list count and per-skill size
pub fn validate_skills(skills: &[String]) -> Result<(), ValidationError> {
    if skills.len() > MAX_SKILLS {
        tracing::warn!(
            "Skill count exceeds limit: {} (max: {})",
            skills.len(),
            MAX_SKILLS
        );
        return Err(ValidationError);
    }
    for skill in skills {
        check_len("Skill name", skill, MAX_SKILL_NAME_BYTES)?;
    }
    Ok(())
}

/// Validate all fields of a registration request
pub fn validate_registration_input(
    name: &str,
    email: &str,
    skills: &[String],
) -> Result<(), ValidationError> {
    check_len("Student name", name, MAX_STUDENT_NAME_BYTES)?;
    check_len("Email", email, MAX_EMAIL_BYTES)?;
    validate_skills(skills)
}

/// Validate the scheduling fields of an accept request
pub fn validate_schedule_input(
    interview_date: Option<&str>,
    interview_time: Option<&str>,
    meeting_link: Option<&str>,
    admin_message: Option<&str>,
) -> Result<(), ValidationError> {
    if let Some(date) = interview_date {
        check_len("Interview date", date, MAX_INTERVIEW_FIELD_BYTES)?;
    }
    if let Some(time) = interview_time {
        check_len("Interview time", time, MAX_INTERVIEW_FIELD_BYTES)?;
    }
    if let Some(link) = meeting_link {
        check_len("Meeting link", link, MAX_MEETING_LINK_BYTES)?;
    }
    if let Some(message) = admin_message {
        check_len("Admin message", message, MAX_ADMIN_MESSAGE_BYTES)?;
    }
    Ok(())
}

/// Validate a single skill name used as a lookup key
pub fn validate_skill_name(skill: &str) -> Result<(), ValidationError> {
    check_len("Skill name", skill, MAX_SKILL_NAME_BYTES)
}

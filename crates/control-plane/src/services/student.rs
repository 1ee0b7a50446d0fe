// Student service: registration, declared skills and admin verification

use crate::api::students::RegisterStudentRequest;
use crate::api::validation::is_valid_email;
use crate::storage::password::{hash_password, password_policy_violation, verify_password};
use crate::storage::{CreateStudentRow, StorageBackend, StudentRow};
use anyhow::Context;
use skillverify_core::{merge_skills, normalize_skill_names, Skill, Student};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use super::notification::STUDENT_NOT_FOUND;

pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
pub const SKILL_NOT_FOUND: &str = "Skill not found";

pub struct StudentService {
    db: Arc<StorageBackend>,
}

impl StudentService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn register(&self, req: RegisterStudentRequest) -> ServiceResult<Student> {
        let name = req.name.trim().to_string();
        let email = req.email.trim().to_lowercase();

        if name.is_empty() {
            return Err(ServiceError::validation("Name is required"));
        }
        if email.is_empty() {
            return Err(ServiceError::validation("Email is required"));
        }
        if !is_valid_email(&email) {
            return Err(ServiceError::validation("Invalid email address"));
        }
        if let Some(reason) = password_policy_violation(&req.password) {
            return Err(ServiceError::validation(reason));
        }

        if self.db.get_student_by_email(&email).await?.is_some() {
            return Err(ServiceError::validation(EMAIL_ALREADY_REGISTERED));
        }

        let password_hash = hash_password(&req.password)?;
        let skills: Vec<Skill> = normalize_skill_names(&req.skills)
            .into_iter()
            .map(Skill::unverified)
            .collect();

        let row = self
            .db
            .create_student(CreateStudentRow {
                name,
                email,
                password_hash: Some(password_hash),
                skills: skills_to_json(&skills)?,
            })
            .await?;

        tracing::info!("student.id" = %row.id, "Student registered");

        Ok(Self::row_to_student(row)?)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<Option<Student>> {
        match self.db.get_student(id).await? {
            Some(row) => Ok(Some(Self::row_to_student(row)?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Student>> {
        let rows = self.db.list_students().await?;
        let students = rows
            .into_iter()
            .map(Self::row_to_student)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(students)
    }

    /// Replace the declared skill list. Retained names keep their flag.
    pub async fn replace_skills(&self, id: Uuid, names: Vec<String>) -> ServiceResult<Student> {
        let current = self.load(id).await?;
        let skills = merge_skills(&current.skills, &names);
        self.store_skills(id, &skills).await
    }

    /// Mark one of the student's skills as verified. Idempotent.
    pub async fn verify_skill(&self, student_id: Uuid, skill: &str) -> ServiceResult<Student> {
        let span = tracing::info_span!(
            "student.verify_skill",
            "student.id" = %student_id,
            skill = %skill,
        );

        async move {
            let mut student = self.load(student_id).await?;

            let target = student
                .skills
                .iter_mut()
                .find(|s| s.matches(skill))
                .ok_or_else(|| ServiceError::not_found(SKILL_NOT_FOUND))?;

            if target.verified {
                tracing::debug!("Skill already verified");
                return Ok(student);
            }
            target.verified = true;

            let updated = self.store_skills(student_id, &student.skills).await?;
            tracing::info!("Skill verified");
            Ok(updated)
        }
        .instrument(span)
        .await
    }

    /// Check login credentials. `None` covers unknown email, wrong password
    /// and accounts without a password.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<Option<Student>> {
        let email = email.trim().to_lowercase();
        let Some(row) = self.db.get_student_by_email(&email).await? else {
            return Ok(None);
        };
        let Some(stored_hash) = row.password_hash.as_deref() else {
            return Ok(None);
        };

        if !verify_password(password, stored_hash)? {
            return Ok(None);
        }

        Ok(Some(Self::row_to_student(row)?))
    }

    async fn load(&self, id: Uuid) -> ServiceResult<Student> {
        let row = self
            .db
            .get_student(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))?;
        Ok(Self::row_to_student(row)?)
    }

    async fn store_skills(&self, id: Uuid, skills: &[Skill]) -> ServiceResult<Student> {
        let row = self
            .db
            .update_student_skills(id, skills_to_json(skills)?)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))?;
        Ok(Self::row_to_student(row)?)
    }

    pub(crate) fn row_to_student(row: StudentRow) -> anyhow::Result<Student> {
        let skills: Vec<Skill> = serde_json::from_value(row.skills)
            .with_context(|| format!("Invalid skills document for student {}", row.id))?;

        Ok(Student {
            id: row.id,
            name: row.name,
            email: row.email,
            skills,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn skills_to_json(skills: &[Skill]) -> anyhow::Result<serde_json::Value> {
    serde_json::to_value(skills).context("Failed to serialize skills")
}

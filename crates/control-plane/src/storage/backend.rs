// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(std::sync::Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(std::sync::Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Short backend name for health output and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    /// Apply schema migrations (no-op for in-memory)
    pub async fn run_migrations(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.run_migrations().await,
            Self::InMemory(_) => Ok(()),
        }
    }

    // ============================================
    // Students
    // ============================================

    pub async fn create_student(&self, input: CreateStudentRow) -> Result<StudentRow> {
        match self {
            Self::Postgres(db) => db.create_student(input).await,
            Self::InMemory(db) => db.create_student(input).await,
        }
    }

    pub async fn get_student(&self, id: Uuid) -> Result<Option<StudentRow>> {
        match self {
            Self::Postgres(db) => db.get_student(id).await,
            Self::InMemory(db) => db.get_student(id).await,
        }
    }

    pub async fn get_student_by_email(&self, email: &str) -> Result<Option<StudentRow>> {
        match self {
            Self::Postgres(db) => db.get_student_by_email(email).await,
            Self::InMemory(db) => db.get_student_by_email(email).await,
        }
    }

    pub async fn list_students(&self) -> Result<Vec<StudentRow>> {
        match self {
            Self::Postgres(db) => db.list_students().await,
            Self::InMemory(db) => db.list_students().await,
        }
    }

    pub async fn update_student_skills(
        &self,
        id: Uuid,
        skills: sqlx::types::JsonValue,
    ) -> Result<Option<StudentRow>> {
        match self {
            Self::Postgres(db) => db.update_student_skills(id, skills).await,
            Self::InMemory(db) => db.update_student_skills(id, skills).await,
        }
    }

    // ============================================
    // Notifications
    // ============================================

    pub async fn find_pending_notification(
        &self,
        student_id: Uuid,
        kind: &str,
    ) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => db.find_pending_notification(student_id, kind).await,
            Self::InMemory(db) => db.find_pending_notification(student_id, kind).await,
        }
    }

    pub async fn create_pending_notification(
        &self,
        input: CreateNotificationRow,
    ) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => db.create_pending_notification(input).await,
            Self::InMemory(db) => db.create_pending_notification(input).await,
        }
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => db.get_notification(id).await,
            Self::InMemory(db) => db.get_notification(id).await,
        }
    }

    pub async fn accept_notification(
        &self,
        id: Uuid,
        input: AcceptNotificationRow,
    ) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => db.accept_notification(id, input).await,
            Self::InMemory(db) => db.accept_notification(id, input).await,
        }
    }

    pub async fn reject_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => db.reject_notification(id).await,
            Self::InMemory(db) => db.reject_notification(id).await,
        }
    }

    pub async fn mark_notification_read(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => db.mark_notification_read(id).await,
            Self::InMemory(db) => db.mark_notification_read(id).await,
        }
    }

    pub async fn list_notifications(
        &self,
        student_id: Option<Uuid>,
    ) -> Result<Vec<NotificationWithStudentRow>> {
        match self {
            Self::Postgres(db) => db.list_notifications(student_id).await,
            Self::InMemory(db) => db.list_notifications(student_id).await,
        }
    }
}

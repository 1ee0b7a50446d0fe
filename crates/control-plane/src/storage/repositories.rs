// Repository layer for PostgreSQL
// Decision: Runtime-checked queries (query_as) so the crate builds without a live database
// Decision: IDs are generated in Rust (UUID v7) so both backends order identically

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::*;

const NOTIFICATION_COLUMNS: &str = "id, kind, student_id, message, status, interview_date, \
     interview_time, meeting_link, admin_message, is_read, created_at, updated_at";

const STUDENT_COLUMNS: &str = "id, name, email, password_hash, skills, created_at, updated_at";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations from the workspace `migrations/` directory
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ============================================
    // Students
    // ============================================

    pub async fn create_student(&self, input: CreateStudentRow) -> Result<StudentRow> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            r#"
            INSERT INTO students (id, name, email, password_hash, skills)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.skills)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_student(&self, id: Uuid) -> Result<Option<StudentRow>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_student_by_email(&self, email: &str) -> Result<Option<StudentRow>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_students(&self) -> Result<Vec<StudentRow>> {
        let rows = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_student_skills(
        &self,
        id: Uuid,
        skills: sqlx::types::JsonValue,
    ) -> Result<Option<StudentRow>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            r#"
            UPDATE students
            SET skills = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&skills)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Notifications
    // ============================================

    pub async fn find_pending_notification(
        &self,
        student_id: Uuid,
        kind: &str,
    ) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE student_id = $1 AND kind = $2 AND status = 'pending'
            LIMIT 1
            "#
        ))
        .bind(student_id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Insert a pending notification.
    /// Returns `None` when the student already has a pending one of the same kind;
    /// the partial unique index `notifications_one_pending_per_student` makes this atomic.
    pub async fn create_pending_notification(
        &self,
        input: CreateNotificationRow,
    ) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            INSERT INTO notifications (id, kind, student_id, message, status, is_read)
            VALUES ($1, $2, $3, $4, 'pending', FALSE)
            ON CONFLICT (student_id, kind) WHERE status = 'pending' DO NOTHING
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&input.kind)
        .bind(input.student_id)
        .bind(&input.message)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Conditional write: only a pending notification is accepted.
    pub async fn accept_notification(
        &self,
        id: Uuid,
        input: AcceptNotificationRow,
    ) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            UPDATE notifications
            SET
                status = 'accepted',
                interview_date = $2,
                interview_time = $3,
                meeting_link = $4,
                admin_message = $5,
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.interview_date)
        .bind(&input.interview_time)
        .bind(&input.meeting_link)
        .bind(&input.admin_message)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Conditional write: only a pending notification is rejected.
    pub async fn reject_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            UPDATE notifications
            SET status = 'rejected', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn mark_notification_read(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            UPDATE notifications
            SET is_read = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_notifications(
        &self,
        student_id: Option<Uuid>,
    ) -> Result<Vec<NotificationWithStudentRow>> {
        let rows = sqlx::query_as::<_, NotificationWithStudentRow>(
            r#"
            SELECT
                n.id, n.kind, n.student_id, n.message, n.status,
                n.interview_date, n.interview_time, n.meeting_link, n.admin_message,
                n.is_read, n.created_at, n.updated_at,
                s.name AS student_name,
                s.email AS student_email
            FROM notifications n
            LEFT JOIN students s ON s.id = n.student_id
            WHERE ($1::uuid IS NULL OR n.student_id = $1)
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

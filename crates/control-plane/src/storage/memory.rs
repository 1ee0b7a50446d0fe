// In-memory storage implementation for dev mode and tests
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation mirrors the PostgreSQL repository API backed by
// in-memory HashMaps, allowing the control-plane to run without a database.
// Check-then-insert and conditional updates run under a single write lock,
// matching the atomicity the partial unique index gives PostgreSQL.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    students: RwLock<HashMap<Uuid, StudentRow>>,
    notifications: RwLock<HashMap<Uuid, NotificationRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Students
    // ============================================

    pub async fn create_student(&self, input: CreateStudentRow) -> Result<StudentRow> {
        let mut students = self.students.write();
        if students.values().any(|s| s.email == input.email) {
            bail!("duplicate key value violates unique constraint \"students_email_key\"");
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = StudentRow {
            id,
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            skills: input.skills,
            created_at: now,
            updated_at: now,
        };
        students.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_student(&self, id: Uuid) -> Result<Option<StudentRow>> {
        Ok(self.students.read().get(&id).cloned())
    }

    pub async fn get_student_by_email(&self, email: &str) -> Result<Option<StudentRow>> {
        Ok(self
            .students
            .read()
            .values()
            .find(|s| s.email == email)
            .cloned())
    }

    pub async fn list_students(&self) -> Result<Vec<StudentRow>> {
        let mut result: Vec<_> = self.students.read().values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    pub async fn update_student_skills(
        &self,
        id: Uuid,
        skills: sqlx::types::JsonValue,
    ) -> Result<Option<StudentRow>> {
        let mut students = self.students.write();
        if let Some(student) = students.get_mut(&id) {
            student.skills = skills;
            student.updated_at = Self::now();
            return Ok(Some(student.clone()));
        }
        Ok(None)
    }

    // ============================================
    // Notifications
    // ============================================

    pub async fn find_pending_notification(
        &self,
        student_id: Uuid,
        kind: &str,
    ) -> Result<Option<NotificationRow>> {
        Ok(self
            .notifications
            .read()
            .values()
            .find(|n| n.student_id == student_id && n.kind == kind && n.status == "pending")
            .cloned())
    }

    pub async fn create_pending_notification(
        &self,
        input: CreateNotificationRow,
    ) -> Result<Option<NotificationRow>> {
        let mut notifications = self.notifications.write();
        let already_pending = notifications.values().any(|n| {
            n.student_id == input.student_id && n.kind == input.kind && n.status == "pending"
        });
        if already_pending {
            return Ok(None);
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = NotificationRow {
            id,
            kind: input.kind,
            student_id: input.student_id,
            message: input.message,
            status: "pending".to_string(),
            interview_date: None,
            interview_time: None,
            meeting_link: None,
            admin_message: None,
            is_read: false,
            created_at: now,
            updated_at: now,
        };
        notifications.insert(id, row.clone());
        Ok(Some(row))
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        Ok(self.notifications.read().get(&id).cloned())
    }

    pub async fn accept_notification(
        &self,
        id: Uuid,
        input: AcceptNotificationRow,
    ) -> Result<Option<NotificationRow>> {
        let mut notifications = self.notifications.write();
        match notifications.get_mut(&id) {
            Some(n) if n.status == "pending" => {
                n.status = "accepted".to_string();
                n.interview_date = Some(input.interview_date);
                n.interview_time = Some(input.interview_time);
                n.meeting_link = Some(input.meeting_link);
                n.admin_message = input.admin_message;
                n.updated_at = Self::now();
                Ok(Some(n.clone()))
            }
            _ => Ok(None),
        }
    }

    pub async fn reject_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        let mut notifications = self.notifications.write();
        match notifications.get_mut(&id) {
            Some(n) if n.status == "pending" => {
                n.status = "rejected".to_string();
                n.updated_at = Self::now();
                Ok(Some(n.clone()))
            }
            _ => Ok(None),
        }
    }

    pub async fn mark_notification_read(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        let mut notifications = self.notifications.write();
        if let Some(n) = notifications.get_mut(&id) {
            n.is_read = true;
            n.updated_at = Self::now();
            return Ok(Some(n.clone()));
        }
        Ok(None)
    }

    pub async fn list_notifications(
        &self,
        student_id: Option<Uuid>,
    ) -> Result<Vec<NotificationWithStudentRow>> {
        let notifications = self.notifications.read();
        let students = self.students.read();

        let mut result: Vec<_> = notifications
            .values()
            .filter(|n| student_id.map_or(true, |id| n.student_id == id))
            .map(|n| {
                let student = students.get(&n.student_id);
                NotificationWithStudentRow {
                    notification: n.clone(),
                    student_name: student.map(|s| s.name.clone()),
                    student_email: student.map(|s| s.email.clone()),
                }
            })
            .collect();

        result.sort_by(|a, b| {
            b.notification
                .created_at
                .cmp(&a.notification.created_at)
                .then(b.notification.id.cmp(&a.notification.id))
        });
        Ok(result)
    }
}

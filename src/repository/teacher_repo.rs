// ==========================================
// Substitute Planner - Teacher Repository
// ==========================================
// Red line: repositories carry no business logic, only data access.
// ==========================================

use crate::domain::teacher::Teacher;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct TeacherRepository {
    conn: Arc<Mutex<Connection>>,
}

/// Fields for creating a teacher; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: String,
    pub code: String,
    pub phone: String,
    pub email: String,
}

impl TeacherRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_teacher(row: &Row<'_>) -> rusqlite::Result<Teacher> {
        Ok(Teacher {
            id: row.get(0)?,
            name: row.get(1)?,
            code: row.get(2)?,
            phone: row.get(3)?,
            email: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    /// Insert a teacher and return the assigned id.
    pub fn create(&self, teacher: &NewTeacher) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO teacher (name, code, phone, email, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                teacher.name,
                teacher.code,
                teacher.phone,
                teacher.email,
                Utc::now().naive_utc(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Teacher>> {
        let conn = self.get_conn()?;
        let result = conn
            .query_row(
                "SELECT id, name, code, phone, email, created_at FROM teacher WHERE id = ?1",
                params![id],
                Self::row_to_teacher,
            )
            .optional()?;
        Ok(result)
    }

    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Teacher>> {
        let conn = self.get_conn()?;
        let result = conn
            .query_row(
                "SELECT id, name, code, phone, email, created_at FROM teacher WHERE code = ?1",
                params![code],
                Self::row_to_teacher,
            )
            .optional()?;
        Ok(result)
    }

    /// All teachers, ordered by id ascending.
    ///
    /// The id order is the documented tie-break order used by the
    /// assignment engine; do not change it to name or code order.
    pub fn list_all(&self) -> RepositoryResult<Vec<Teacher>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, code, phone, email, created_at FROM teacher ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], Self::row_to_teacher)?;
        let mut teachers = Vec::new();
        for row in rows {
            teachers.push(row?);
        }
        Ok(teachers)
    }

    pub fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found: Option<i64> = conn
            .query_row("SELECT id FROM teacher WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Delete a teacher; timetable entries, absences and substitutions
    /// cascade via foreign keys.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM teacher WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "teacher".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

// ==========================================
// Substitute Planner - Absence Repository
// ==========================================
// One row per (teacher, date); the engine reads, never mutates.
// ==========================================

use crate::domain::absence::Absence;
use crate::domain::types::{DayLabel, ReportedBy};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct AbsenceRepository {
    conn: Arc<Mutex<Connection>>,
}

/// Fields for declaring an absence.
#[derive(Debug, Clone)]
pub struct NewAbsence {
    pub teacher_id: i64,
    pub date: NaiveDate,
    pub day: DayLabel,
    pub reported_by: ReportedBy,
}

impl AbsenceRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_absence(row: &Row<'_>) -> rusqlite::Result<Absence> {
        let day_str: String = row.get(3)?;
        let reported_str: String = row.get(4)?;
        Ok(Absence {
            id: row.get(0)?,
            teacher_id: row.get(1)?,
            date: row.get(2)?,
            day: DayLabel::from_db_str(&day_str).unwrap_or(DayLabel::Day1),
            reported_by: ReportedBy::from_db_str(&reported_str).unwrap_or(ReportedBy::Admin),
            created_at: row.get(5)?,
        })
    }

    pub fn create(&self, absence: &NewAbsence) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO absence (teacher_id, date, day, reported_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                absence.teacher_id,
                absence.date,
                absence.day.to_db_str(),
                absence.reported_by.to_db_str(),
                Utc::now().naive_utc(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All absences declared for a date, teacher id ascending.
    pub fn find_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Absence>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, teacher_id, date, day, reported_by, created_at
             FROM absence WHERE date = ?1
             ORDER BY teacher_id ASC",
        )?;
        let rows = stmt.query_map(params![date], Self::row_to_absence)?;
        let mut absences = Vec::new();
        for row in rows {
            absences.push(row?);
        }
        Ok(absences)
    }

    pub fn find_by_teacher_date(
        &self,
        teacher_id: i64,
        date: NaiveDate,
    ) -> RepositoryResult<Option<Absence>> {
        let conn = self.get_conn()?;
        let result = conn
            .query_row(
                "SELECT id, teacher_id, date, day, reported_by, created_at
                 FROM absence WHERE teacher_id = ?1 AND date = ?2",
                params![teacher_id, date],
                Self::row_to_absence,
            )
            .optional()?;
        Ok(result)
    }

    /// Listing for history views, newest date first.
    pub fn list_all(&self) -> RepositoryResult<Vec<Absence>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, teacher_id, date, day, reported_by, created_at
             FROM absence ORDER BY date DESC, teacher_id ASC",
        )?;
        let rows = stmt.query_map([], Self::row_to_absence)?;
        let mut absences = Vec::new();
        for row in rows {
            absences.push(row?);
        }
        Ok(absences)
    }

    pub fn delete_by_teacher_date(
        &self,
        teacher_id: i64,
        date: NaiveDate,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM absence WHERE teacher_id = ?1 AND date = ?2",
            params![teacher_id, date],
        )?;
        Ok(affected > 0)
    }

    /// Clear the whole absence set for a date (admin bulk re-declaration).
    pub fn delete_all_for_date(&self, date: NaiveDate) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM absence WHERE date = ?1", params![date])?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::teacher_repo::{NewTeacher, TeacherRepository};

    fn setup() -> (TeacherRepository, AbsenceRepository) {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));
        (
            TeacherRepository::from_connection(conn.clone()),
            AbsenceRepository::from_connection(conn),
        )
    }

    fn add_teacher(repo: &TeacherRepository, code: &str) -> i64 {
        repo.create(&NewTeacher {
            name: format!("Teacher {}", code),
            code: code.to_string(),
            phone: "0000000000".to_string(),
            email: format!("{}@school.test", code),
        })
        .unwrap()
    }

    fn absence(teacher_id: i64, date: NaiveDate) -> NewAbsence {
        NewAbsence {
            teacher_id,
            date,
            day: DayLabel::from_date(date),
            reported_by: ReportedBy::SelfReported,
        }
    }

    #[test]
    fn duplicate_absence_for_same_date_is_rejected() {
        let (teachers, absences) = setup();
        let t = add_teacher(&teachers, "T-001");
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

        absences.create(&absence(t, date)).unwrap();
        let err = absences.create(&absence(t, date)).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn find_by_date_only_returns_that_date() {
        let (teachers, absences) = setup();
        let a = add_teacher(&teachers, "T-001");
        let b = add_teacher(&teachers, "T-002");
        let monday = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();

        absences.create(&absence(a, monday)).unwrap();
        absences.create(&absence(b, tuesday)).unwrap();

        let found = absences.find_by_date(monday).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].teacher_id, a);
        assert_eq!(found[0].day, DayLabel::Day1);
    }

    #[test]
    fn delete_all_for_date_clears_the_set() {
        let (teachers, absences) = setup();
        let a = add_teacher(&teachers, "T-001");
        let b = add_teacher(&teachers, "T-002");
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

        absences.create(&absence(a, date)).unwrap();
        absences.create(&absence(b, date)).unwrap();

        assert_eq!(absences.delete_all_for_date(date).unwrap(), 2);
        assert!(absences.find_by_date(date).unwrap().is_empty());
        assert!(!absences.delete_by_teacher_date(a, date).unwrap());
    }
}

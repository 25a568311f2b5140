// ==========================================
// Substitute Planner - Timetable Repository
// ==========================================
// Canonical weekly schedule cells. Read-mostly: the assignment engine
// only ever reads this table.
// ==========================================

use crate::domain::timetable::TimetableEntry;
use crate::domain::types::DayLabel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct TimetableRepository {
    conn: Arc<Mutex<Connection>>,
}

/// Fields for creating or replacing a schedule cell.
#[derive(Debug, Clone)]
pub struct NewTimetableEntry {
    pub teacher_id: i64,
    pub day: DayLabel,
    pub period: u32,
    pub class_name: String,
    pub section: Option<String>,
    pub is_free: bool,
}

impl TimetableRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<TimetableEntry> {
        let day_str: String = row.get(2)?;
        Ok(TimetableEntry {
            id: row.get(0)?,
            teacher_id: row.get(1)?,
            day: DayLabel::from_db_str(&day_str).unwrap_or(DayLabel::Day1),
            period: row.get(3)?,
            class_name: row.get(4)?,
            section: row.get(5)?,
            is_free: row.get(6)?,
        })
    }

    const SELECT_COLUMNS: &'static str =
        "id, teacher_id, day, period, class_name, section, is_free";

    /// Insert or replace the cell for (teacher, day, period).
    ///
    /// Upsert keeps the at-most-one-entry-per-slot invariant without the
    /// caller having to look up the existing row first.
    pub fn upsert(&self, entry: &NewTimetableEntry) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO timetable_entry (teacher_id, day, period, class_name, section, is_free)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (teacher_id, day, period)
            DO UPDATE SET class_name = ?4, section = ?5, is_free = ?6
            "#,
            params![
                entry.teacher_id,
                entry.day.to_db_str(),
                entry.period,
                entry.class_name,
                entry.section,
                entry.is_free,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// A teacher's entries for one cycle day, period ascending.
    pub fn entries_for_teacher_day(
        &self,
        teacher_id: i64,
        day: DayLabel,
    ) -> RepositoryResult<Vec<TimetableEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM timetable_entry
             WHERE teacher_id = ?1 AND day = ?2
             ORDER BY period ASC",
            Self::SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![teacher_id, day.to_db_str()], Self::row_to_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// A teacher's scheduled classes (non-free cells) for one cycle day.
    pub fn classes_for_teacher_day(
        &self,
        teacher_id: i64,
        day: DayLabel,
    ) -> RepositoryResult<Vec<TimetableEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM timetable_entry
             WHERE teacher_id = ?1 AND day = ?2 AND is_free = 0
             ORDER BY period ASC",
            Self::SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![teacher_id, day.to_db_str()], Self::row_to_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Teachers explicitly marked free at (day, period), id ascending.
    ///
    /// The id order is the engine's documented tie-break; it must not
    /// depend on storage iteration order.
    pub fn free_teacher_ids(&self, day: DayLabel, period: u32) -> RepositoryResult<Vec<i64>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT teacher_id FROM timetable_entry
             WHERE day = ?1 AND period = ?2 AND is_free = 1
             ORDER BY teacher_id ASC",
        )?;
        let rows = stmt.query_map(params![day.to_db_str(), period], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    /// Teachers with any entry at all (free or class) at (day, period).
    pub fn scheduled_teacher_ids(&self, day: DayLabel, period: u32) -> RepositoryResult<Vec<i64>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT teacher_id FROM timetable_entry
             WHERE day = ?1 AND period = ?2
             ORDER BY teacher_id ASC",
        )?;
        let rows = stmt.query_map(params![day.to_db_str(), period], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    pub fn delete_for_teacher(&self, teacher_id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM timetable_entry WHERE teacher_id = ?1",
            params![teacher_id],
        )?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::teacher_repo::{NewTeacher, TeacherRepository};

    fn setup() -> (TeacherRepository, TimetableRepository) {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));
        (
            TeacherRepository::from_connection(conn.clone()),
            TimetableRepository::from_connection(conn),
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

    fn cell(teacher_id: i64, period: u32, class: &str, free: bool) -> NewTimetableEntry {
        NewTimetableEntry {
            teacher_id,
            day: DayLabel::Day1,
            period,
            class_name: class.to_string(),
            section: Some("A".to_string()),
            is_free: free,
        }
    }

    #[test]
    fn upsert_replaces_existing_cell() {
        let (teachers, timetable) = setup();
        let t = add_teacher(&teachers, "T-001");

        timetable.upsert(&cell(t, 3, "Class 7", false)).unwrap();
        timetable.upsert(&cell(t, 3, "Free", true)).unwrap();

        let entries = timetable.entries_for_teacher_day(t, DayLabel::Day1).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_free);
    }

    #[test]
    fn classes_exclude_free_periods() {
        let (teachers, timetable) = setup();
        let t = add_teacher(&teachers, "T-001");

        timetable.upsert(&cell(t, 1, "Class 7", false)).unwrap();
        timetable.upsert(&cell(t, 2, "Free", true)).unwrap();
        timetable.upsert(&cell(t, 5, "Class 8", false)).unwrap();

        let classes = timetable.classes_for_teacher_day(t, DayLabel::Day1).unwrap();
        let periods: Vec<u32> = classes.iter().map(|e| e.period).collect();
        assert_eq!(periods, vec![1, 5]);
    }

    #[test]
    fn free_and_scheduled_lookups_are_id_ordered() {
        let (teachers, timetable) = setup();
        let a = add_teacher(&teachers, "T-001");
        let b = add_teacher(&teachers, "T-002");
        let c = add_teacher(&teachers, "T-003");

        // Insert out of id order; lookups must still return id order.
        timetable.upsert(&cell(c, 3, "Free", true)).unwrap();
        timetable.upsert(&cell(a, 3, "Free", true)).unwrap();
        timetable.upsert(&cell(b, 3, "Class 9", false)).unwrap();

        assert_eq!(timetable.free_teacher_ids(DayLabel::Day1, 3).unwrap(), vec![a, c]);
        assert_eq!(
            timetable.scheduled_teacher_ids(DayLabel::Day1, 3).unwrap(),
            vec![a, b, c]
        );
    }
}

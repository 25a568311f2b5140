// ==========================================
// Substitute Planner - Substitution Repository
// ==========================================
// Rows for a date are owned by the assignment engine; the whole set is
// replaced atomically on recompute. Only transfer approval may touch the
// substitute_teacher_id of an existing row.
// ==========================================

use crate::domain::substitution::{NewSubstitution, Substitution};
use crate::domain::types::DayLabel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct SubstitutionRepository {
    conn: Arc<Mutex<Connection>>,
}

/// Read model for the daily plan view: one covered period with teacher
/// names resolved and the number of pending transfer requests against it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SubstitutionSummaryRow {
    pub substitution_id: i64,
    pub period: u32,
    pub original_teacher_id: i64,
    pub original_teacher_name: String,
    pub substitute_teacher_id: i64,
    pub substitute_teacher_name: String,
    pub class_name: String,
    pub section: Option<String>,
    pub pending_transfers: i64,
}

impl SubstitutionRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_substitution(row: &Row<'_>) -> rusqlite::Result<Substitution> {
        let day_str: String = row.get(4)?;
        Ok(Substitution {
            id: row.get(0)?,
            original_teacher_id: row.get(1)?,
            substitute_teacher_id: row.get(2)?,
            date: row.get(3)?,
            day: DayLabel::from_db_str(&day_str).unwrap_or(DayLabel::Day1),
            period: row.get(5)?,
            class_name: row.get(6)?,
            section: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    const SELECT_COLUMNS: &'static str = "id, original_teacher_id, substitute_teacher_id, \
         date, day, period, class_name, section, created_at";

    /// Replace the entire substitution set for a date in one transaction.
    ///
    /// Readers either see the old set or the new one, never a mix; a
    /// failure mid-insert rolls the delete back too.
    pub fn replace_for_date(
        &self,
        date: NaiveDate,
        rows: &[NewSubstitution],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute("DELETE FROM substitution WHERE date = ?1", params![date])?;
        let now = Utc::now().naive_utc();
        for row in rows {
            tx.execute(
                r#"
                INSERT INTO substitution (
                    original_teacher_id, substitute_teacher_id,
                    date, day, period, class_name, section, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    row.original_teacher_id,
                    row.substitute_teacher_id,
                    row.date,
                    row.day.to_db_str(),
                    row.period,
                    row.class_name,
                    row.section,
                    now,
                ],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(rows.len())
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Substitution>> {
        let conn = self.get_conn()?;
        let result = conn
            .query_row(
                &format!(
                    "SELECT {} FROM substitution WHERE id = ?1",
                    Self::SELECT_COLUMNS
                ),
                params![id],
                Self::row_to_substitution,
            )
            .optional()?;
        Ok(result)
    }

    /// All substitutions for a date, period then original teacher ascending.
    pub fn list_for_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Substitution>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM substitution WHERE date = ?1
             ORDER BY period ASC, original_teacher_id ASC",
            Self::SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![date], Self::row_to_substitution)?;
        let mut subs = Vec::new();
        for row in rows {
            subs.push(row?);
        }
        Ok(subs)
    }

    /// Duties a substitute currently holds on a date.
    pub fn list_for_substitute(
        &self,
        substitute_teacher_id: i64,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Substitution>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM substitution
             WHERE substitute_teacher_id = ?1 AND date = ?2
             ORDER BY period ASC",
            Self::SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(
            params![substitute_teacher_id, date],
            Self::row_to_substitution,
        )?;
        let mut subs = Vec::new();
        for row in rows {
            subs.push(row?);
        }
        Ok(subs)
    }

    /// Listing for history views, newest date first.
    pub fn list_all(&self) -> RepositoryResult<Vec<Substitution>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM substitution ORDER BY date DESC, period ASC",
            Self::SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_substitution)?;
        let mut subs = Vec::new();
        for row in rows {
            subs.push(row?);
        }
        Ok(subs)
    }

    /// Plan-view read model: teacher names joined in, pending transfer
    /// requests counted per row. Period then original teacher ascending.
    pub fn list_summaries_for_date(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<SubstitutionSummaryRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                s.id, s.period,
                s.original_teacher_id, orig.name,
                s.substitute_teacher_id, sub.name,
                s.class_name, s.section,
                (SELECT COUNT(*) FROM transfer_request tr
                 WHERE tr.substitution_id = s.id AND tr.status = 'pending')
            FROM substitution s
            JOIN teacher orig ON orig.id = s.original_teacher_id
            JOIN teacher sub  ON sub.id  = s.substitute_teacher_id
            WHERE s.date = ?1
            ORDER BY s.period ASC, s.original_teacher_id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![date], |row| {
            Ok(SubstitutionSummaryRow {
                substitution_id: row.get(0)?,
                period: row.get(1)?,
                original_teacher_id: row.get(2)?,
                original_teacher_name: row.get(3)?,
                substitute_teacher_id: row.get(4)?,
                substitute_teacher_name: row.get(5)?,
                class_name: row.get(6)?,
                section: row.get(7)?,
                pending_transfers: row.get(8)?,
            })
        })?;
        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::teacher_repo::{NewTeacher, TeacherRepository};

    fn setup() -> (TeacherRepository, SubstitutionRepository) {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));
        (
            TeacherRepository::from_connection(conn.clone()),
            SubstitutionRepository::from_connection(conn),
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

    fn row(original: i64, substitute: i64, date: NaiveDate, period: u32) -> NewSubstitution {
        NewSubstitution {
            original_teacher_id: original,
            substitute_teacher_id: substitute,
            date,
            day: DayLabel::from_date(date),
            period,
            class_name: "Class 7".to_string(),
            section: Some("A".to_string()),
        }
    }

    #[test]
    fn replace_for_date_swaps_the_whole_set() {
        let (teachers, subs) = setup();
        let a = add_teacher(&teachers, "T-001");
        let b = add_teacher(&teachers, "T-002");
        let c = add_teacher(&teachers, "T-003");
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

        subs.replace_for_date(date, &[row(a, b, date, 1), row(a, b, date, 4)])
            .unwrap();
        assert_eq!(subs.list_for_date(date).unwrap().len(), 2);

        subs.replace_for_date(date, &[row(a, c, date, 2)]).unwrap();
        let after = subs.list_for_date(date).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].substitute_teacher_id, c);
        assert_eq!(after[0].period, 2);
    }

    #[test]
    fn replace_for_date_leaves_other_dates_alone() {
        let (teachers, subs) = setup();
        let a = add_teacher(&teachers, "T-001");
        let b = add_teacher(&teachers, "T-002");
        let monday = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();

        subs.replace_for_date(monday, &[row(a, b, monday, 1)]).unwrap();
        subs.replace_for_date(tuesday, &[row(a, b, tuesday, 2)]).unwrap();
        subs.replace_for_date(monday, &[]).unwrap();

        assert!(subs.list_for_date(monday).unwrap().is_empty());
        assert_eq!(subs.list_for_date(tuesday).unwrap().len(), 1);
    }

    #[test]
    fn summaries_resolve_names() {
        let (teachers, subs) = setup();
        let a = add_teacher(&teachers, "T-001");
        let b = add_teacher(&teachers, "T-002");
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

        subs.replace_for_date(date, &[row(a, b, date, 3)]).unwrap();

        let summaries = subs.list_summaries_for_date(date).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].original_teacher_name, "Teacher T-001");
        assert_eq!(summaries[0].substitute_teacher_name, "Teacher T-002");
        assert_eq!(summaries[0].pending_transfers, 0);
    }
}

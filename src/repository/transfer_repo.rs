// ==========================================
// Substitute Planner - Transfer Request Repository
// ==========================================
// Decisions are compare-and-set on status = 'pending', so two admins
// acting on the same request cannot both win; the loser sees zero
// affected rows. Approval reassigns the substitution in the same
// transaction as the status flip.
// ==========================================

use crate::domain::transfer::TransferRequest;
use crate::domain::types::TransferStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct TransferRepository {
    conn: Arc<Mutex<Connection>>,
}

/// Fields for filing a transfer request.
#[derive(Debug, Clone)]
pub struct NewTransferRequest {
    pub substitution_id: i64,
    pub requested_by_id: i64,
    pub proposed_teacher_id: i64,
    pub reason: String,
    pub transfer_all: bool,
}

/// Outcome of a compare-and-set decision attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecideCasOutcome {
    /// This caller won the CAS; the decision is recorded.
    Applied,
    /// The request was already in a terminal state.
    AlreadyDecided,
    /// No such transfer request.
    NotFound,
}

impl TransferRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_transfer(row: &Row<'_>) -> rusqlite::Result<TransferRequest> {
        let status_str: String = row.get(7)?;
        Ok(TransferRequest {
            id: row.get(0)?,
            substitution_id: row.get(1)?,
            requested_by_id: row.get(2)?,
            proposed_teacher_id: row.get(3)?,
            reason: row.get(4)?,
            requested_at: row.get(5)?,
            decided_at: row.get(6)?,
            status: TransferStatus::from_db_str(&status_str).unwrap_or(TransferStatus::Pending),
            transfer_all: row.get(8)?,
        })
    }

    const SELECT_COLUMNS: &'static str = "id, substitution_id, requested_by_id, \
         proposed_teacher_id, reason, requested_at, decided_at, status, transfer_all";

    /// File a request; status starts as pending, decided_at unset.
    pub fn create(&self, request: &NewTransferRequest) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO transfer_request (
                substitution_id, requested_by_id, proposed_teacher_id,
                reason, requested_at, status, transfer_all
            ) VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6)
            "#,
            params![
                request.substitution_id,
                request.requested_by_id,
                request.proposed_teacher_id,
                request.reason,
                Utc::now().naive_utc(),
                request.transfer_all,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<TransferRequest>> {
        let conn = self.get_conn()?;
        let result = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transfer_request WHERE id = ?1",
                    Self::SELECT_COLUMNS
                ),
                params![id],
                Self::row_to_transfer,
            )
            .optional()?;
        Ok(result)
    }

    /// All pending requests, oldest first (admin work queue).
    pub fn list_pending(&self) -> RepositoryResult<Vec<TransferRequest>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transfer_request WHERE status = 'pending'
             ORDER BY requested_at ASC, id ASC",
            Self::SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_transfer)?;
        let mut transfers = Vec::new();
        for row in rows {
            transfers.push(row?);
        }
        Ok(transfers)
    }

    /// Listing for history views, newest request first.
    pub fn list_all(&self) -> RepositoryResult<Vec<TransferRequest>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transfer_request ORDER BY requested_at DESC, id DESC",
            Self::SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_transfer)?;
        let mut transfers = Vec::new();
        for row in rows {
            transfers.push(row?);
        }
        Ok(transfers)
    }

    pub fn count_pending_for_substitution(&self, substitution_id: i64) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transfer_request
             WHERE substitution_id = ?1 AND status = 'pending'",
            params![substitution_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Reject a pending request (CAS on status).
    ///
    /// The substitution row is untouched.
    pub fn reject_cas(
        &self,
        transfer_id: i64,
        decided_at: NaiveDateTime,
    ) -> RepositoryResult<DecideCasOutcome> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE transfer_request
             SET status = 'rejected', decided_at = ?2
             WHERE id = ?1 AND status = 'pending'",
            params![transfer_id, decided_at],
        )?;
        if affected > 0 {
            return Ok(DecideCasOutcome::Applied);
        }
        Self::classify_lost_cas(&conn, transfer_id)
    }

    /// Approve a pending request (CAS on status) and hand the referenced
    /// substitution to the proposed teacher, all in one transaction.
    ///
    /// Only substitute_teacher_id changes on the substitution row.
    pub fn approve_and_reassign_cas(
        &self,
        transfer_id: i64,
        decided_at: NaiveDateTime,
    ) -> RepositoryResult<DecideCasOutcome> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let affected = tx.execute(
            "UPDATE transfer_request
             SET status = 'approved', decided_at = ?2
             WHERE id = ?1 AND status = 'pending'",
            params![transfer_id, decided_at],
        )?;
        if affected == 0 {
            // Nothing changed; no need to commit the empty transaction.
            return Self::classify_lost_cas(&tx, transfer_id);
        }

        let reassigned = tx.execute(
            "UPDATE substitution
             SET substitute_teacher_id =
                 (SELECT proposed_teacher_id FROM transfer_request WHERE id = ?1)
             WHERE id = (SELECT substitution_id FROM transfer_request WHERE id = ?1)",
            params![transfer_id],
        )?;
        if reassigned == 0 {
            // The substitution vanished (e.g. a recompute for that date ran
            // after the request was filed). Roll the approval back.
            tx.rollback()
                .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
            return Ok(DecideCasOutcome::NotFound);
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(DecideCasOutcome::Applied)
    }

    /// Distinguish "already decided" from "no such request" after a CAS
    /// update touched zero rows.
    fn classify_lost_cas(
        conn: &Connection,
        transfer_id: i64,
    ) -> RepositoryResult<DecideCasOutcome> {
        let status: Option<String> = conn
            .query_row(
                "SELECT status FROM transfer_request WHERE id = ?1",
                params![transfer_id],
                |row| row.get(0),
            )
            .optional()?;
        match status {
            Some(_) => Ok(DecideCasOutcome::AlreadyDecided),
            None => Ok(DecideCasOutcome::NotFound),
        }
    }
}

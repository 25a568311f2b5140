// ==========================================
// Substitute Planner - SQLite Initialization
// ==========================================
// Goals:
// - One place for Connection::open PRAGMA behavior, so foreign keys are
//   never enabled in some modules and not in others
// - Unified busy_timeout to reduce spurious busy errors on concurrent writes
// - Schema bootstrap for fresh databases
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Unified PRAGMA setup for a SQLite connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must be
/// applied to every connection the process opens.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create all tables if they do not exist yet.
///
/// Idempotent; safe to call on every startup.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS teacher (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            code        TEXT NOT NULL UNIQUE,
            phone       TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS timetable_entry (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id  INTEGER NOT NULL REFERENCES teacher(id) ON DELETE CASCADE,
            day         TEXT NOT NULL,
            period      INTEGER NOT NULL,
            class_name  TEXT NOT NULL,
            section     TEXT,
            is_free     INTEGER NOT NULL DEFAULT 0,
            UNIQUE (teacher_id, day, period)
        );

        CREATE TABLE IF NOT EXISTS absence (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id  INTEGER NOT NULL REFERENCES teacher(id) ON DELETE CASCADE,
            date        TEXT NOT NULL,
            day         TEXT NOT NULL,
            reported_by TEXT NOT NULL DEFAULT 'admin',
            created_at  TEXT NOT NULL,
            UNIQUE (teacher_id, date)
        );

        CREATE TABLE IF NOT EXISTS substitution (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            original_teacher_id   INTEGER NOT NULL REFERENCES teacher(id) ON DELETE CASCADE,
            substitute_teacher_id INTEGER NOT NULL REFERENCES teacher(id) ON DELETE CASCADE,
            date                  TEXT NOT NULL,
            day                   TEXT NOT NULL,
            period                INTEGER NOT NULL,
            class_name            TEXT NOT NULL,
            section               TEXT,
            created_at            TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS transfer_request (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            substitution_id     INTEGER NOT NULL REFERENCES substitution(id) ON DELETE CASCADE,
            requested_by_id     INTEGER NOT NULL REFERENCES teacher(id),
            proposed_teacher_id INTEGER NOT NULL REFERENCES teacher(id),
            reason              TEXT NOT NULL,
            requested_at        TEXT NOT NULL,
            decided_at          TEXT,
            status              TEXT NOT NULL DEFAULT 'pending',
            transfer_all        INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_timetable_day_period
            ON timetable_entry (day, period);
        CREATE INDEX IF NOT EXISTS idx_absence_date
            ON absence (date);
        CREATE INDEX IF NOT EXISTS idx_substitution_date
            ON substitution (date);
        CREATE INDEX IF NOT EXISTS idx_transfer_substitution
            ON transfer_request (substitution_id, status);
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_bootstrap_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('teacher','timetable_entry','absence','substitution','transfer_request')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }
}

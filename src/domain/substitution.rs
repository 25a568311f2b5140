// ==========================================
// Substitute Planner - Substitution Record
// ==========================================
// One covered period: the substitute teacher takes over the original
// (absent) teacher's class for that period on that date.
//
// For a fixed date, each (original teacher, period) pair appears at most
// once. Rows for a date are owned by the assignment engine, which
// deletes-and-recomputes rather than patching incrementally.
// ==========================================

use crate::domain::types::DayLabel;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub id: i64,
    pub original_teacher_id: i64,
    /// Mutated only by transfer approval; all other fields are frozen at
    /// creation time.
    pub substitute_teacher_id: i64,
    pub date: NaiveDate,
    pub day: DayLabel,
    pub period: u32,
    pub class_name: String,
    pub section: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Engine-side row, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubstitution {
    pub original_teacher_id: i64,
    pub substitute_teacher_id: i64,
    pub date: NaiveDate,
    pub day: DayLabel,
    pub period: u32,
    pub class_name: String,
    pub section: Option<String>,
}

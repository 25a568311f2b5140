// ==========================================
// Substitute Planner - Absence Record
// ==========================================
// Invariant: at most one absence per (teacher, date).
// ==========================================

use crate::domain::types::{DayLabel, ReportedBy};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Absence {
    pub id: i64,
    pub teacher_id: i64,
    pub date: NaiveDate,
    /// The school-cycle day the date falls on, recorded at declaration time.
    pub day: DayLabel,
    pub reported_by: ReportedBy,
    pub created_at: NaiveDateTime,
}

// ==========================================
// Substitute Planner - Timetable Entry
// ==========================================
// One cell of a teacher's canonical weekly schedule.
// Invariant: at most one entry per (teacher, day, period).
// ==========================================

use crate::domain::types::DayLabel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: i64,
    pub teacher_id: i64,
    pub day: DayLabel,
    /// 1..=PERIODS_PER_DAY.
    pub period: u32,
    /// Class name, or a placeholder such as "Free" when `is_free` is set.
    pub class_name: String,
    /// Section within the class (A, B, C, ...); optional.
    pub section: Option<String>,
    /// Explicitly-marked free period. A teacher with no entry at all for a
    /// (day, period) slot is also treated as available by the engine, but
    /// ranks after explicitly-free teachers.
    pub is_free: bool,
}

impl TimetableEntry {
    /// A scheduled class that needs covering when its teacher is absent.
    pub fn is_class(&self) -> bool {
        !self.is_free
    }
}

// ==========================================
// Substitute Planner - Teacher Entity
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A member of the teaching staff.
///
/// `code` is the school's external teacher code and is unique across the
/// school; `id` is the database identity used for all foreign keys and as
/// the documented tie-break order during substitute selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    /// Unique external teacher code, e.g. "T-104".
    pub code: String,
    pub phone: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

// ==========================================
// Substitute Planner - Domain Types
// ==========================================
// Closed enumerations shared across layers.
// Day labels are school-cycle days, not calendar weekdays.
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Periods per school day. Plan views always expose all of them as keys.
pub const PERIODS_PER_DAY: u32 = 8;

// ==========================================
// Day label (5-value school cycle)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayLabel {
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
}

impl DayLabel {
    pub const ALL: [DayLabel; 5] = [
        DayLabel::Day1,
        DayLabel::Day2,
        DayLabel::Day3,
        DayLabel::Day4,
        DayLabel::Day5,
    ];

    /// Calendar-date-to-day-label mapping.
    ///
    /// Policy owned by the caller side of the core: Monday..Friday map to
    /// Day 1..Day 5, weekends fall back to Day 1.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => DayLabel::Day1,
            Weekday::Tue => DayLabel::Day2,
            Weekday::Wed => DayLabel::Day3,
            Weekday::Thu => DayLabel::Day4,
            Weekday::Fri => DayLabel::Day5,
            Weekday::Sat | Weekday::Sun => DayLabel::Day1,
        }
    }

    pub fn to_db_str(self) -> &'static str {
        match self {
            DayLabel::Day1 => "Day 1",
            DayLabel::Day2 => "Day 2",
            DayLabel::Day3 => "Day 3",
            DayLabel::Day4 => "Day 4",
            DayLabel::Day5 => "Day 5",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Day 1" => Some(DayLabel::Day1),
            "Day 2" => Some(DayLabel::Day2),
            "Day 3" => Some(DayLabel::Day3),
            "Day 4" => Some(DayLabel::Day4),
            "Day 5" => Some(DayLabel::Day5),
            _ => None,
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Absence reporter tag
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportedBy {
    Admin,
    SelfReported,
}

impl ReportedBy {
    pub fn to_db_str(self) -> &'static str {
        match self {
            ReportedBy::Admin => "admin",
            ReportedBy::SelfReported => "self",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(ReportedBy::Admin),
            "self" => Some(ReportedBy::SelfReported),
            _ => None,
        }
    }
}

impl fmt::Display for ReportedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Transfer request lifecycle
// ==========================================
// pending -> approved | rejected; both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Approved,
    Rejected,
}

impl TransferStatus {
    pub fn to_db_str(self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Approved => "approved",
            TransferStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TransferStatus::Pending),
            "approved" => Some(TransferStatus::Approved),
            "rejected" => Some(TransferStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, TransferStatus::Pending)
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Actor (explicit authorization input)
// ==========================================
// Every api operation takes an Actor instead of reading ambient
// session state; authorization is a pure function of (actor, resource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    /// Set when role == Teacher; admins act without a teacher identity.
    pub teacher_id: Option<i64>,
}

impl Actor {
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            teacher_id: None,
        }
    }

    pub fn teacher(teacher_id: i64) -> Self {
        Self {
            role: Role::Teacher,
            teacher_id: Some(teacher_id),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when the actor is the teacher identified by `teacher_id`.
    pub fn is_teacher(&self, teacher_id: i64) -> bool {
        self.role == Role::Teacher && self.teacher_id == Some(teacher_id)
    }
}

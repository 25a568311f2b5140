// ==========================================
// Substitute Planner - Domain Layer
// ==========================================
// Entities and closed enumerations. No I/O, no SQL.
// ==========================================

pub mod absence;
pub mod substitution;
pub mod teacher;
pub mod timetable;
pub mod transfer;
pub mod types;

pub use absence::Absence;
pub use substitution::{NewSubstitution, Substitution};
pub use teacher::Teacher;
pub use timetable::TimetableEntry;
pub use transfer::TransferRequest;
pub use types::{Actor, DayLabel, ReportedBy, Role, TransferStatus, PERIODS_PER_DAY};

// ==========================================
// Substitute Planner - Repository Layer
// ==========================================
// Red line: repositories carry no business logic.
// All queries are parameterized.
// ==========================================

pub mod absence_repo;
pub mod error;
pub mod substitution_repo;
pub mod teacher_repo;
pub mod timetable_repo;
pub mod transfer_repo;

pub use absence_repo::{AbsenceRepository, NewAbsence};
pub use error::{RepositoryError, RepositoryResult};
pub use substitution_repo::{SubstitutionRepository, SubstitutionSummaryRow};
pub use teacher_repo::{NewTeacher, TeacherRepository};
pub use timetable_repo::{NewTimetableEntry, TimetableRepository};
pub use transfer_repo::{DecideCasOutcome, NewTransferRequest, TransferRepository};

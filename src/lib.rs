// ==========================================
// Substitute Planner - Core Library
// ==========================================
// School staff-scheduling aid: weekly timetables, absence declarations,
// automatic substitute assignment and the transfer-request workflow.
// Stack: Rust + SQLite.
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - business rules
pub mod engine;

// API layer - caller-facing facade
pub mod api;

// Importer layer - external roster data
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection init, PRAGMAs, schema)
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Core re-exports
// ==========================================

pub use domain::types::{Actor, DayLabel, ReportedBy, Role, TransferStatus, PERIODS_PER_DAY};

pub use domain::{Absence, NewSubstitution, Substitution, Teacher, TimetableEntry, TransferRequest};

pub use engine::{
    AssignmentEngine, DailyPlan, PlanOutcome, PlanViewer, TransferDecision, TransferWorkflow,
    UncoveredDuty,
};

pub use api::{ApiError, SchedulingApi};

pub use repository::{
    AbsenceRepository, RepositoryError, SubstitutionRepository, TeacherRepository,
    TimetableRepository, TransferRepository,
};

pub use importer::RosterImporter;

// System version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Substitute Planner";

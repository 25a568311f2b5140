// ==========================================
// Substitute Planner - Importer Layer
// ==========================================
// External roster data -> timetable store.
// ==========================================

pub mod error;
pub mod roster_importer;

pub use error::{ImportError, ImportResult};
pub use roster_importer::{ImportReport, RosterImporter};

// ==========================================
// Substitute Planner - Engine Layer
// ==========================================
// Business rules over the repositories: plan assignment, plan
// projection, transfer decisions. Engines hold no SQL of their own.
// ==========================================

pub mod assignment;
pub mod error;
pub mod plan_view;
pub mod transfer;

pub use assignment::{AssignmentEngine, PlanOutcome, UncoveredDuty};
pub use error::{AssignmentError, TransferError};
pub use plan_view::{DailyPlan, PlanViewer};
pub use transfer::{TransferDecision, TransferWorkflow};

// ==========================================
// Substitute Planner - Engine Errors
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Errors from the assignment engine.
///
/// Any store failure during a recompute rolls the whole rebuild back and
/// surfaces as a single ComputeFailed; there is no partial plan.
#[derive(Error, Debug)]
pub enum AssignmentError {
    #[error("substitution plan recompute failed: {0}")]
    ComputeFailed(#[from] RepositoryError),
}

/// Errors from the transfer workflow.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("not the holder of this resource: {0}")]
    NotOwner(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transfer request {transfer_id} is already decided")]
    AlreadyDecided { transfer_id: i64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

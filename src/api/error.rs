// ==========================================
// Substitute Planner - API Layer Errors
// ==========================================
// Caller-facing taxonomy; repository and engine errors are converted
// here so the surrounding application sees one error surface.
// ==========================================

use crate::engine::error::{AssignmentError, TransferError};
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not the holder of this resource: {0}")]
    NotOwner(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transfer request already decided: {0}")]
    AlreadyDecided(String),

    #[error("substitution plan recompute failed: {0}")]
    ComputeFailed(String),

    #[error("database error: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} with id={}", entity, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::ComputeFailed(source) => ApiError::ComputeFailed(source.to_string()),
        }
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} with id={}", entity, id))
            }
            TransferError::NotOwner(msg) => ApiError::NotOwner(msg),
            TransferError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            TransferError::AlreadyDecided { transfer_id } => {
                ApiError::AlreadyDecided(format!("transfer_request id={}", transfer_id))
            }
            TransferError::Repository(source) => ApiError::from(source),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

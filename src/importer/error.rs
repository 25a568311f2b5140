// ==========================================
// Substitute Planner - Importer Errors
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read roster file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse roster csv: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("roster store write failed: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ImportResult<T> = Result<T, ImportError>;

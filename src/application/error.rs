use thiserror::Error;

use crate::domain::{BillId, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Bill not found: {0}")]
    BillNotFound(BillId),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::BillNotFound(_))
    }
}

//! The module contains the error the engine can throw.
//!
//! Validation problems are **not** errors: they are returned as data (see
//! [`SaveResult::Rejected`]) so the caller can show every violation at once.
//! [`EngineError`] covers infrastructure and lookup faults only.
//!
//! [`SaveResult::Rejected`]: crate::SaveResult::Rejected
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("account classification \"{0}\" not found!")]
    ClassificationNotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::ClassificationNotFound(a), Self::ClassificationNotFound(b)) => a == b,
            (Self::InvalidArgument(a), Self::InvalidArgument(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

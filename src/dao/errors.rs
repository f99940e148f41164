//! Data access errors

use thiserror::Error;

/// Result type for data access operations
pub type DaoResult<T> = Result<T, DaoError>;

/// Data access errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DaoError {
    /// No document matched the query
    #[error("Card not found")]
    NotFound,

    /// Transport or query failure reported by the store
    #[error("{0}")]
    Store(String),
}

impl DaoError {
    /// Store error from any displayable source
    pub fn store(msg: impl Into<String>) -> Self {
        DaoError::Store(msg.into())
    }

    /// Whether this is a miss rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, DaoError::NotFound)
    }
}

impl From<mongodb::error::Error> for DaoError {
    fn from(err: mongodb::error::Error) -> Self {
        DaoError::Store(err.to_string())
    }
}

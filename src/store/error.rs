use crate::customer::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid customer: {0}")]
    Invalid(#[from] ValidationError),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Malformed filter query parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown age group: {0}")]
    AgeGroup(String),

    #[error("unknown gender: {0}")]
    Gender(String),

    #[error("cluster must be an integer, got {0}")]
    Cluster(String),
}

//! Error types shared by the loaders, the store seam and the resolvers.

use thiserror::Error;

/// Failure reported by a data store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store connection error: {0}")]
    Connection(String),

    /// The store was reached but the query failed.
    #[error("store query error: {0}")]
    Query(String),
}

/// Error recorded for a single key by a [`Loader`](crate::Loader).
///
/// Load errors are cached alongside successful values, so they must be cheap to clone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("batch query failed: {0}")]
    Query(String),

    /// The owning request was cancelled before the value was loaded.
    #[error("request cancelled")]
    Cancelled,

    #[error("loader worker terminated")]
    WorkerTerminated,
}

impl From<StoreError> for LoadError {
    fn from(e: StoreError) -> Self {
        LoadError::Query(e.to_string())
    }
}

pub type LoadResult<V> = Result<Option<V>, LoadError>;

/// Error surfaced on a single GraphQL field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("failed to load proposal tally result: {0}")]
    TallyResult(#[source] LoadError),

    #[error("failed to load proposals: {0}")]
    Proposals(#[source] StoreError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Query(#[from] StoreError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Invalid or missing configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

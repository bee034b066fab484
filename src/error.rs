use thiserror::Error;

use crate::domain::collection::Collection;
use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("the {} with the given ID does not exist: {id}", collection.singular())]
    NotFound { collection: Collection, id: String },

    #[error("transaction aborted: {0}")]
    TransactionFailure(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl Error {
    /// Shorthand for a missing entity in `collection`.
    pub fn not_found(collection: Collection, id: impl ToString) -> Self {
        Error::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    /// True for errors detected before any mutation (bad input, unknown id).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Domain(_) | Error::NotFound { .. })
    }
}

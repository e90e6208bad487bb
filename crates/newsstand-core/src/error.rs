//! Core error types.

use thiserror::Error;

/// Errors raised while turning request parameters into a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A request field has no entry in the mapping set.
    #[error("no field mapping for `{0}`")]
    UnknownField(String),

    /// A mapping descriptor could not be interpreted.
    #[error("bad field mapping for `{field}`: {reason}")]
    MalformedDescriptor {
        /// Logical field name the descriptor was attached to.
        field: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl MappingError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MappingError::MalformedDescriptor {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors reported by a query executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The store rejected or failed the query.
    #[error("query error: {0}")]
    Query(String),

    /// A returned row did not match the expected record shape.
    #[error("failed to decode column `{column}`: {message}")]
    Decode {
        /// Column that failed to decode.
        column: String,
        /// Decoder message.
        message: String,
    },

    /// The store did not answer in time.
    #[error("query timed out")]
    Timeout,
}

/// Errors surfaced by the market service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Request parameters did not match the mapping set.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

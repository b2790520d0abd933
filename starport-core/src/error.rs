//! Error types for Starport core.

use std::{error::Error, fmt};

/// Error type for Starport core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarportError {
    /// The request carried a malformed identifier, field, or parameter.
    InvalidRequest(String),
    /// The targeted record does not exist.
    NotFound,
    /// The record store failed.
    Store(String),
}

impl fmt::Display for StarportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "{message}"),
            Self::NotFound => write!(f, "ship not found"),
            Self::Store(message) => write!(f, "store error: {message}"),
        }
    }
}

impl Error for StarportError {}

/// Convenience result type for Starport core.
pub type Result<T> = std::result::Result<T, StarportError>;

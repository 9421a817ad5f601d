// fewlot-model - Error types for the Few/Lot data model
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for data-model operations.

use std::fmt;

/// Result type for data-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or accessing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Index past the end of a Few or array
    IndexOutOfRange { index: usize, length: usize },
    /// Head/tail access on the empty Lot
    EmptyAccess { operation: &'static str },
    /// Out-of-domain argument (date/time fields, lengths)
    InvalidArgument {
        what: &'static str,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, length } => {
                write!(
                    f,
                    "Index {} out of range for aggregate of length {}",
                    index, length
                )
            }
            Error::EmptyAccess { operation } => {
                write!(f, "Cannot take {} of the empty lot", operation)
            }
            Error::InvalidArgument { what, message } => {
                write!(f, "Invalid {}: {}", what, message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create an index-out-of-range error.
    pub fn index(index: usize, length: usize) -> Self {
        Error::IndexOutOfRange { index, length }
    }

    /// Create an empty-access error for the named operation.
    pub fn empty_access(operation: &'static str) -> Self {
        Error::EmptyAccess { operation }
    }

    /// Create an invalid-argument error.
    pub fn invalid(what: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            what,
            message: message.into(),
        }
    }
}

// fewlot-core - Error types for traversals and the binary codec
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for fewlot-core.

use std::fmt;

/// Result type for fewlot-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Decode met a leading byte that is not a known tag
    UnknownTag(u8),
    /// Encode met a value kind outside the codec's supported set
    UnsupportedType(&'static str),
    /// Decode met corrupt input
    MalformedBinary(String),
    /// A data-model operation failed
    Model(fewlot_model::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownTag(tag) => {
                write!(f, "Unknown tag byte 0x{:02x}", tag)
            }
            Error::UnsupportedType(kind) => {
                write!(f, "Cannot encode value of type {}", kind)
            }
            Error::MalformedBinary(message) => {
                write!(f, "Malformed binary input: {}", message)
            }
            Error::Model(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<fewlot_model::Error> for Error {
    fn from(err: fewlot_model::Error) -> Self {
        Error::Model(err)
    }
}

impl Error {
    /// Create a malformed-binary error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedBinary(message.into())
    }

    /// The error used whenever the input ends before a datum is complete.
    pub fn truncated() -> Self {
        Error::MalformedBinary("unexpected end of input".to_string())
    }
}

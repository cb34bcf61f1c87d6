// klujur-seq - Error types for lazy sequences
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for sequence operations.
//!
//! Every error is raised synchronously by the call that forces the failing
//! part of a sequence. Nothing is deferred into later traversal.

use thiserror::Error;

/// Result type for sequence operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or forcing a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `first` called on the empty sequence
    #[error("first called on an empty sequence")]
    EmptySequence,
    /// `nth` beyond the end of the sequence, or with a negative index
    #[error("index {index} out of range for sequence")]
    IndexOutOfRange { index: i64 },
    /// Malformed construction input (empty text, bad offset, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Operation not supported for the element shape
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// Failure raised by a user-supplied rest producer
    #[error("{0}")]
    EvalError(String),
    /// Internal error - invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an index error for the caller's original index.
    pub fn index(index: i64) -> Self {
        Error::IndexOutOfRange { index }
    }

    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedOperation(message.into())
    }

    /// Create an evaluation error, for use inside rest producers.
    pub fn eval(message: impl Into<String>) -> Self {
        Error::EvalError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::EmptySequence.to_string(),
            "first called on an empty sequence"
        );
        assert_eq!(
            Error::index(-3).to_string(),
            "index -3 out of range for sequence"
        );
        assert_eq!(
            Error::invalid("text is empty").to_string(),
            "invalid argument: text is empty"
        );
        assert_eq!(Error::eval("boom").to_string(), "boom");
    }
}

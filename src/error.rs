//! Error types for EDN encoding and decoding.
//!
//! Every decode error carries the 1-based line and column of the character
//! that triggered it, counted across all chunks fed to a [`Decoder`].
//!
//! ## Error Categories
//!
//! - **Unbalanced delimiters**: a closer with no matching opener, or
//!   collections still open when input ends
//! - **Unexpected end of input**: input stopped inside a string or before a
//!   tag received its value
//! - **Invalid escapes and timestamps**: malformed string escapes and
//!   `#inst` values
//! - **Serde errors**: raised while bridging Rust types to and from
//!   [`EdnValue`](crate::EdnValue)
//!
//! Decoding does not resynchronise after an error. A failed decoder keeps
//! reporting the same error and should be discarded.
//!
//! ## Examples
//!
//! ```rust
//! use serde_edn::{decode_one, Error};
//!
//! let result = decode_one("[1 2");
//! assert!(matches!(result, Err(Error::UnbalancedDelimiter { .. })));
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//! }
//! ```
//!
//! [`Decoder`]: crate::Decoder

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding EDN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A closing delimiter without a matching opener, or an opener never closed
    #[error("Unbalanced delimiter at line {line}, column {col}: {msg}")]
    UnbalancedDelimiter { line: usize, col: usize, msg: String },

    /// Input ended in the middle of a form
    #[error("Unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// Unrecognised character after a backslash inside a string
    #[error("Invalid escape sequence `\\{escape}` at line {line}, column {col}")]
    InvalidEscape { line: usize, col: usize, escape: char },

    /// `#inst` applied to something that is not a timestamp string
    #[error("Invalid #inst value {value} at line {line}, column {col}: {reason}")]
    InvalidTimestamp {
        line: usize,
        col: usize,
        value: String,
        reason: String,
    },

    /// Structurally invalid input
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// The input contained no value at all
    #[error("Empty document: expected a value")]
    EmptyDocument,

    /// A keyword, symbol or tag name that cannot be represented
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unbalanced-delimiter error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::Error;
    ///
    /// let err = Error::unbalanced(3, 7, "unexpected `]`");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn unbalanced(line: usize, col: usize, msg: &str) -> Self {
        Error::UnbalancedDelimiter {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Creates an invalid-escape error for the character following `\`.
    pub fn invalid_escape(line: usize, col: usize, escape: char) -> Self {
        Error::InvalidEscape { line, col, escape }
    }

    /// Creates an invalid-timestamp error.
    ///
    /// `value` is the rendered argument that `#inst` received.
    pub fn invalid_timestamp(line: usize, col: usize, value: &str, reason: &str) -> Self {
        Error::InvalidTimestamp {
            line,
            col,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a syntax error with line and column information.
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid-name error.
    pub fn invalid_name(msg: &str) -> Self {
        Error::InvalidName(msg.to_string())
    }

    /// Creates an unsupported type error for types that have no EDN form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader and writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the `(line, column)` a decode error points at, if any.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::UnbalancedDelimiter { line, col, .. }
            | Error::UnexpectedEof { line, col, .. }
            | Error::InvalidEscape { line, col, .. }
            | Error::InvalidTimestamp { line, col, .. }
            | Error::Syntax { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

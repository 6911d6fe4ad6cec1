//! Error types for stream encoding.
//!
//! ## Error Categories
//!
//! - **Integrity**: a packed property table has the wrong length. Raised while
//!   the tables are loaded; the process-wide table turns this into a panic.
//! - **Type resolution**: the type serializer does not know, or refuses, the
//!   runtime type of an instance.
//! - **Encoding**: a value has no representation on the wire, or a long's text
//!   form cannot be decoded.
//! - **Session**: a stream is finalized after one of its writes failed.
//!
//! Errors raised by a [`TypeSerializer`](crate::TypeSerializer) are returned
//! to the caller unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::Error;
//!
//! let err = Error::unknown_type("com.example.Missing");
//! assert!(err.to_string().contains("com.example.Missing"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a stream.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A packed property table does not hold the expected number of units.
    #[error("Property table `{table}` is corrupt: expected {expected} packed units, found {found}")]
    Integrity {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    /// No signature is known for a runtime type
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// The type is known but must not cross the wire
    #[error("Type is not allowed on the wire: {0}")]
    DisallowedType(String),

    /// An instance was handed to a field writer registered for another type
    #[error("Instance is not a {0}")]
    TypeMismatch(String),

    /// An object was written on a stream without a type serializer
    #[error("No type serializer attached to the stream")]
    NoTypeSerializer,

    /// Malformed text form of a 64-bit integer
    #[error("Invalid long encoding: {0:?}")]
    InvalidLong(String),

    /// Value with no wire representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The stream was finalized after a failed write
    #[error("Stream cannot be finalized after a failed write")]
    SessionFailed,

    /// IO error while writing the finished stream
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    pub fn integrity(table: &'static str, expected: usize, found: usize) -> Self {
        Error::Integrity {
            table,
            expected,
            found,
        }
    }

    pub fn unknown_type(type_name: &str) -> Self {
        Error::UnknownType(type_name.to_string())
    }

    pub fn disallowed_type(type_name: &str) -> Self {
        Error::DisallowedType(type_name.to_string())
    }

    pub fn type_mismatch(type_name: &str) -> Self {
        Error::TypeMismatch(type_name.to_string())
    }

    pub fn invalid_long(text: &str) -> Self {
        Error::InvalidLong(text.to_string())
    }

    /// Creates an unsupported type error for values that cannot be encoded.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_rpcjson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

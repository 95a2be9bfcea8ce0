//! Error types for OxiSar operations.
//!
//! A single error enum covers every failure the codec stack can raise:
//! container validation, cursor bounds, decompression invariants and
//! schema resolution.

use thiserror::Error;

/// The main error type for OxiSar operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SarError {
    /// The container is not a valid Symbol Art file (bad magic, bad flag,
    /// truncated header, unrepresentable layer count).
    #[error("Invalid format: {message}")]
    Format {
        /// Description of the format error.
        message: String,
    },

    /// A cursor read or seek went past the buffer bounds.
    #[error("Out of range: {requested} bytes at position {position} on buffer of length {length}")]
    OutOfRange {
        /// Cursor position when the access was attempted.
        position: usize,
        /// Requested width (for reads) or target offset (for seeks).
        requested: isize,
        /// Logical buffer length.
        length: usize,
    },

    /// The compressed stream violates a decompressor invariant.
    #[error("Decode error at input offset {offset}: {message}")]
    Decode {
        /// Input byte offset where the violation was detected.
        offset: usize,
        /// Description of the violation.
        message: String,
    },

    /// A schema referenced a type name absent from the active registry.
    #[error("Unknown schema type: {name}")]
    UnknownSchemaType {
        /// The unresolved type name.
        name: String,
    },

    /// A parsed schema value did not have the shape its consumer expected.
    #[error("Schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch {
        /// The expected value kind.
        expected: String,
        /// The value kind actually produced.
        found: String,
    },
}

/// Result type alias for OxiSar operations.
pub type Result<T> = std::result::Result<T, SarError>;

impl SarError {
    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(position: usize, requested: isize, length: usize) -> Self {
        Self::OutOfRange {
            position,
            requested,
            length,
        }
    }

    /// Create a decode error.
    pub fn decode(offset: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            offset,
            message: message.into(),
        }
    }

    /// Create an unknown schema type error.
    pub fn unknown_schema_type(name: impl Into<String>) -> Self {
        Self::UnknownSchemaType { name: name.into() }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Whether this error came from a cursor bounds check.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

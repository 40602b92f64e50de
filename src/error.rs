//! Error types for the `ucdage` crate.
//!
//! Every error is fatal at this layer: a run either produces a complete
//! artifact or nothing at all.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum AgeError {
    /// An I/O failure while reading the source or writing the artifact.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The header line carries no `<name>-<major>.<minor>.<patch>.<ext>` token.
    #[error("Cannot determine UCD version of {}: no `{fragment}-X.Y.Z.{ext}` token on the first line", .path.display())]
    MissingVersion {
        path: PathBuf,
        fragment: String,
        ext: String,
    },

    /// A line shaped like a record whose payload does not follow the record grammar.
    #[error("Malformed record on line {line_no}: {reason}: {line:?}")]
    MalformedRecord {
        line_no: usize,
        line: String,
        reason: String,
    },

    /// A span field does not fit the width the binary record reserves for it.
    #[error("Value {value} of field `{field}` exceeds its encoded maximum {max}")]
    Range {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// A byte table whose length is not a whole number of records.
    #[error("Invalid table: {len} bytes is not a multiple of the {record_size}-byte record size")]
    Format { len: usize, record_size: usize },

    /// The JSON manifest could not be serialized.
    #[error("Manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A staged output could not be moved into place.
    #[error("Failed to persist {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AgeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AgeError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        AgeError::MalformedRecord {
            line_no,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// A convenience `Result` type alias using the crate's [`AgeError`] type.
pub type Result<T> = std::result::Result<T, AgeError>;

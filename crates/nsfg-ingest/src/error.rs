//! Error types for NSFG data ingestion.

use std::path::PathBuf;
use thiserror::Error;

use nsfg_model::ModelError;

/// Errors that can occur while loading NSFG files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Dictionary Errors ===
    /// Dictionary entry declares a storage type we cannot map.
    #[error("unknown variable type '{kind}' on dictionary line {line}")]
    UnknownType { kind: String, line: usize },

    /// `_column(n)` entry without the expected type, name, and format tokens.
    #[error("malformed dictionary line {line}: {text}")]
    MalformedDictionaryLine { line: usize, text: String },

    /// `_column(n)` entries must start at strictly increasing columns.
    #[error("dictionary line {line}: column {start} does not follow column {previous}")]
    UnorderedColumn {
        line: usize,
        start: usize,
        previous: usize,
    },

    /// Dictionary contains no `_column` entries.
    #[error("dictionary has no variables")]
    EmptyDictionary,

    // === Fixed-Width Errors ===
    /// A numeric field could not be parsed.
    #[error("invalid value '{value}' for {column} on data line {line}")]
    FieldParse {
        line: usize,
        column: String,
        value: String,
    },

    // === DataFrame Errors ===
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Column value outside the domain the model accepts.
    #[error("invalid {column} value '{value}' in row {row}")]
    InvalidValue {
        column: String,
        value: String,
        row: usize,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IngestError {
    /// Maps an I/O error on `path` to `FileNotFound` or `FileRead`.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

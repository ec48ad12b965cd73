//! Error types for catalog conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a catalog between JSON and CSV.
///
/// Only file-level failures surface here; per-field coercion problems are
/// handled by degrading the affected cell or field, never by erroring.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Failed to read an input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input JSON did not parse.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Output JSON could not be serialized.
    #[error("failed to serialize JSON for {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input CSV could not be read or parsed.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Output CSV could not be written.
    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

//! Parser errors.

use thiserror::Error;
use wd_core::CoreError;

/// Result type for parser operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised while turning uploaded bytes into tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// A required shapefile sidecar is absent.
    #[error("Shapefile set is missing the .{extension} file")]
    MissingComponent { extension: &'static str },

    /// The same sidecar extension was uploaded twice.
    #[error("Shapefile set has more than one .{extension} file")]
    DuplicateComponent { extension: String },

    /// A file in the set is not a shapefile component.
    #[error("Not a shapefile component: {file_name}")]
    UnexpectedComponent { file_name: String },

    #[error("Unsupported geometry type: {what}")]
    UnsupportedGeometry { what: String },

    #[error("Sheet not found: {sheet}")]
    MissingSheet { sheet: String },

    #[error("Sheet {sheet} has no header row")]
    EmptySheet { sheet: String },

    #[error("LAS section ~{section} is missing")]
    MissingSection { section: &'static str },

    #[error("LAS {section} section, line {line}: {message}")]
    Malformed {
        section: &'static str,
        line: usize,
        message: String,
    },

    /// Parser crate error.
    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

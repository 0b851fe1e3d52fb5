//! Error types for the wd-app service layer.

use wd_core::DatasetKind;
use wd_formats::FormatError;

/// Application error type that wraps errors from the backend crates and
/// gives both front ends a single error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please load {what} to begin")]
    NotLoaded { what: &'static str },

    #[error("{input}: {source}")]
    Parse { input: String, source: FormatError },

    #[error("Upload rejected: {0}")]
    InvalidUpload(String),

    #[error("{dataset} has no column named {column}")]
    MissingColumn { dataset: DatasetKind, column: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] wd_core::CoreError),

    #[error("Session error: {0}")]
    Session(#[from] wd_session::SessionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for wd-app operations.
pub type AppResult<T> = Result<T, AppError>;

/// How a page presents an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected before an upload; shown as a prompt.
    NotYetLoaded,
    ParseFailure,
    InvalidUpload,
    Configuration,
    /// Lookup of a session that no longer exists.
    Internal,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::NotLoaded { .. } => ErrorCategory::NotYetLoaded,
            AppError::Parse { .. } | AppError::MissingColumn { .. } | AppError::Data(_) => {
                ErrorCategory::ParseFailure
            }
            AppError::InvalidUpload(_) => ErrorCategory::InvalidUpload,
            AppError::Config(_) | AppError::Io(_) => ErrorCategory::Configuration,
            AppError::Session(_) => ErrorCategory::Internal,
        }
    }

    pub(crate) fn parse(input: impl Into<String>, source: FormatError) -> Self {
        AppError::Parse {
            input: input.into(),
            source,
        }
    }
}

// Conversions from backend error types
impl From<wd_config::ConfigError> for AppError {
    fn from(err: wd_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<wd_config::ValidationError> for AppError {
    fn from(err: wd_config::ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_the_taxonomy() {
        assert_eq!(
            AppError::NotLoaded { what: "a LAS file" }.category(),
            ErrorCategory::NotYetLoaded
        );
        let parse = AppError::parse(
            "blocks",
            FormatError::MissingComponent { extension: "dbf" },
        );
        assert_eq!(parse.category(), ErrorCategory::ParseFailure);
        assert_eq!(parse.to_string(), "blocks: Shapefile set is missing the .dbf file");
        assert_eq!(
            AppError::InvalidUpload("x".into()).category(),
            ErrorCategory::InvalidUpload
        );
    }
}

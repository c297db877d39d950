use std::io;

use thiserror::Error;

/// Library-wide error type for tunnelstack operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// One or more required environment variables are absent.
    ///
    /// Always carries the full batch of missing names, never just the first.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    /// A required template file does not exist at the resolved path.
    #[error("Template file not found for {slot}: {path}")]
    TemplateNotFound { slot: String, path: String },

    /// A required template file exists but is empty.
    #[error("Template file for {slot} is empty: {path}")]
    EmptyTemplate { slot: String, path: String },

    /// Template tree already exists at the target location.
    #[error("Template tree already exists. Remove it or run init in a clean directory.")]
    ScaffoldExists,

    /// Embedded scaffold asset missing or unreadable.
    #[error("Missing scaffold asset: {0}")]
    ScaffoldAssetMissing(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// JSON serialization error during stack synthesis.
    #[error("Failed to serialize stack document: {0}")]
    StackSerialization(#[from] serde_json::Error),
}

impl AppError {
    pub(crate) fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting exit-code mapping.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::MissingEnvVars(_)
            | AppError::EmptyTemplate { .. }
            | AppError::ParseError { .. }
            | AppError::Configuration(_)
            | AppError::StackSerialization(_) => io::ErrorKind::InvalidInput,
            AppError::TemplateNotFound { .. } | AppError::ScaffoldAssetMissing(_) => {
                io::ErrorKind::NotFound
            }
            AppError::ScaffoldExists => io::ErrorKind::AlreadyExists,
        }
    }
}

//! Custom error types for mod translation

use thiserror::Error;

/// Errors raised while translating mod archives
#[derive(Error, Debug)]
pub enum ModTranslatorError {
    /// Malformed or missing configuration
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What was wrong with the configuration
        message: String,
    },

    /// Archive could not be opened or extracted
    #[error("Cannot read archive {path}: {message}")]
    ArchiveReadError {
        /// Archive path
        path: String,
        /// Underlying failure
        message: String,
    },

    /// Archive could not be created or written
    #[error("Cannot write archive {path}: {message}")]
    ArchiveWriteError {
        /// Archive path
        path: String,
        /// Underlying failure
        message: String,
    },

    /// A `.lang` line without a `=` separator
    #[error("Malformed line {line_number}: '{line}' has no '=' separator")]
    MalformedLineError {
        /// 1-based line number
        line_number: usize,
        /// The offending line, trimmed
        line: String,
    },

    /// Resource content that is not a flat string object
    #[error("Invalid resource format: {message}")]
    InvalidFormat {
        /// What was wrong with the content
        message: String,
    },

    /// Translation provider failure
    #[error("Translation service error: {message}")]
    TranslationServiceError {
        /// Provider failure description
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        /// Path involved
        path: String,
        /// Underlying failure
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ModTranslatorError {
    /// Wrap an I/O failure with the path it happened on
    pub fn file(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        ModTranslatorError::FileError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for ModTranslatorError {
    fn from(err: config::ConfigError) -> Self {
        ModTranslatorError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for mod translation operations
pub type Result<T> = std::result::Result<T, ModTranslatorError>;

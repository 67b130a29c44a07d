//! Runtime error types

use thiserror::Error;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing, submitting or watching a build
#[derive(Error, Debug)]
pub enum Error {
    /// The build pipeline definition is missing or unusable
    #[error("invalid build pipeline {path}: {message}")]
    Pipeline {
        /// Pipeline file
        path: String,
        /// What went wrong
        message: String,
    },

    /// A field needed for a substitution is absent from the configuration
    #[error("configuration field '{path}' is required for deployment")]
    MissingField {
        /// Dotted path of the field
        path: String,
    },

    /// An external command failed
    #[error("{program} failed: {message}")]
    Command {
        /// Program that was run
        program: String,
        /// Error message
        message: String,
        /// Captured stderr output
        stderr: Option<String>,
    },

    /// The build service answered with something unreadable
    #[error("unexpected build service response: {0}")]
    Response(String),

    /// The build finished without succeeding
    #[error("build {build_id} finished with status {status}")]
    BuildFailed {
        /// Build identifier
        build_id: String,
        /// Terminal status
        status: String,
    },

    /// Conversion before the build failed
    #[error(transparent)]
    Codegen(#[from] lzconfig_codegen::Error),

    /// Validation before the build failed
    #[error(transparent)]
    Core(#[from] lzconfig_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

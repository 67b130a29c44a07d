//! Error types for transpilation and conversion

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while transpiling or converting a document
#[derive(Error, Debug)]
pub enum Error {
    /// Loading, validating or resolving the document failed
    #[error(transparent)]
    Core(#[from] lzconfig_core::Error),

    /// A node the transpiler walks has the wrong structural kind
    #[error("unexpected shape at '{path}': expected {expected}")]
    UnexpectedShape {
        /// Dotted path of the offending node
        path: String,
        /// What the transpiler needed to find there
        expected: &'static str,
    },

    /// A composite value could not be rendered
    #[error("failed to render variable: {0}")]
    Render(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::UnexpectedShape`]
    pub fn shape(path: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedShape {
            path: path.into(),
            expected,
        }
    }
}

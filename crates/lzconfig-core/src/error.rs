//! Error types for lzconfig-core

use std::fmt;

use thiserror::Error;

/// Result type alias for lzconfig-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lzconfig-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration document could not be found
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path that was read
        path: String,
    },

    /// Configuration document exists but is not valid YAML
    #[error("invalid YAML in {path}: {source}")]
    Malformed {
        /// Path of the offending document
        path: String,
        /// Underlying parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// A schema constraint was violated
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The landing zone type is not one this tool knows about
    #[error("unsupported landing zone type: {lz_type}")]
    UnsupportedType {
        /// The declared or overridden type
        lz_type: String,
    },

    /// Neither the document nor the caller supplied a landing zone type
    #[error("landing zone type not specified: set landing_zone.type or pass an explicit type")]
    UnderspecifiedType,

    /// No schema is registered under this type name
    #[error("no schema registered for landing zone type '{lz_type}'")]
    NotRegistered {
        /// Requested type name
        lz_type: String,
    },

    /// Base schema type enumeration and registered schemas disagree
    #[error("schema registry is inconsistent: {message}")]
    RegistryMismatch {
        /// Description of the mismatch
        message: String,
    },

    /// A schema pattern failed to compile
    #[error("invalid schema pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern source
        pattern: String,
        /// Regex compiler message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One step on the way from the document root to a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key
    Field(String),
    /// Sequence index
    Index(usize),
}

impl PathSegment {
    /// Shorthand for a field segment
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The first schema violation found in a document.
///
/// Validation is fail-fast, so there is never more than one of these per
/// call. `path` lists the keys and indices walked from the root, in
/// traversal order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation error in {}: {message}", display_path(.path))]
pub struct ValidationError {
    /// Location of the offending node
    pub path: Vec<PathSegment>,
    /// Which constraint failed
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Path rendered as `a -> b -> 0`, or `(root)` when empty
    pub fn path_string(&self) -> String {
        display_path(&self.path)
    }

    /// Path rendered with dots, e.g. `bootstrap.org_id`
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn display_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "(root)".to_string();
    }
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(
            vec![PathSegment::field("bootstrap"), PathSegment::field("org_id")],
            "'12345' does not match '\\d{12}'",
        );
        assert_eq!(
            err.to_string(),
            "validation error in bootstrap -> org_id: '12345' does not match '\\d{12}'"
        );
        assert_eq!(err.dotted_path(), "bootstrap.org_id");
    }

    #[test]
    fn test_root_path_display() {
        let err = ValidationError::new(vec![], "null is not of type 'object'");
        assert_eq!(err.path_string(), "(root)");
    }

    #[test]
    fn test_index_segment_display() {
        let err = ValidationError::new(
            vec![
                PathSegment::field("environments"),
                PathSegment::Index(2),
                PathSegment::field("name"),
            ],
            "bad",
        );
        assert_eq!(err.path_string(), "environments -> 2 -> name");
    }
}

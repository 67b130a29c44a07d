//! Type-specific reshaping of configuration documents
//!
//! Each transform appends its variables to a [`VariableSet`](crate::variables::VariableSet) in a fixed
//! order. Transforms only read the document.

pub mod environment;
pub mod gcp;
pub mod pbmm;

pub use environment::EnvironmentSlice;
pub use gcp::GcpTransform;
pub use pbmm::PbmmTransform;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Borrow `value` as a mapping or report an unexpected shape at `path`
pub(crate) fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| Error::shape(path, "a mapping"))
}

/// Borrow `value` as a sequence or report an unexpected shape at `path`
pub(crate) fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::shape(path, "a sequence"))
}

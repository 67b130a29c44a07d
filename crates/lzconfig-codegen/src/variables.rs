//! Ordered variable assignments and their tfvars rendering
//!
//! A [`VariableSet`] is what the transpiler produces and what the converter
//! writes. Order is significant: the rendered file lists assignments exactly
//! in the order they were pushed.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// A value as it will be written to the variable file
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedValue {
    /// Emitted as a double-quoted literal
    Scalar(String),
    /// Emitted as pretty-printed JSON starting on the assignment line
    Composite(Value),
}

impl RenderedValue {
    /// Classify `value`: mappings and sequences are composite, everything
    /// else becomes scalar text
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) | Value::Array(_) => Self::Composite(value),
            Value::String(text) => Self::Scalar(text),
            Value::Null => Self::Scalar(String::new()),
            other => Self::Scalar(other.to_string()),
        }
    }

    /// Whether this value renders as embedded structured text
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    fn render(&self) -> Result<String> {
        match self {
            Self::Scalar(text) => Ok(format!("\"{}\"", escape(text))),
            Self::Composite(value) => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// One `name = value` line
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Variable name
    pub name: String,
    /// Value to assign
    pub value: RenderedValue,
}

/// Ordered sequence of variable assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableSet {
    assignments: Vec<Assignment>,
}

impl VariableSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name = value`.
    ///
    /// Assigning a name that is already present replaces its value in place.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let value = RenderedValue::from_value(value);
        match self.assignments.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.assignments.push(Assignment { name, value }),
        }
    }

    /// Look up an assignment by name
    pub fn get(&self, name: &str) -> Option<&RenderedValue> {
        self.assignments
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Assignments in output order
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    /// Variable names in output order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|a| a.name.as_str())
    }

    /// Number of assignments
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the set has no assignments
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Render the set as tfvars text, one assignment per line
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        for assignment in &self.assignments {
            out.push_str(&assignment.name);
            out.push_str(" = ");
            out.push_str(&assignment.value.render()?);
            out.push('\n');
        }
        Ok(out)
    }

    /// SHA-256 of the rendered text, hex encoded
    pub fn content_hash(&self) -> Result<String> {
        Ok(hash_text(&self.render()?))
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

pub(crate) fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

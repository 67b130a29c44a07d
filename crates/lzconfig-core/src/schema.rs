//! Schema tree
//!
//! Schemas are built once, at startup, from small constructors and then
//! shared read-only by every validation. Only the constraint shapes the
//! landing zone schemas actually use are modelled:
//!
//! - `object` with required fields, named properties and an optional
//!   constraint for unlisted properties
//! - `array` with an item schema and an optional minimum length
//! - `string` with an optional full-match pattern, allowed-value set and
//!   named format
//! - `boolean`
//!
//! # Example
//!
//! ```rust,ignore
//! use lzconfig_core::schema::{ObjectSchema, Schema, StringSchema};
//!
//! let schema: Schema = ObjectSchema::new()
//!     .require(["org_id"])
//!     .property("org_id", StringSchema::new().pattern(r"\d{12}")?)
//!     .into();
//! ```

use regex::Regex;

use crate::error::{Error, Result};

/// A node in the schema tree
#[derive(Debug, Clone)]
pub enum Schema {
    /// Mapping with named children
    Object(ObjectSchema),
    /// Sequence of homogeneous items
    Array(ArraySchema),
    /// String scalar
    String(StringSchema),
    /// Boolean scalar
    Boolean,
}

impl Schema {
    /// Name of the node kind, as used in type-mismatch messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String(_) => "string",
            Self::Boolean => "boolean",
        }
    }

    /// Follow object properties by name
    ///
    /// Returns `None` as soon as a step is not an object or does not name
    /// the requested property.
    pub fn property_path(&self, path: &[&str]) -> Option<&Schema> {
        path.iter().try_fold(self, |node, name| match node {
            Self::Object(object) => object.property_schema(name),
            _ => None,
        })
    }
}

/// Mapping constraints
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    required: Vec<String>,
    properties: Vec<(String, Schema)>,
    additional_properties: Option<Box<Schema>>,
}

impl ObjectSchema {
    /// An object schema with no constraints yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Add names that must be present
    pub fn require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a named property; a later declaration replaces an earlier one
    pub fn property(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = name.into();
        let schema = schema.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = schema,
            None => self.properties.push((name, schema)),
        }
        self
    }

    /// Constraint applied to every field not declared with [`property`](Self::property)
    pub fn additional_properties(mut self, schema: impl Into<Schema>) -> Self {
        self.additional_properties = Some(Box::new(schema.into()));
        self
    }

    /// Required names, in declaration order
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    /// Declared properties, in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.properties.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Schema for one declared property
    pub fn property_schema(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Constraint for undeclared fields, if any
    pub fn additional(&self) -> Option<&Schema> {
        self.additional_properties.as_deref()
    }
}

/// Sequence constraints
#[derive(Debug, Clone)]
pub struct ArraySchema {
    items: Box<Schema>,
    min_items: Option<usize>,
}

impl ArraySchema {
    /// A sequence whose every element must satisfy `items`
    pub fn of(items: impl Into<Schema>) -> Self {
        Self {
            items: Box::new(items.into()),
            min_items: None,
        }
    }

    /// Require at least `count` elements
    pub fn min_items(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self
    }

    /// Element schema
    pub fn items(&self) -> &Schema {
        &self.items
    }

    /// Minimum length, if declared
    pub fn min_len(&self) -> Option<usize> {
        self.min_items
    }
}

/// Named string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// `local@domain.tld`
    Email,
}

impl StringFormat {
    /// Format name as written in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
        }
    }
}

/// A compiled full-match regular expression
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` so that it must match the whole string
    pub fn new(source: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| Error::InvalidPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the entire `value` matches
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// String constraints
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    pattern: Option<Pattern>,
    allowed: Option<Vec<String>>,
    format: Option<StringFormat>,
}

impl StringSchema {
    /// Any string
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the whole value to match `source`
    pub fn pattern(mut self, source: &str) -> Result<Self> {
        self.pattern = Some(Pattern::new(source)?);
        Ok(self)
    }

    /// Restrict the value to a fixed set
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Require a named format
    pub fn format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Declared pattern
    pub fn pattern_ref(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Declared allowed values
    pub fn allowed(&self) -> Option<&[String]> {
        self.allowed.as_deref()
    }

    /// Declared format
    pub fn format_ref(&self) -> Option<StringFormat> {
        self.format
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Self::Object(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Self::Array(schema)
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        Self::String(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_full_match() {
        let pattern = Pattern::new(r"\d+\.\d+").unwrap();
        assert!(pattern.is_match("1.0"));
        assert!(!pattern.is_match("v1.0"));
        assert!(!pattern.is_match("1.0.1"));
    }

    #[test]
    fn test_pattern_alternation_is_anchored_as_a_group() {
        let pattern = Pattern::new("byol|payg").unwrap();
        assert!(pattern.is_match("payg"));
        assert!(!pattern.is_match("byolx"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = StringSchema::new().pattern("[unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_property_redeclaration_replaces() {
        let schema = ObjectSchema::new()
            .property("a", StringSchema::new())
            .property("a", Schema::Boolean);
        assert_eq!(schema.properties().count(), 1);
        assert_eq!(schema.property_schema("a").unwrap().kind(), "boolean");
    }

    #[test]
    fn test_property_path() {
        let schema: Schema = ObjectSchema::new()
            .property(
                "landing_zone",
                ObjectSchema::new().property("type", StringSchema::new().one_of(["gcp"])),
            )
            .into();

        let leaf = schema.property_path(&["landing_zone", "type"]).unwrap();
        match leaf {
            Schema::String(s) => assert_eq!(s.allowed().unwrap().to_vec(), vec!["gcp".to_string()]),
            other => panic!("Expected string schema, got {}", other.kind()),
        }
        assert!(schema.property_path(&["landing_zone", "type", "deeper"]).is_none());
    }
}

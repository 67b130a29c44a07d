//! Schema validation
//!
//! [`validate`] walks one document node against one schema and stops at the
//! first violation. [`validate_config`] is the two-phase gate every
//! configuration passes through: the base schema first, then the schema
//! registered for the document's declared landing zone type.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

use crate::document::Document;
use crate::error::{Error, PathSegment, Result, ValidationError};
use crate::registry::Registry;
use crate::schema::{ArraySchema, ObjectSchema, Schema, StringFormat, StringSchema};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Longest value rendering included in a message before it is elided
const MAX_DESCRIBE_LEN: usize = 60;

/// Validate `value` against `schema`, reporting the first violation
pub fn validate(value: &Value, schema: &Schema) -> std::result::Result<(), ValidationError> {
    let mut path = Vec::new();
    validate_node(value, schema, &mut path)
}

/// Validate a whole configuration document.
///
/// Runs the registry's base schema, then looks up the schema registered
/// for `landing_zone.type` and runs that. A base-schema failure is returned
/// without consulting the registry.
pub fn validate_config(document: &Document, registry: &Registry) -> Result<()> {
    validate(document.root(), registry.base())?;

    let lz_type = document
        .landing_zone_type()
        .ok_or_else(|| Error::UnsupportedType {
            lz_type: "(none)".to_string(),
        })?;

    let schema = registry
        .lookup(lz_type)
        .map_err(|_| Error::UnsupportedType {
            lz_type: lz_type.to_string(),
        })?;

    validate(document.root(), schema)?;
    Ok(())
}

/// Loads and validates configuration files against a fixed registry
#[derive(Debug)]
pub struct ConfigValidator {
    registry: Registry,
}

impl ConfigValidator {
    /// Validator backed by `registry`
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Validator backed by the built-in schemas
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Registry::builtin()?))
    }

    /// The registry in use
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate an already-loaded document
    pub fn validate_config(&self, document: &Document) -> Result<()> {
        validate_config(document, &self.registry)
    }

    /// Load `path` and validate it, returning the document on success
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let document = Document::load(path)?;
        self.validate_config(&document)?;
        Ok(document)
    }
}

fn validate_node(
    value: &Value,
    schema: &Schema,
    path: &mut Vec<PathSegment>,
) -> std::result::Result<(), ValidationError> {
    match schema {
        Schema::Object(object) => validate_object(value, object, path),
        Schema::Array(array) => validate_array(value, array, path),
        Schema::String(string) => validate_string(value, string, path),
        Schema::Boolean => match value {
            Value::Bool(_) => Ok(()),
            other => Err(type_mismatch(other, schema, path)),
        },
    }
}

fn validate_object(
    value: &Value,
    schema: &ObjectSchema,
    path: &mut Vec<PathSegment>,
) -> std::result::Result<(), ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(ValidationError::new(
            path.clone(),
            format!("{} is not of type 'object'", describe(value)),
        ));
    };

    for name in schema.required() {
        if !map.contains_key(name) {
            path.push(PathSegment::field(name));
            return Err(ValidationError::new(
                path.clone(),
                format!("'{name}' is a required property"),
            ));
        }
    }

    for (name, child) in schema.properties() {
        if let Some(field) = map.get(name) {
            path.push(PathSegment::field(name));
            validate_node(field, child, path)?;
            path.pop();
        }
    }

    if let Some(additional) = schema.additional() {
        for (name, field) in map {
            if schema.property_schema(name).is_none() {
                path.push(PathSegment::field(name.as_str()));
                validate_node(field, additional, path)?;
                path.pop();
            }
        }
    }

    Ok(())
}

fn validate_array(
    value: &Value,
    schema: &ArraySchema,
    path: &mut Vec<PathSegment>,
) -> std::result::Result<(), ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(ValidationError::new(
            path.clone(),
            format!("{} is not of type 'array'", describe(value)),
        ));
    };

    if let Some(min) = schema.min_len() {
        if items.len() < min {
            return Err(ValidationError::new(
                path.clone(),
                format!(
                    "{} is too short: expected at least {min} item(s), found {}",
                    describe(value),
                    items.len()
                ),
            ));
        }
    }

    for (index, item) in items.iter().enumerate() {
        path.push(PathSegment::Index(index));
        validate_node(item, schema.items(), path)?;
        path.pop();
    }

    Ok(())
}

fn validate_string(
    value: &Value,
    schema: &StringSchema,
    path: &[PathSegment],
) -> std::result::Result<(), ValidationError> {
    let Some(text) = value.as_str() else {
        return Err(ValidationError::new(
            path.to_vec(),
            format!("{} is not of type 'string'", describe(value)),
        ));
    };

    if let Some(pattern) = schema.pattern_ref() {
        if !pattern.is_match(text) {
            return Err(ValidationError::new(
                path.to_vec(),
                format!("'{text}' does not match '{}'", pattern.as_str()),
            ));
        }
    }

    if let Some(allowed) = schema.allowed() {
        if !allowed.iter().any(|a| a == text) {
            let choices = allowed
                .iter()
                .map(|a| format!("'{a}'"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ValidationError::new(
                path.to_vec(),
                format!("'{text}' is not one of [{choices}]"),
            ));
        }
    }

    if let Some(format) = schema.format_ref() {
        let valid = match format {
            StringFormat::Email => EMAIL.is_match(text),
        };
        if !valid {
            return Err(ValidationError::new(
                path.to_vec(),
                format!("'{text}' is not a valid {} address", format.as_str()),
            ));
        }
    }

    Ok(())
}

fn type_mismatch(value: &Value, schema: &Schema, path: &[PathSegment]) -> ValidationError {
    ValidationError::new(
        path.to_vec(),
        format!("{} is not of type '{}'", describe(value), schema.kind()),
    )
}

fn describe(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    };
    if rendered.chars().count() > MAX_DESCRIBE_LEN {
        let head: String = rendered.chars().take(MAX_DESCRIBE_LEN).collect();
        format!("{head}...")
    } else {
        rendered
    }
}

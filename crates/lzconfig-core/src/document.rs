//! Landing zone configuration documents
//!
//! A [`Document`] is the untyped tree parsed from a YAML source. No schema
//! is attached until it is validated; everything downstream reads it
//! through shared references and never mutates it.

use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};

/// A parsed configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Load and parse a YAML document from disk
    ///
    /// Fails with [`Error::NotFound`] when the file does not exist and
    /// [`Error::Malformed`] when it exists but is not valid YAML.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let doc = Document::load("config.yaml")?;
    /// println!("type: {:?}", doc.landing_zone_type());
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::NotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse a YAML string held in memory
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, "<inline>")
    }

    fn parse(yaml: &str, origin: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml).map_err(|source| Error::Malformed {
            path: origin.to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Wrap an already-built value
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The root node
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consume the document, returning the root node
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Top-level field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Walk a chain of mapping keys from the root
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.root, |node, key| node.get(key))
    }

    /// String value at a chain of mapping keys
    pub fn lookup_str(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Declared `landing_zone.type`, if any
    pub fn landing_zone_type(&self) -> Option<&str> {
        self.lookup_str(&["landing_zone", "type"])
    }

    /// Declared `version`, if any
    pub fn version(&self) -> Option<&str> {
        self.lookup_str(&["version"])
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::from_value(root)
    }
}

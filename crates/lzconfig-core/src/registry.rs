//! Schema registry
//!
//! Maps landing zone type names to their root schemas and holds the single
//! base schema. A registry is built once, checked, and then only read; pass
//! it to [`validate_config`](crate::validator::validate_config) explicitly.

use crate::error::{Error, Result};
use crate::landing_zone::LandingZoneType;
use crate::schema::Schema;
use crate::schemas;

/// Read-only set of schemas keyed by landing zone type
#[derive(Debug, Clone)]
pub struct Registry {
    base: Schema,
    schemas: Vec<(String, Schema)>,
}

impl Registry {
    /// Registry holding the built-in base, `gcp` and `pbmm-gcp` schemas
    pub fn builtin() -> Result<Self> {
        let mut builder = Self::builder(schemas::base::schema()?);
        for lz_type in LandingZoneType::ALL {
            builder = builder.register(lz_type.as_str(), schemas::for_type(lz_type)?);
        }
        builder.build()
    }

    /// Start a registry around `base`
    pub fn builder(base: Schema) -> RegistryBuilder {
        RegistryBuilder {
            base,
            schemas: Vec::new(),
        }
    }

    /// The type-independent base schema
    pub fn base(&self) -> &Schema {
        &self.base
    }

    /// Schema registered for `lz_type`
    pub fn lookup(&self, lz_type: &str) -> Result<&Schema> {
        self.schemas
            .iter()
            .find(|(name, _)| name == lz_type)
            .map(|(_, schema)| schema)
            .ok_or_else(|| Error::NotRegistered {
                lz_type: lz_type.to_string(),
            })
    }

    /// Registered type names, in registration order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|(name, _)| name.as_str())
    }

    /// Check that the base schema's `landing_zone.type` enumeration and the
    /// registered names are the same set
    pub fn check_consistency(&self) -> Result<()> {
        let declared: Vec<&str> = match self.base.property_path(&["landing_zone", "type"]) {
            Some(Schema::String(string)) => match string.allowed() {
                Some(allowed) => allowed.iter().map(String::as_str).collect(),
                None => {
                    return Err(Error::RegistryMismatch {
                        message: "base schema does not enumerate landing_zone.type".to_string(),
                    });
                }
            },
            _ => {
                return Err(Error::RegistryMismatch {
                    message: "base schema does not declare landing_zone.type as a string"
                        .to_string(),
                });
            }
        };

        let unregistered: Vec<&str> = declared
            .iter()
            .copied()
            .filter(|name| self.lookup(name).is_err())
            .collect();
        let undeclared: Vec<&str> = self
            .types()
            .filter(|name| !declared.contains(name))
            .collect();

        if unregistered.is_empty() && undeclared.is_empty() {
            return Ok(());
        }

        let mut problems = Vec::new();
        if !unregistered.is_empty() {
            problems.push(format!(
                "accepted by the base schema but not registered: {}",
                unregistered.join(", ")
            ));
        }
        if !undeclared.is_empty() {
            problems.push(format!(
                "registered but rejected by the base schema: {}",
                undeclared.join(", ")
            ));
        }
        Err(Error::RegistryMismatch {
            message: problems.join("; "),
        })
    }
}

/// Collects schemas before the registry is sealed
#[derive(Debug)]
pub struct RegistryBuilder {
    base: Schema,
    schemas: Vec<(String, Schema)>,
}

impl RegistryBuilder {
    /// Register `schema` under `lz_type`, replacing any earlier registration
    pub fn register(mut self, lz_type: impl Into<String>, schema: Schema) -> Self {
        let lz_type = lz_type.into();
        self.schemas.retain(|(name, _)| *name != lz_type);
        self.schemas.push((lz_type, schema));
        self
    }

    /// Seal the registry after checking it against the base schema
    pub fn build(self) -> Result<Registry> {
        let registry = self.build_unchecked();
        registry.check_consistency()?;
        Ok(registry)
    }

    /// Seal the registry without the base-schema consistency check.
    ///
    /// Useful for exercising deliberately lopsided registries in tests.
    pub fn build_unchecked(self) -> Registry {
        Registry {
            base: self.base,
            schemas: self.schemas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ObjectSchema, StringSchema};

    fn base_accepting(types: &[&str]) -> Schema {
        ObjectSchema::new()
            .property(
                "landing_zone",
                ObjectSchema::new().property("type", StringSchema::new().one_of(types.iter().copied())),
            )
            .into()
    }

    #[test]
    fn test_builtin_registry_is_consistent() {
        let registry = Registry::builtin().unwrap();
        let types: Vec<_> = registry.types().collect();
        assert_eq!(types, vec!["pbmm-gcp", "gcp"]);
        assert!(registry.lookup("gcp").is_ok());
        assert!(registry.lookup("pbmm-gcp").is_ok());
    }

    #[test]
    fn test_lookup_unknown_type() {
        let registry = Registry::builtin().unwrap();
        let err = registry.lookup("aws").unwrap_err();
        assert!(matches!(err, Error::NotRegistered { lz_type } if lz_type == "aws"));
    }

    #[test]
    fn test_declared_but_unregistered_type_is_rejected() {
        let err = Registry::builder(base_accepting(&["gcp", "aws"]))
            .register("gcp", ObjectSchema::new().into())
            .build()
            .unwrap_err();
        match err {
            Error::RegistryMismatch { message } => assert!(message.contains("aws")),
            other => panic!("Expected RegistryMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_registered_but_undeclared_type_is_rejected() {
        let err = Registry::builder(base_accepting(&["gcp"]))
            .register("gcp", ObjectSchema::new().into())
            .register("azure", ObjectSchema::new().into())
            .build()
            .unwrap_err();
        match err {
            Error::RegistryMismatch { message } => assert!(message.contains("azure")),
            other => panic!("Expected RegistryMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_base_without_enum_is_rejected() {
        let base: Schema = ObjectSchema::new()
            .property("landing_zone", ObjectSchema::new().property("type", StringSchema::new()))
            .into();
        let err = Registry::builder(base).build().unwrap_err();
        assert!(matches!(err, Error::RegistryMismatch { .. }));
    }

    #[test]
    fn test_register_replaces() {
        let registry = Registry::builder(base_accepting(&["gcp"]))
            .register("gcp", Schema::Boolean)
            .register("gcp", ObjectSchema::new().into())
            .build()
            .unwrap();
        assert_eq!(registry.types().count(), 1);
        assert_eq!(registry.lookup("gcp").unwrap().kind(), "object");
    }
}

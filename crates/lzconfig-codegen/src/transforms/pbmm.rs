//! Regulated (PBMM) business-unit transform

use serde_json::{Map, Value};

use super::{expect_array, expect_object};
use crate::defaults::{BUSINESS_UNIT_DEFAULTS, ENVIRONMENT_DEFAULTS, ENVIRONMENT_KEYS, apply_defaults};
use crate::error::Result;
use crate::variables::VariableSet;

/// Reshapes `business_units` into a single defaulted composite variable
pub struct PbmmTransform;

impl PbmmTransform {
    /// Append the `business_units` variable when the document has any.
    ///
    /// With `common_only` set, the per-environment map is left out of
    /// every business unit.
    pub fn apply(root: &Value, common_only: bool, vars: &mut VariableSet) -> Result<()> {
        let Some(units) = root.get("business_units") else {
            return Ok(());
        };

        let units = expect_array(units, "business_units")?
            .iter()
            .enumerate()
            .map(|(index, unit)| Self::business_unit(unit, index, common_only))
            .collect::<Result<Vec<_>>>()?;

        vars.push("business_units", Value::Array(units));
        Ok(())
    }

    fn business_unit(unit: &Value, index: usize, common_only: bool) -> Result<Value> {
        let path = format!("business_units[{index}]");
        let unit = expect_object(unit, &path)?;
        let mut record = apply_defaults(Some(unit), BUSINESS_UNIT_DEFAULTS);

        if !common_only {
            let mut environments = Map::new();
            for key in ENVIRONMENT_KEYS {
                let Some(block) = unit.get(key) else {
                    continue;
                };
                let source = match block {
                    Value::Null => None,
                    other => Some(expect_object(other, &format!("{path}.{key}"))?),
                };
                environments.insert(
                    key.to_string(),
                    Value::Object(apply_defaults(source, ENVIRONMENT_DEFAULTS)),
                );
            }
            record.insert("environments".to_string(), Value::Object(environments));
        }

        Ok(Value::Object(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::variables::RenderedValue;
    use serde_json::json;

    fn business_units(root: Value, common_only: bool) -> Value {
        let mut vars = VariableSet::new();
        PbmmTransform::apply(&root, common_only, &mut vars).unwrap();
        match vars.get("business_units") {
            Some(RenderedValue::Composite(value)) => value.clone(),
            other => panic!("Expected composite business_units, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_location_defaults_to_ca() {
        let root = json!({
            "business_units": [{"business_code": "bu1", "development": {"env_code": "d"}}]
        });
        let units = business_units(root, false);

        assert_eq!(units[0]["business_code"], json!("bu1"));
        assert_eq!(units[0]["location_kms"], json!("ca"));
        assert_eq!(units[0]["environments"]["development"]["env_code"], json!("d"));
        assert_eq!(
            units[0]["environments"]["development"]["key_rotation_period"],
            json!("7776000s")
        );
    }

    #[test]
    fn test_common_only_omits_environments() {
        let root = json!({"business_units": [{"development": {}}]});
        let units = business_units(root, true);
        assert!(units[0].get("environments").is_none());
    }

    #[test]
    fn test_environments_follow_fixed_key_order() {
        let root = json!({
            "business_units": [{"production": {}, "other": {}, "development": {}}]
        });
        let units = business_units(root, false);
        let keys: Vec<_> = units[0]["environments"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["development", "production"]);
    }

    #[test]
    fn test_empty_environment_block_is_defaulted() {
        let root = json!({"business_units": [{"nonproduction": null}]});
        let units = business_units(root, false);
        assert_eq!(
            units[0]["environments"]["nonproduction"]["billing_code"],
            json!("none")
        );
    }

    #[test]
    fn test_no_business_units_emits_nothing() {
        let mut vars = VariableSet::new();
        PbmmTransform::apply(&json!({"regions": []}), false, &mut vars).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_business_unit_must_be_mapping() {
        let mut vars = VariableSet::new();
        let err = PbmmTransform::apply(&json!({"business_units": ["bu1"]}), false, &mut vars)
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedShape { path, .. } if path == "business_units[0]"));
    }

    #[test]
    fn test_environment_block_must_be_mapping() {
        let mut vars = VariableSet::new();
        let root = json!({"business_units": [{"production": "yes"}]});
        let err = PbmmTransform::apply(&root, false, &mut vars).unwrap_err();
        assert!(
            matches!(err, Error::UnexpectedShape { path, .. } if path == "business_units[0].production")
        );
    }
}

//! Per-environment slices of a generic landing zone

use serde_json::Value;

use super::{expect_array, expect_object};
use crate::error::Result;
use crate::variables::VariableSet;

/// Extracts one environment's `projects` and `app_infra` lists
pub struct EnvironmentSlice;

impl EnvironmentSlice {
    /// Names listed under the top-level `environments`, in document order
    pub fn declared(root: &Value) -> Result<Vec<String>> {
        let Some(environments) = root.get("environments") else {
            return Ok(Vec::new());
        };
        let mut names = Vec::new();
        for (index, entry) in expect_array(environments, "environments")?.iter().enumerate() {
            let entry = expect_object(entry, &format!("environments[{index}]"))?;
            if let Some(name) = entry.get("name").and_then(Value::as_str) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Append `projects` and `app_infra` for `environment`.
    ///
    /// Each is the list found on the entry whose `environment` equals the
    /// name, or an empty list when there is no such entry.
    pub fn apply(root: &Value, environment: &str, vars: &mut VariableSet) -> Result<()> {
        let projects = Self::slice(root, "projects", environment, "projects")?;
        let app_infra = Self::slice(root, "app_infra", environment, "business_units")?;
        vars.push("projects", projects);
        vars.push("app_infra", app_infra);
        Ok(())
    }

    fn slice(root: &Value, section: &str, environment: &str, field: &str) -> Result<Value> {
        let Some(entries) = root.get(section).and_then(|s| s.get("environments")) else {
            return Ok(Value::Array(Vec::new()));
        };
        let entries = expect_array(entries, &format!("{section}.environments"))?;

        let found = entries
            .iter()
            .find(|entry| entry.get("environment").and_then(Value::as_str) == Some(environment))
            .and_then(|entry| entry.get(field))
            .cloned();

        Ok(found.unwrap_or_else(|| Value::Array(Vec::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::RenderedValue;
    use serde_json::json;

    fn root() -> Value {
        json!({
            "environments": [
                {"name": "development", "environment_code": "d"},
                {"name": "production", "environment_code": "p"}
            ],
            "projects": {
                "common": {},
                "environments": [
                    {"environment": "development", "projects": [{"name": "app-dev"}]},
                    {"environment": "production", "projects": [{"name": "app-prd"}]}
                ]
            },
            "app_infra": {
                "environments": [
                    {"environment": "production", "business_units": [{"name": "bu1"}]}
                ]
            }
        })
    }

    #[test]
    fn test_declared_environments() {
        assert_eq!(
            EnvironmentSlice::declared(&root()).unwrap(),
            vec!["development", "production"]
        );
        assert!(EnvironmentSlice::declared(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_declared_rejects_scalar_entries() {
        let err = EnvironmentSlice::declared(&json!({"environments": ["development"]})).unwrap_err();
        assert!(err.to_string().contains("environments[0]"));
    }

    #[test]
    fn test_slice_matches_environment_name() {
        let mut vars = VariableSet::new();
        EnvironmentSlice::apply(&root(), "production", &mut vars).unwrap();

        assert_eq!(
            vars.get("projects"),
            Some(&RenderedValue::Composite(json!([{"name": "app-prd"}])))
        );
        assert_eq!(
            vars.get("app_infra"),
            Some(&RenderedValue::Composite(json!([{"name": "bu1"}])))
        );
    }

    #[test]
    fn test_missing_slices_are_empty_lists() {
        let mut vars = VariableSet::new();
        EnvironmentSlice::apply(&root(), "development", &mut vars).unwrap();
        assert_eq!(vars.get("app_infra"), Some(&RenderedValue::Composite(json!([]))));

        let mut vars = VariableSet::new();
        EnvironmentSlice::apply(&json!({}), "development", &mut vars).unwrap();
        assert_eq!(
            vars.render().unwrap(),
            "projects = []\napp_infra = []\n"
        );
    }
}

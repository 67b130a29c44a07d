//! Generic GCP landing zone transform

use serde_json::Value;

use super::expect_object;
use crate::defaults::{BOOTSTRAP_FIELDS, FieldDefault, ORG_FIELDS, apply_defaults};
use crate::error::Result;
use crate::variables::VariableSet;

/// Sections passed through verbatim unless the output is common-only
const PASSTHROUGH: [&str; 3] = ["projects", "networking", "app_infra"];

/// Passes through the generic sections and reduces `bootstrap` and `org`
pub struct GcpTransform;

impl GcpTransform {
    /// Append the generic landing zone variables
    pub fn apply(root: &Value, common_only: bool, vars: &mut VariableSet) -> Result<()> {
        if !common_only {
            for section in PASSTHROUGH {
                if let Some(value) = root.get(section) {
                    vars.push(section, value.clone());
                }
            }
        }

        Self::reduced(root, "bootstrap", BOOTSTRAP_FIELDS, vars)?;
        Self::reduced(root, "org", ORG_FIELDS, vars)?;
        Ok(())
    }

    fn reduced(
        root: &Value,
        section: &str,
        fields: &[FieldDefault],
        vars: &mut VariableSet,
    ) -> Result<()> {
        let source = match root.get(section) {
            None | Some(Value::Null) => None,
            Some(value) => Some(expect_object(value, section)?),
        };
        vars.push(section, Value::Object(apply_defaults(source, fields)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::RenderedValue;
    use serde_json::json;

    fn composite(vars: &VariableSet, name: &str) -> Value {
        match vars.get(name) {
            Some(RenderedValue::Composite(value)) => value.clone(),
            other => panic!("Expected composite {name}, got {other:?}"),
        }
    }

    #[test]
    fn test_full_output_order() {
        let root = json!({
            "app_infra": {"environments": []},
            "bootstrap": {"org_id": "123456789012", "groups": {}},
            "networking": {"enable_hub_and_spoke": true},
            "projects": {"common": {}},
        });
        let mut vars = VariableSet::new();
        GcpTransform::apply(&root, false, &mut vars).unwrap();

        assert_eq!(
            vars.names().collect::<Vec<_>>(),
            vec!["projects", "networking", "app_infra", "bootstrap", "org"]
        );
        assert_eq!(
            composite(&vars, "bootstrap"),
            json!({"org_id": "123456789012", "billing_account": "", "default_region": ""})
        );
        assert_eq!(
            composite(&vars, "org"),
            json!({"parent_folder": "", "scc_notification_name": ""})
        );
    }

    #[test]
    fn test_common_only_keeps_reduced_sections() {
        let root = json!({"projects": {}, "org": {"parent_folder": "folders/1"}});
        let mut vars = VariableSet::new();
        GcpTransform::apply(&root, true, &mut vars).unwrap();

        assert_eq!(vars.names().collect::<Vec<_>>(), vec!["bootstrap", "org"]);
        assert_eq!(composite(&vars, "org")["parent_folder"], json!("folders/1"));
    }

    #[test]
    fn test_scalar_bootstrap_is_rejected() {
        let mut vars = VariableSet::new();
        let err = GcpTransform::apply(&json!({"bootstrap": "x"}), true, &mut vars).unwrap_err();
        assert!(err.to_string().contains("bootstrap"));
    }
}

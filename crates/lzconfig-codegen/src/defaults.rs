//! Default tables for the transpiled sections
//!
//! Every field the transpiler emits on a reshaped record is listed here
//! with its default. A field present in the source wins, even when its
//! value is null; only absent fields take the default.

use serde_json::{Map, Value};

/// Default used when a field is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// A fixed string
    Text(&'static str),
    /// A fixed boolean
    Flag(bool),
    /// An empty mapping
    EmptyMap,
}

impl DefaultValue {
    /// The default as a document value
    pub fn to_value(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.to_string()),
            Self::Flag(flag) => Value::Bool(flag),
            Self::EmptyMap => Value::Object(Map::new()),
        }
    }
}

/// A named field and its default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefault {
    /// Field name, both in the source and in the output
    pub name: &'static str,
    /// Value used when the field is absent
    pub default: DefaultValue,
}

const fn text(name: &'static str, value: &'static str) -> FieldDefault {
    FieldDefault {
        name,
        default: DefaultValue::Text(value),
    }
}

const fn flag(name: &'static str) -> FieldDefault {
    FieldDefault {
        name,
        default: DefaultValue::Flag(false),
    }
}

const fn map(name: &'static str) -> FieldDefault {
    FieldDefault {
        name,
        default: DefaultValue::EmptyMap,
    }
}

/// Environment keys recognized on a regulated business unit, in output order
pub const ENVIRONMENT_KEYS: [&str; 3] = ["development", "nonproduction", "production"];

/// Identifying fields of a regulated business unit
pub const BUSINESS_UNIT_DEFAULTS: &[FieldDefault] = &[
    text("business_code", ""),
    text("business_unit", ""),
    text("location_kms", "ca"),
    text("location_gcs", "ca"),
    text("tfc_org_name", ""),
    text("gcs_bucket_prefix", "bkt"),
    text("folder_prefix", "fldr"),
    text("primary_contact", "none@no.ne"),
    text("secondary_contact", "none@no.ne"),
];

/// Per-environment fields of a regulated business unit
pub const ENVIRONMENT_DEFAULTS: &[FieldDefault] = &[
    text("env_code", ""),
    text("billing_code", "none"),
    flag("env_enabled"),
    flag("windows_activation_enabled"),
    flag("firewall_logging_enabled"),
    flag("optional_fw_rules_enabled"),
    flag("vpc_flow_logs_enabled"),
    flag("peering_iap_fw_rules_enabled"),
    text("key_ring_name", "simple-keyring"),
    text("key_name", "simple-keyname"),
    text("key_rotation_period", "7776000s"),
    map("base"),
    map("restricted"),
];

/// Reduced `bootstrap` section of a generic landing zone
pub const BOOTSTRAP_FIELDS: &[FieldDefault] = &[
    text("org_id", ""),
    text("billing_account", ""),
    text("default_region", ""),
];

/// Reduced `org` section of a generic landing zone
pub const ORG_FIELDS: &[FieldDefault] = &[
    text("parent_folder", ""),
    text("scc_notification_name", ""),
];

/// Build a record holding exactly the fields of `table`, in table order,
/// taken from `source` or defaulted
pub fn apply_defaults(source: Option<&Map<String, Value>>, table: &[FieldDefault]) -> Map<String, Value> {
    table
        .iter()
        .map(|field| {
            let value = source
                .and_then(|s| s.get(field.name))
                .cloned()
                .unwrap_or_else(|| field.default.to_value());
            (field.name.to_string(), value)
        })
        .collect()
}

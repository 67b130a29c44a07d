//! Reusable schema pieces shared by the landing zone schemas

use crate::error::Result;
use crate::schema::{ArraySchema, ObjectSchema, Schema, StringFormat, StringSchema};

/// Environment names accepted in `environments[].name` and the per-environment sections
pub const ENVIRONMENT_NAMES: [&str; 3] = ["development", "non-production", "production"];

/// Single-letter environment codes
pub const ENVIRONMENT_CODES: [&str; 3] = ["d", "n", "p"];

/// Any string
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// An e-mail address
pub fn email() -> StringSchema {
    StringSchema::new().format(StringFormat::Email)
}

/// A list of plain strings
pub fn string_list() -> ArraySchema {
    ArraySchema::of(string())
}

/// Twelve-digit organization id
pub fn org_id() -> Result<StringSchema> {
    StringSchema::new().pattern(r"\d{12}")
}

/// Billing account id, `XXXXXX-XXXXXX-XXXXXX`
pub fn billing_account() -> Result<StringSchema> {
    StringSchema::new().pattern("[A-Z0-9]{6}-[A-Z0-9]{6}-[A-Z0-9]{6}")
}

/// `folders/<digits>`
pub fn folder_id() -> Result<StringSchema> {
    StringSchema::new().pattern("folders/[0-9]+")
}

/// IPv4 CIDR block
pub fn cidr() -> Result<StringSchema> {
    StringSchema::new().pattern(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}/\d{1,2}")
}

/// One of [`ENVIRONMENT_NAMES`]
pub fn environment_name() -> StringSchema {
    StringSchema::new().one_of(ENVIRONMENT_NAMES)
}

/// One of [`ENVIRONMENT_CODES`]
pub fn environment_code() -> StringSchema {
    StringSchema::new().one_of(ENVIRONMENT_CODES)
}

/// Entry of the top-level `environments` list
pub fn environment_entry() -> ObjectSchema {
    ObjectSchema::new()
        .require(["name", "environment_code"])
        .property("name", environment_name())
        .property("environment_code", environment_code())
}

/// The top-level `environments` list, which must not be empty
pub fn environments(entry: ObjectSchema) -> ArraySchema {
    ArraySchema::of(entry).min_items(1)
}

/// Core bootstrap fields, before any type-specific additions
pub fn bootstrap() -> Result<ObjectSchema> {
    Ok(ObjectSchema::new()
        .require(["org_id", "billing_account", "default_region"])
        .property("org_id", org_id()?)
        .property("billing_account", billing_account()?)
        .property("default_region", string()))
}

/// The `projects` section: common settings plus per-environment project lists
pub fn projects() -> Result<ObjectSchema> {
    let common = ObjectSchema::new()
        .property("billing_account", billing_account()?)
        .property("parent_folder", folder_id()?);

    let project = ObjectSchema::new()
        .require(["name", "apis", "labels"])
        .property("name", string())
        .property("apis", string_list())
        .property("labels", ObjectSchema::new().additional_properties(string()));

    let environment = ObjectSchema::new()
        .require(["environment", "projects"])
        .property("environment", environment_name())
        .property("projects", ArraySchema::of(project));

    Ok(ObjectSchema::new()
        .require(["common", "environments"])
        .property("common", common)
        .property("environments", ArraySchema::of(environment)))
}

/// The `app_infra` section: per-environment business units and their GKE clusters
pub fn app_infra() -> ObjectSchema {
    let network_config = ObjectSchema::new()
        .require(["network", "subnetwork", "ip_range_pods", "ip_range_services"])
        .property("network", string())
        .property("subnetwork", string())
        .property("ip_range_pods", string())
        .property("ip_range_services", string());

    let cluster = ObjectSchema::new()
        .require(["name", "region", "network_config"])
        .property("name", string())
        .property("region", string())
        .property("network_config", network_config);

    let business_unit = ObjectSchema::new()
        .require(["name", "gke_clusters"])
        .property("name", string())
        .property("gke_clusters", ArraySchema::of(cluster));

    let environment = ObjectSchema::new()
        .require(["environment", "business_units"])
        .property("environment", environment_name())
        .property("business_units", ArraySchema::of(business_unit));

    ObjectSchema::new()
        .require(["environments"])
        .property("environments", ArraySchema::of(environment))
}

/// A mapping whose listed fields must all be booleans when present
pub fn boolean_flags(names: &[&str]) -> ObjectSchema {
    names
        .iter()
        .fold(ObjectSchema::new(), |object, name| {
            object.property(*name, Schema::Boolean)
        })
}

/// A mapping whose listed fields must all be string lists when present
pub fn string_lists(names: &[&str]) -> ObjectSchema {
    names
        .iter()
        .fold(ObjectSchema::new(), |object, name| {
            object.property(*name, string_list())
        })
}

/// A mapping whose listed fields are all required e-mail addresses
pub fn required_emails(names: &[&str]) -> ObjectSchema {
    names
        .iter()
        .fold(ObjectSchema::new().require(names.iter().copied()), |object, name| {
            object.property(*name, email())
        })
}

//! Schema for the generic GCP landing zone

use super::fragments::{self, string};
use crate::error::Result;
use crate::schema::{ObjectSchema, Schema};

/// Root schema for `landing_zone.type: gcp`
pub fn schema() -> Result<Schema> {
    let org = ObjectSchema::new()
        .require(["parent_folder"])
        .property("parent_folder", string())
        .property("scc_notification_name", string());

    let networking = ObjectSchema::new()
        .require(["enable_hub_and_spoke", "dns_enable_logging"])
        .property("enable_hub_and_spoke", Schema::Boolean)
        .property("dns_enable_logging", Schema::Boolean)
        .property("shared_vpc_host_project_id", string());

    Ok(ObjectSchema::new()
        .require([
            "bootstrap",
            "org",
            "environments",
            "networking",
            "projects",
            "app_infra",
        ])
        .property("bootstrap", fragments::bootstrap()?)
        .property("org", org)
        .property(
            "environments",
            fragments::environments(fragments::environment_entry()),
        )
        .property("networking", networking)
        .property("projects", fragments::projects()?)
        .property("app_infra", fragments::app_infra())
        .into())
}

//! Schema for the PBMM (Protected B, Medium integrity, Medium availability)
//! GCP landing zone
//!
//! Requires everything the generic schema does, plus access-control
//! groups, organization policies and a FortiGate appliance block. The two
//! schemas share fragments; neither is derived from the other.

use super::fragments::{self, email, string, string_list};
use crate::error::Result;
use crate::schema::{ArraySchema, ObjectSchema, Schema, StringSchema};

/// Groups that must exist before bootstrap
pub const REQUIRED_GROUPS: [&str; 5] = [
    "group_org_admins",
    "group_billing_admins",
    "billing_data_users",
    "audit_data_users",
    "monitoring_workspace_users",
];

/// Groups that are created when `create_optional_groups` is set
pub const OPTIONAL_GROUPS: [&str; 5] = [
    "gcp_security_reviewer",
    "gcp_network_viewer",
    "gcp_scc_admin",
    "gcp_global_secrets_admin",
    "gcp_kms_admin",
];

/// Boolean organization policy constraints
pub const BOOLEAN_POLICIES: [&str; 4] = [
    "vmExternalIpAccess",
    "skipDefaultNetworkCreation",
    "disableSerialPortAccess",
    "disableDefaultIamGrantsServiceAccounts",
];

/// List organization policy constraints
pub const LIST_POLICIES: [&str; 3] = [
    "restrictVpcPeering",
    "restrictSharedVpcSubnetworks",
    "restrictSharedVpcHostProjects",
];

/// Root schema for `landing_zone.type: pbmm-gcp`
pub fn schema() -> Result<Schema> {
    Ok(ObjectSchema::new()
        .require([
            "bootstrap",
            "org",
            "environments",
            "networking",
            "projects",
            "app_infra",
            "org_policies",
            "fortigate",
        ])
        .property("bootstrap", bootstrap()?)
        .property("org", org())
        .property("environments", fragments::environments(environment()))
        .property("networking", networking())
        .property("projects", fragments::projects()?)
        .property("app_infra", fragments::app_infra())
        .property("org_policies", org_policies())
        .property("fortigate", fortigate()?)
        .into())
}

fn bootstrap() -> Result<ObjectSchema> {
    let groups = ObjectSchema::new()
        .require([
            "create_required_groups",
            "create_optional_groups",
            "billing_project",
            "required_groups",
            "optional_groups",
        ])
        .property("create_required_groups", Schema::Boolean)
        .property("create_optional_groups", Schema::Boolean)
        .property("billing_project", string())
        .property("required_groups", fragments::required_emails(&REQUIRED_GROUPS))
        .property("optional_groups", fragments::required_emails(&OPTIONAL_GROUPS));

    Ok(fragments::bootstrap()?
        .require(["groups"])
        .property("groups", groups))
}

fn org() -> ObjectSchema {
    ObjectSchema::new()
        .require(["parent_folder", "billing_data_users", "audit_data_users"])
        .property("parent_folder", string())
        .property("billing_data_users", email())
        .property("audit_data_users", email())
        .property("scc_notification_name", string())
        .property("scc_notifications_filter", string())
}

fn environment() -> ObjectSchema {
    let monitoring = ObjectSchema::new()
        .property("enable_monitoring", Schema::Boolean)
        .property("monitoring_workspace_users", email());

    fragments::environment_entry().property("monitoring", monitoring)
}

fn networking() -> ObjectSchema {
    ObjectSchema::new()
        .require(["enable_hub_and_spoke", "enable_vpn", "dns_enable_logging"])
        .property("enable_hub_and_spoke", Schema::Boolean)
        .property("enable_vpn", Schema::Boolean)
        .property("dns_enable_logging", Schema::Boolean)
        .property("shared_vpc_host_project_id", string())
}

fn org_policies() -> ObjectSchema {
    ObjectSchema::new()
        .require(["policy_boolean", "policy_list"])
        .property("policy_boolean", fragments::boolean_flags(&BOOLEAN_POLICIES))
        .property("policy_list", fragments::string_lists(&LIST_POLICIES))
}

fn fortigate() -> Result<ObjectSchema> {
    let network = ObjectSchema::new()
        .require(["name", "cidr"])
        .property("name", string())
        .property("cidr", fragments::cidr()?);

    let config = ObjectSchema::new()
        .property("ha_enabled", Schema::Boolean)
        .property("regions", string_list())
        .property("machine_type", string())
        .property("service_account", email())
        .property("networks", ArraySchema::of(network));

    Ok(ObjectSchema::new()
        .require(["enabled", "version"])
        .property("enabled", Schema::Boolean)
        .property("version", string())
        .property("license_type", StringSchema::new().one_of(["byol", "payg"]))
        .property("config", config))
}

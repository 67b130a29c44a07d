//! Base schema applied to every document before type dispatch

use crate::error::Result;
use crate::schema::{ObjectSchema, Schema, StringSchema};

/// Landing zone types the base schema accepts.
///
/// Must list exactly the keys registered in the schema registry;
/// [`Registry`](crate::registry::Registry) checks this when it is built.
pub const LANDING_ZONE_TYPES: [&str; 2] = ["pbmm-gcp", "gcp"];

/// `version` and `landing_zone.type` only
pub fn schema() -> Result<Schema> {
    let landing_zone = ObjectSchema::new()
        .require(["type"])
        .property("type", StringSchema::new().one_of(LANDING_ZONE_TYPES));

    Ok(ObjectSchema::new()
        .require(["version", "landing_zone"])
        .property("version", StringSchema::new().pattern(r"\d+\.\d+")?)
        .property("landing_zone", landing_zone)
        .into())
}

//! Built-in landing zone schemas
//!
//! - [`base`] - applied to every document
//! - [`gcp`] - generic GCP landing zone
//! - [`pbmm_gcp`] - regulated PBMM GCP landing zone
//!
//! Shared pieces live in [`fragments`].

pub mod base;
pub mod fragments;
pub mod gcp;
pub mod pbmm_gcp;

use crate::error::Result;
use crate::landing_zone::LandingZoneType;
use crate::schema::Schema;

/// Build the type-specific root schema for `lz_type`
pub fn for_type(lz_type: LandingZoneType) -> Result<Schema> {
    match lz_type {
        LandingZoneType::Gcp => gcp::schema(),
        LandingZoneType::PbmmGcp => pbmm_gcp::schema(),
    }
}

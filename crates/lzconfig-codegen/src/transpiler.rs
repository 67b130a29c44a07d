//! Document → variable set
//!
//! Pure functions: nothing here reads files, writes files or logs.

use lzconfig_core::{Document, LandingZoneType};

use crate::error::Result;
use crate::transforms::{EnvironmentSlice, GcpTransform, PbmmTransform};
use crate::variables::VariableSet;

/// Transpile `document` for the landing zone type named `lz_type`.
///
/// Fails with `UnsupportedType` when `lz_type` is not a known type.
pub fn transpile(document: &Document, lz_type: &str, common_only: bool) -> Result<VariableSet> {
    let lz_type: LandingZoneType = lz_type.parse()?;
    transpile_as(document, lz_type, common_only)
}

/// Transpile `document` for an already-resolved landing zone type.
///
/// `regions` is emitted first when present, followed by the type-specific
/// variables.
pub fn transpile_as(
    document: &Document,
    lz_type: LandingZoneType,
    common_only: bool,
) -> Result<VariableSet> {
    let root = document.root();
    let mut vars = VariableSet::new();

    if let Some(regions) = root.get("regions") {
        vars.push("regions", regions.clone());
    }

    match lz_type {
        LandingZoneType::PbmmGcp => PbmmTransform::apply(root, common_only, &mut vars)?,
        LandingZoneType::Gcp => GcpTransform::apply(root, common_only, &mut vars)?,
    }

    Ok(vars)
}

/// Transpile one declared environment of a generic landing zone into its
/// `projects` and `app_infra` slices
pub fn transpile_environment(document: &Document, environment: &str) -> Result<VariableSet> {
    let mut vars = VariableSet::new();
    EnvironmentSlice::apply(document.root(), environment, &mut vars)?;
    Ok(vars)
}

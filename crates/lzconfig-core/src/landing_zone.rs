//! Landing zone types and type resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::Document;
use crate::error::{Error, Result};

/// The landing zone profiles this tool understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandingZoneType {
    /// Generic GCP landing zone
    #[serde(rename = "gcp")]
    Gcp,
    /// Regulated PBMM GCP landing zone
    #[serde(rename = "pbmm-gcp")]
    PbmmGcp,
}

impl LandingZoneType {
    /// Every supported type
    pub const ALL: [Self; 2] = [Self::PbmmGcp, Self::Gcp];

    /// Identifier used in documents and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcp => "gcp",
            Self::PbmmGcp => "pbmm-gcp",
        }
    }

    /// Whether this is the regulated (business-unit based) profile
    pub fn is_regulated(&self) -> bool {
        matches!(self, Self::PbmmGcp)
    }
}

impl fmt::Display for LandingZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LandingZoneType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnsupportedType {
                lz_type: s.to_string(),
            })
    }
}

/// Pick the landing zone type for `document`.
///
/// An explicit `override_type` wins over the document's own
/// `landing_zone.type`. With neither present this fails with
/// [`Error::UnderspecifiedType`]; an unknown name fails with
/// [`Error::UnsupportedType`].
pub fn resolve_landing_zone_type(
    document: &Document,
    override_type: Option<&str>,
) -> Result<LandingZoneType> {
    override_type
        .or_else(|| document.landing_zone_type())
        .ok_or(Error::UnderspecifiedType)?
        .parse()
}

//! Build request assembly
//!
//! A [`BuildRequest`] combines the steps of a pipeline file with
//! substitutions taken from a validated configuration document. It
//! serializes to the Cloud Build config format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use lzconfig_core::{Document, LandingZoneType};

use crate::error::{Error, Result};

/// Environment variable that receives the Secret Manager secret
pub const SECRET_ENV: &str = "SECRET";

/// One step of a build pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStep {
    /// Builder image
    pub name: String,

    /// Entrypoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,

    /// Arguments passed to the entrypoint
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// `KEY=value` environment entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,

    /// Secret environment variables made available to the step
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secret_env: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Pipeline {
    #[serde(default)]
    steps: Vec<BuildStep>,
}

/// Read the steps of a pipeline file such as `cloudbuild.yaml`
pub fn load_steps(path: impl AsRef<Path>) -> Result<Vec<BuildStep>> {
    let path = path.as_ref();
    let pipeline_error = |message: String| Error::Pipeline {
        path: path.display().to_string(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| pipeline_error(e.to_string()))?;
    let pipeline: Pipeline =
        serde_yaml::from_str(&content).map_err(|e| pipeline_error(e.to_string()))?;
    Ok(pipeline.steps)
}

/// A Secret Manager secret version exposed to the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManagerSecret {
    /// `projects/<p>/secrets/<s>/versions/<v>`
    pub version_name: String,
    /// Environment variable that receives the secret
    pub env: String,
}

/// Secrets available to the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSecrets {
    /// Secret Manager secrets
    pub secret_manager: Vec<SecretManagerSecret>,
}

/// Deployment settings not found in the configuration document
#[derive(Debug, Clone, Default)]
pub struct BuildSettings {
    /// Project the build runs in
    pub project_id: String,
    /// Value for `_DOMAIN`, omitted when unset
    pub domain: Option<String>,
    /// Secret Manager version exposed as [`SECRET_ENV`]
    pub secret_version: Option<String>,
}

/// A complete build submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    /// Steps, in pipeline order
    pub steps: Vec<BuildStep>,

    /// `_NAME` substitutions
    pub substitutions: BTreeMap<String, String>,

    /// Secrets, when any are configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_secrets: Option<AvailableSecrets>,
}

impl BuildRequest {
    /// Assemble a request from pipeline steps and a validated document
    pub fn assemble(
        steps: Vec<BuildStep>,
        document: &Document,
        lz_type: LandingZoneType,
        settings: &BuildSettings,
    ) -> Result<Self> {
        Ok(Self {
            steps,
            substitutions: substitutions(document, lz_type, settings)?,
            available_secrets: settings.secret_version.as_ref().map(|version| AvailableSecrets {
                secret_manager: vec![SecretManagerSecret {
                    version_name: version.clone(),
                    env: SECRET_ENV.to_string(),
                }],
            }),
        })
    }

    /// The request in Cloud Build config form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Substitution variables for `document`
pub fn substitutions(
    document: &Document,
    lz_type: LandingZoneType,
    settings: &BuildSettings,
) -> Result<BTreeMap<String, String>> {
    let mut subs = BTreeMap::new();
    subs.insert("_PROJECT_ID".to_string(), settings.project_id.clone());

    let fields: &[(&str, &[&str])] = &[
        ("_REGION", &["bootstrap", "default_region"]),
        ("_ORG_ID", &["bootstrap", "org_id"]),
        ("_ROOT_FOLDER_ID", &["org", "parent_folder"]),
        ("_BILLING_ID", &["bootstrap", "billing_account"]),
    ];
    for (name, path) in fields {
        subs.insert(name.to_string(), required(document, path)?);
    }

    if lz_type.is_regulated() {
        subs.insert(
            "_SUPER_ADMIN_EMAIL".to_string(),
            required(
                document,
                &["bootstrap", "groups", "required_groups", "group_org_admins"],
            )?,
        );
    }

    if let Some(domain) = &settings.domain {
        subs.insert("_DOMAIN".to_string(), domain.clone());
    }

    Ok(subs)
}

fn required(document: &Document, path: &[&str]) -> Result<String> {
    document
        .lookup_str(path)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingField {
            path: path.join("."),
        })
}

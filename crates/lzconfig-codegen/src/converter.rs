//! File conversion
//!
//! Loads configuration documents, transpiles them and writes `.auto.tfvars`
//! files, including the multi-environment layouts of both landing zone
//! types.

use std::path::{Component, Path, PathBuf};

use lzconfig_core::{Document, LandingZoneType, resolve_landing_zone_type};

use crate::defaults::ENVIRONMENT_KEYS;
use crate::error::{Error, Result};
use crate::transforms::EnvironmentSlice;
use crate::transpiler::{transpile_as, transpile_environment};
use crate::variables::{VariableSet, hash_text};

/// File name of the shared variables written beside each business unit config
pub const COMMON_TFVARS: &str = "common.auto.tfvars";

/// File name of the document-level variables of a generic landing zone
pub const LANDING_ZONE_TFVARS: &str = "landing-zone.auto.tfvars";

/// Landing zone directory used when none is given: `landing-zones/<type>`
pub fn default_landing_zone_dir(lz_type: LandingZoneType) -> PathBuf {
    PathBuf::from("landing-zones").join(lz_type.as_str())
}

/// Options for the converter
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Landing zone type that overrides the one declared in documents
    pub landing_zone_type: Option<String>,
}

/// A written variable file
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    /// Where the file was written
    pub path: PathBuf,
    /// SHA-256 of the written text
    pub hash: String,
    /// The variables it contains
    pub variables: VariableSet,
}

/// Converts configuration documents into variable files
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a new converter with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The landing zone type for `document`, honouring the override
    pub fn resolve_type(&self, document: &Document) -> Result<LandingZoneType> {
        Ok(resolve_landing_zone_type(
            document,
            self.options.landing_zone_type.as_deref(),
        )?)
    }

    /// Convert a single YAML file into one variable file
    pub fn convert_file(
        &self,
        source: impl AsRef<Path>,
        output: impl AsRef<Path>,
        common_only: bool,
    ) -> Result<ConvertedFile> {
        let source = source.as_ref();
        tracing::info!("Converting {}", source.display());

        let document = Document::load(source)?;
        let lz_type = self.resolve_type(&document)?;
        tracing::debug!("Dispatching as landing zone type '{}'", lz_type);

        let variables = transpile_as(&document, lz_type, common_only)?;
        write_variables(output.as_ref(), variables)
    }

    /// Convert every landing zone under `lz_dir` for the type of `document`.
    ///
    /// Regulated landing zones are converted per business unit environment;
    /// generic ones from `document` itself.
    pub fn convert_landing_zone(
        &self,
        document: &Document,
        lz_dir: impl AsRef<Path>,
    ) -> Result<Vec<ConvertedFile>> {
        let lz_dir = lz_dir.as_ref();
        match self.resolve_type(document)? {
            LandingZoneType::PbmmGcp => self.convert_business_units(lz_dir),
            LandingZoneType::Gcp => self.convert_generic(document, lz_dir),
        }
    }

    /// Convert `<lz_dir>/4-projects/business_units/<env>/config.yaml` for
    /// each recognized environment.
    ///
    /// Each present environment yields `<env>.auto.tfvars` and
    /// [`COMMON_TFVARS`] next to its config. Environments without a
    /// directory or config file are skipped. The first failure stops the
    /// run.
    pub fn convert_business_units(&self, lz_dir: impl AsRef<Path>) -> Result<Vec<ConvertedFile>> {
        let units_dir = lz_dir.as_ref().join("4-projects").join("business_units");
        let mut results = Vec::new();

        for env in ENVIRONMENT_KEYS {
            let env_dir = units_dir.join(env);
            let config = env_dir.join("config.yaml");
            if !env_dir.is_dir() || !config.is_file() {
                tracing::debug!("Skipping {}: no config.yaml", env_dir.display());
                continue;
            }

            tracing::info!("Converting {} environment", env);
            let document = Document::load(&config)?;

            let full = transpile_as(&document, LandingZoneType::PbmmGcp, false)?;
            results.push(write_variables(&env_dir.join(format!("{env}.auto.tfvars")), full)?);

            let common = transpile_as(&document, LandingZoneType::PbmmGcp, true)?;
            results.push(write_variables(&env_dir.join(COMMON_TFVARS), common)?);
        }

        Ok(results)
    }

    /// Convert a generic landing zone into [`LANDING_ZONE_TFVARS`] plus one
    /// `<env-name>.auto.tfvars` per declared environment, all under `out_dir`.
    ///
    /// Environment names must be plain file stems; any other name fails
    /// before the first file is written.
    pub fn convert_generic(
        &self,
        document: &Document,
        out_dir: impl AsRef<Path>,
    ) -> Result<Vec<ConvertedFile>> {
        let out_dir = out_dir.as_ref();
        let environments = EnvironmentSlice::declared(document.root())?;
        if let Some(bad) = environments.iter().find(|env| !is_file_stem(env)) {
            tracing::error!("Environment name '{}' is not a plain file name", bad);
            return Err(Error::shape("environments", "environment names usable as file names"));
        }

        let mut results = Vec::new();
        let full = transpile_as(document, LandingZoneType::Gcp, false)?;
        results.push(write_variables(&out_dir.join(LANDING_ZONE_TFVARS), full)?);

        for env in environments {
            tracing::info!("Converting {} environment", env);
            let slice = transpile_environment(document, &env)?;
            results.push(write_variables(&out_dir.join(format!("{env}.auto.tfvars")), slice)?);
        }

        Ok(results)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

fn is_file_stem(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

fn write_variables(path: &Path, variables: VariableSet) -> Result<ConvertedFile> {
    let text = variables.render()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &text)?;
    tracing::info!("Wrote {}", path.display());

    Ok(ConvertedFile {
        path: path.to_path_buf(),
        hash: hash_text(&text),
        variables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_convert_file_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("config.yaml");
        std::fs::write(&source, "landing_zone:\n  type: gcp\nbootstrap:\n  org_id: '1'\n").unwrap();
        let output = dir.path().join("out").join("nested").join("vars.auto.tfvars");

        let converted = Converter::default().convert_file(&source, &output, false).unwrap();

        assert_eq!(converted.path, output);
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(converted.hash, hash_text(&written));
        assert!(written.starts_with("bootstrap = {"));
    }

    #[test]
    fn test_convert_file_without_any_type() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("config.yaml");
        std::fs::write(&source, "business_units: []\n").unwrap();

        let err = Converter::default()
            .convert_file(&source, dir.path().join("x.tfvars"), false)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Core(lzconfig_core::Error::UnderspecifiedType)
        ));
    }

    #[test]
    fn test_default_landing_zone_dir() {
        assert_eq!(
            default_landing_zone_dir(LandingZoneType::PbmmGcp),
            Path::new("landing-zones").join("pbmm-gcp")
        );
    }

    #[test]
    fn test_file_stems() {
        assert!(is_file_stem("development"));
        assert!(is_file_stem("non-prod.1"));
        assert!(!is_file_stem(""));
        assert!(!is_file_stem(".."));
        assert!(!is_file_stem("../escaped"));
        assert!(!is_file_stem("nested/env"));
        assert!(!is_file_stem("/abs"));
        assert!(!is_file_stem("trailing/"));
    }

    #[test]
    fn test_override_applies_to_landing_zone_dispatch() {
        let dir = TempDir::new().unwrap();
        let document = Document::from_yaml_str("landing_zone:\n  type: pbmm-gcp\n").unwrap();
        let converter = Converter::new(ConvertOptions {
            landing_zone_type: Some("gcp".to_string()),
        });

        let files = converter.convert_landing_zone(&document, dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with(LANDING_ZONE_TFVARS));
    }
}

//! Integration tests for multi-environment conversion
//!
//! Tests lay out landing zone directories in temporary folders and verify:
//! - Regulated business unit environments produce full and common files
//! - Missing environments are skipped
//! - The first failing environment stops the run
//! - Generic landing zones produce document and per-environment files

use lzconfig_codegen::converter::{COMMON_TFVARS, LANDING_ZONE_TFVARS};
use lzconfig_codegen::{ConvertOptions, Converter, Error};
use lzconfig_core::Document;
use std::path::Path;
use tempfile::TempDir;

const BUSINESS_UNIT_CONFIG: &str = r#"
regions:
  - northamerica-northeast1
business_units:
  - business_code: bu1
    business_unit: business-unit-1
    primary_contact: ops@example.com
    development:
      env_code: d
      env_enabled: true
      base:
        subnets: ["10.0.0.0/24"]
"#;

const GENERIC_CONFIG: &str = r#"
version: "1.0"
landing_zone:
  type: gcp
bootstrap:
  org_id: "123456789012"
  billing_account: ABCDEF-GHIJKL-MNOPQR
  default_region: northamerica-northeast1
org:
  parent_folder: folders/123
environments:
  - name: development
    environment_code: d
  - name: production
    environment_code: p
networking:
  enable_hub_and_spoke: true
  dns_enable_logging: true
projects:
  common: {}
  environments:
    - environment: production
      projects:
        - name: app-prd
          apis: [compute.googleapis.com]
          labels: {}
app_infra:
  environments: []
"#;

/// Helper to write a business unit config for `env` under `lz_dir`
fn write_business_unit(lz_dir: &Path, env: &str, content: &str) {
    let env_dir = lz_dir.join("4-projects").join("business_units").join(env);
    std::fs::create_dir_all(&env_dir).unwrap();
    std::fs::write(env_dir.join("config.yaml"), content).unwrap();
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

// =============================================================================
// Regulated landing zones
// =============================================================================

#[test]
fn test_business_units_full_and_common() {
    let dir = TempDir::new().unwrap();
    write_business_unit(dir.path(), "development", BUSINESS_UNIT_CONFIG);

    let files = Converter::default().convert_business_units(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let env_dir = dir.path().join("4-projects/business_units/development");
    let full = read(&env_dir.join("development.auto.tfvars"));
    let common = read(&env_dir.join(COMMON_TFVARS));

    assert!(full.starts_with("regions = [\n  \"northamerica-northeast1\"\n]\nbusiness_units = ["));
    assert!(full.contains("\"location_kms\": \"ca\""));
    assert!(full.contains("\"environments\""));
    assert!(full.contains("\"key_name\": \"simple-keyname\""));
    assert!(!common.contains("\"environments\""));
    assert!(common.contains("\"primary_contact\": \"ops@example.com\""));
}

#[test]
fn test_sparse_environments_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_business_unit(dir.path(), "production", BUSINESS_UNIT_CONFIG);
    // Directory without a config file
    std::fs::create_dir_all(dir.path().join("4-projects/business_units/nonproduction")).unwrap();

    let files = Converter::default().convert_business_units(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["production.auto.tfvars", COMMON_TFVARS]);
}

#[test]
fn test_no_environments_at_all() {
    let dir = TempDir::new().unwrap();
    let files = Converter::default().convert_business_units(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_first_failure_stops_the_run() {
    let dir = TempDir::new().unwrap();
    write_business_unit(dir.path(), "development", "business_units: [\n");
    write_business_unit(dir.path(), "production", BUSINESS_UNIT_CONFIG);

    let err = Converter::default().convert_business_units(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Core(lzconfig_core::Error::Malformed { .. })));
    assert!(
        !dir.path()
            .join("4-projects/business_units/production/production.auto.tfvars")
            .exists()
    );
}

#[test]
fn test_conversion_is_byte_identical_across_runs() {
    let dir = TempDir::new().unwrap();
    write_business_unit(dir.path(), "development", BUSINESS_UNIT_CONFIG);
    let converter = Converter::default();

    let first = converter.convert_business_units(dir.path()).unwrap();
    let second = converter.convert_business_units(dir.path()).unwrap();
    let hashes = |files: &[lzconfig_codegen::ConvertedFile]| {
        files.iter().map(|f| f.hash.clone()).collect::<Vec<_>>()
    };
    assert_eq!(hashes(&first), hashes(&second));
}

// =============================================================================
// Generic landing zones
// =============================================================================

#[test]
fn test_generic_landing_zone_files() {
    let dir = TempDir::new().unwrap();
    let document = Document::from_yaml_str(GENERIC_CONFIG).unwrap();

    let files = Converter::default()
        .convert_landing_zone(&document, dir.path())
        .unwrap();
    assert_eq!(files.len(), 3);

    let top = read(&dir.path().join(LANDING_ZONE_TFVARS));
    let names: Vec<_> = top
        .lines()
        .filter(|line| !line.starts_with(' ') && line.contains(" = "))
        .map(|line| line.split(" = ").next().unwrap())
        .collect();
    assert_eq!(names, vec!["projects", "networking", "app_infra", "bootstrap", "org"]);

    assert_eq!(
        read(&dir.path().join("development.auto.tfvars")),
        "projects = []\napp_infra = []\n"
    );
    let production = read(&dir.path().join("production.auto.tfvars"));
    assert!(production.contains("\"name\": \"app-prd\""));
}

#[test]
fn test_override_selects_regulated_layout() {
    let dir = TempDir::new().unwrap();
    write_business_unit(dir.path(), "development", BUSINESS_UNIT_CONFIG);
    let document = Document::from_yaml_str(GENERIC_CONFIG).unwrap();

    let converter = Converter::new(ConvertOptions {
        landing_zone_type: Some("pbmm-gcp".to_string()),
    });
    let files = converter.convert_landing_zone(&document, dir.path()).unwrap();

    assert_eq!(files.len(), 2);
    assert!(!dir.path().join(LANDING_ZONE_TFVARS).exists());
}

#[test]
fn test_generic_environment_name_must_be_a_file_name() {
    let dir = TempDir::new().unwrap();
    let lz_dir = dir.path().join("lz");
    let document = Document::from_yaml_str(&GENERIC_CONFIG.replace(
        "- name: production",
        "- name: ../escaped",
    ))
    .unwrap();

    let err = Converter::default()
        .convert_landing_zone(&document, &lz_dir)
        .unwrap_err();

    assert!(matches!(err, Error::UnexpectedShape { .. }));
    assert!(!dir.path().join("escaped.auto.tfvars").exists());
    assert!(!lz_dir.join(LANDING_ZONE_TFVARS).exists());
}

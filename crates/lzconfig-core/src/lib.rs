//! lz-config Core Library
//!
//! This crate provides the validation half of lz-config:
//! - Loading landing zone configuration documents from YAML
//! - A small schema tree and the built-in landing zone schemas
//! - The schema registry keyed by landing zone type
//! - Fail-fast validation with precise error paths
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │  Document   │────▶│ Base schema │────▶│ Type schema from │
//! │   (YAML)    │     │   (gate)    │     │   the Registry   │
//! └─────────────┘     └─────────────┘     └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lzconfig_core::{ConfigValidator, Document};
//!
//! let validator = ConfigValidator::builtin()?;
//! let document = validator.validate_file("config.yaml")?;
//! println!("type: {:?}", document.landing_zone_type());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod landing_zone;
pub mod registry;
pub mod schema;
pub mod schemas;
pub mod validator;

pub use document::Document;
pub use error::{Error, PathSegment, Result, ValidationError};
pub use landing_zone::{LandingZoneType, resolve_landing_zone_type};
pub use registry::Registry;
pub use schema::Schema;
pub use validator::{ConfigValidator, validate, validate_config};

//! lz-config Code Generation
//!
//! This crate turns validated landing zone documents into Terraform
//! `.auto.tfvars` files.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌──────────┐     ┌────────────┐     ┌─────────────┐     ┌──────────┐
//! │ Document │────▶│ Transforms │────▶│ VariableSet │────▶│  tfvars  │
//! │  (YAML)  │     │ (per type) │     │  (ordered)  │     │  (text)  │
//! └──────────┘     └────────────┘     └─────────────┘     └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lzconfig_codegen::{Converter, ConvertOptions};
//!
//! let converter = Converter::new(ConvertOptions::default());
//! let converted = converter.convert_file("config.yaml", "terraform.auto.tfvars", false)?;
//! println!("{} ({})", converted.path.display(), converted.hash);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod converter;
pub mod defaults;
pub mod error;
pub mod transforms;
pub mod transpiler;
pub mod variables;

pub use converter::{ConvertOptions, ConvertedFile, Converter, default_landing_zone_dir};
pub use error::{Error, Result};
pub use transpiler::{transpile, transpile_as, transpile_environment};
pub use variables::{Assignment, RenderedValue, VariableSet};

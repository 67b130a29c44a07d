//! lz-config Runtime
//!
//! This crate submits landing zone deployments to a build service and
//! follows them to completion.
//!
//! # Features
//!
//! - Build request assembly from a pipeline file and a validated config
//! - A [`BuildService`] trait with a `gcloud` implementation
//! - Status polling until the build finishes
//!
//! # Usage
//!
//! ```rust,ignore
//! use lzconfig_runtime::{Deployer, DeployOptions, GcloudBuildService};
//!
//! let deployer = Deployer::new(GcloudBuildService::new(), ConfigValidator::builtin()?);
//! let build = deployer.deploy("config.yaml", &options).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod build;
pub mod deploy;
pub mod error;
pub mod gcloud;
pub mod monitor;
pub mod request;
pub mod service;

pub use build::{Build, BuildStatus};
pub use deploy::{DeployOptions, Deployer};
pub use error::{Error, Result};
pub use gcloud::GcloudBuildService;
pub use monitor::monitor_build;
pub use request::{BuildRequest, BuildSettings};
pub use service::BuildService;

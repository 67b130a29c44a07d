//! CLI command implementations

pub mod convert;
pub mod convert_all;
pub mod deploy;
pub mod validate;

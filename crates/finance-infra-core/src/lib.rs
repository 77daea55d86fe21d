//! Core types, configuration, and validation for Finance infra synthesis.
//!
//! This crate owns everything that happens before the first stack is
//! declared: loading the configuration document, validating every field the
//! stacks consume, and resolving the target account and region.

pub mod config;
mod error;
mod settings;
mod types;
pub mod validation;

pub use config::{CognitoConfig, DashboardConfig, InfraConfig, InfraDocument};
pub use error::{ConfigError, ConfigResult};
pub use settings::SynthSettings;
pub use types::{AccountId, AwsRegion, DeployEnvironment};

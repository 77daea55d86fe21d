//! Stack composition and deployment plan synthesis for Finance infra.
//!
//! [`synthesize`] turns a validated [`finance_infra_core::InfraConfig`] into a
//! [`CloudAssembly`]: the authentication stack, the dashboard table stack and
//! the dashboard site stack, in that order. The site stack reads the backend
//! API URL from a [`StackOutputRegistry`] holding the outputs of stacks that
//! are deployed outside this application.
//!
//! ```no_run
//! use finance_infra_core::InfraConfig;
//! use finance_infra_synth::{StackOutputRegistry, synthesize};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InfraConfig::load("config.json")?;
//! let registry = StackOutputRegistry::load("backend-outputs.json")?;
//! synthesize(&config, &registry)?.write_to("cdk.out")?;
//! # Ok(())
//! # }
//! ```

mod app;
pub mod assembly;
mod endpoint;
mod error;
pub mod namespace;
pub mod registry;
mod stack;
pub mod stacks;

pub use app::{App, synthesize};
pub use assembly::{CloudAssembly, Manifest, StackArtifact};
pub use endpoint::ApiEndpoint;
pub use error::{AssemblyError, SynthError, SynthResult};
pub use namespace::{ParameterEntry, ParameterNamespace};
pub use registry::{OutputRef, OutputValue, StackOutputRegistry};
pub use stack::{ResourceHandle, Stack};

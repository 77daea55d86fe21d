//! Finance infra synthesizer.
//!
//! Reads the configuration document and the outputs of already deployed
//! backend stacks, builds the authentication, dashboard table, and dashboard
//! site stacks, and writes the deployment plan (`manifest.json` plus one
//! CloudFormation template per stack). Nothing is deployed and no cloud API is
//! contacted.
//!
//! # Usage
//!
//! ```text
//! FINANCE_INFRA_CONFIG=config.json BACKEND_OUTPUTS_FILE=outputs.json finance-infra
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FINANCE_INFRA_CONFIG` | `config.json` | Configuration document |
//! | `CDK_OUTDIR` | `cdk.out` | Plan output directory |
//! | `BACKEND_OUTPUTS_FILE` | *(unset)* | Outputs of deployed backend stacks |
//! | `CDK_DEFAULT_ACCOUNT` | *(unset)* | Account used when the document has none |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use finance_infra_core::{InfraConfig, SynthSettings};
use finance_infra_synth::{StackOutputRegistry, synthesize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` setting.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Load deployed stack outputs, or an empty registry when no file is configured.
fn load_registry(settings: &SynthSettings) -> Result<StackOutputRegistry> {
    match &settings.backend_outputs_file {
        Some(path) => {
            let registry = StackOutputRegistry::load(path)
                .with_context(|| format!("failed to load stack outputs from {}", path.display()))?;
            info!(path = %path.display(), stacks = registry.len(), "loaded deployed stack outputs");
            Ok(registry)
        }
        None => {
            warn!("BACKEND_OUTPUTS_FILE is not set; cross-stack imports cannot be resolved");
            Ok(StackOutputRegistry::new())
        }
    }
}

fn run(settings: &SynthSettings) -> Result<()> {
    let config = InfraConfig::load(&settings.config_file).with_context(|| {
        format!(
            "invalid configuration document {}",
            settings.config_file.display()
        )
    })?;
    let registry = load_registry(settings)?;

    let assembly = synthesize(&config, &registry).context("synthesis failed")?;
    assembly
        .write_to(&settings.output_dir)
        .context("failed to write deployment plan")?;

    for stack in &assembly.manifest().stacks {
        for warning in &stack.warnings {
            warn!(stack = %stack.id, "{warning}");
        }
        info!(
            stack = %stack.id,
            environment = %stack.environment,
            template = %stack.template_file,
            "stack synthesized"
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let settings = SynthSettings::from_env();

    init_tracing(&settings.log_level)?;

    info!(
        config = %settings.config_file.display(),
        output_dir = %settings.output_dir.display(),
        version = VERSION,
        "starting finance infra synthesis",
    );

    run(&settings)
}

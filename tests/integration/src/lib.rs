//! End-to-end tests for Finance infra synthesis.
//!
//! Every test drives the full pipeline through files in a temporary
//! directory: configuration document and deployed outputs in, deployment
//! plan out.

use std::path::{Path, PathBuf};
use std::sync::Once;

use finance_infra_core::InfraConfig;
use finance_infra_synth::{CloudAssembly, StackOutputRegistry, SynthResult, synthesize};
use serde_json::{Value, json};

static INIT: Once = Once::new();

/// Name of the backend stack referenced by [`sample_document`].
pub const BACKEND_STACK: &str = "stack-finance-dashboard-backend";

/// API URL the backend stack publishes in [`flat_outputs`].
pub const BACKEND_API_URL: &str = "https://abc123.execute-api.ap-northeast-1.amazonaws.com/Prod/";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A complete, valid configuration document.
#[must_use]
pub fn sample_document() -> Value {
    json!({
        "account": "123456789012",
        "region": "ap-northeast-1",
        "environment": "prod",
        "cognito": {
            "user_pool_name": "finance-common-user-pool",
            "client_name": "finance-common-client",
            "ssm_prefix": "/finance/common"
        },
        "dashboard": {
            "dynamodb_table_name": "finance-dash",
            "domain_name": "dashboard.finance.example.com",
            "acm_certificate_arn": "arn:aws:acm:us-east-1:123456789012:certificate/abc-123",
            "s3_bucket_name": "finance-dashboard-site",
            "s3_origin_path": "/dist",
            "backend_stack_name": BACKEND_STACK
        }
    })
}

/// Deployed outputs in the flat `{stack: {key: value}}` shape.
#[must_use]
pub fn flat_outputs() -> Value {
    json!({ BACKEND_STACK: { "ApiUrl": BACKEND_API_URL } })
}

/// Write `value` as JSON to `dir/name`.
#[must_use]
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

/// Parse `document` (no account fallback) and synthesize it against `outputs`.
pub fn synthesize_document(document: &Value, outputs: &Value) -> SynthResult<CloudAssembly> {
    init_tracing();
    let config = InfraConfig::from_json(&document.to_string(), None).unwrap();
    let registry = StackOutputRegistry::from_json(&outputs.to_string())?;
    synthesize(&config, &registry)
}

/// Read a template from a written plan.
#[must_use]
pub fn read_template(dir: &Path, stack: &str) -> Value {
    let raw = std::fs::read_to_string(dir.join(format!("{stack}.template.json"))).unwrap();
    serde_json::from_str(&raw).unwrap()
}

mod test_config;
mod test_cross_stack;
mod test_pipeline;
mod test_stacks;

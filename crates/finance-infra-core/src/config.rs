//! The configuration document driving a synthesis run.
//!
//! The document is a single JSON file holding the target environment and one
//! sub-document per stack family. It is loaded once at process entry, validated
//! in full, and then handed by reference to each stack constructor.
//!
//! ```json
//! {
//!   "account": "123456789012",
//!   "region": "ap-northeast-1",
//!   "environment": "prod",
//!   "cognito": {
//!     "user_pool_name": "finance-common-user-pool",
//!     "client_name": "finance-common-client",
//!     "ssm_prefix": "/finance/common"
//!   },
//!   "dashboard": {
//!     "dynamodb_table_name": "finance-dash",
//!     "domain_name": "dashboard.finance.example.com",
//!     "acm_certificate_arn": "arn:aws:acm:us-east-1:123456789012:certificate/abc",
//!     "s3_bucket_name": "finance-dashboard-site",
//!     "s3_origin_path": "/dist",
//!     "backend_stack_name": "stack-finance-dashboard-backend"
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{AccountId, AwsRegion, DeployEnvironment};
use crate::validation;

/// Environment variable consulted when the document carries no account.
pub const ACCOUNT_ENV_VAR: &str = "CDK_DEFAULT_ACCOUNT";

/// Output key the backend stack publishes its API endpoint under by default.
pub const DEFAULT_API_OUTPUT_KEY: &str = "ApiUrl";

/// Identity-pool settings consumed by the authentication stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitoConfig {
    /// Name of the user pool.
    pub user_pool_name: String,
    /// Name of the application client.
    pub client_name: String,
    /// Parameter-namespace prefix the pool and client identifiers are written under.
    pub ssm_prefix: String,
}

/// Dashboard settings consumed by the table and site stacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Name of the key-value table.
    pub dynamodb_table_name: String,
    /// Public domain the distribution answers on.
    pub domain_name: String,
    /// ACM certificate for `domain_name` (must be in `us-east-1`).
    pub acm_certificate_arn: String,
    /// Bucket holding the static assets.
    pub s3_bucket_name: String,
    /// Path inside the bucket the distribution serves from.
    pub s3_origin_path: String,
    /// Name of the separately deployed backend stack exposing the API.
    pub backend_stack_name: String,
    /// Output key the backend stack publishes its API URL under.
    #[serde(default = "default_api_output_key")]
    pub backend_api_output_key: String,
}

fn default_api_output_key() -> String {
    DEFAULT_API_OUTPUT_KEY.to_owned()
}

/// The raw configuration document, exactly as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfraDocument {
    /// Target account; falls back to [`ACCOUNT_ENV_VAR`] when absent.
    #[serde(default)]
    pub account: Option<String>,
    /// Target region.
    pub region: String,
    /// Environment label (`dev`, `prod`, ...), applied as a tag.
    pub environment: String,
    /// Authentication stack settings.
    pub cognito: CognitoConfig,
    /// Dashboard stack settings.
    pub dashboard: DashboardConfig,
}

/// A fully validated configuration with the deployment environment resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfraConfig {
    /// Resolved account and region shared by every stack.
    pub target: DeployEnvironment,
    /// Environment label.
    pub environment: String,
    /// Authentication stack settings.
    pub cognito: CognitoConfig,
    /// Dashboard stack settings, with `s3_origin_path` normalized.
    pub dashboard: DashboardConfig,
}

impl InfraConfig {
    /// Load and validate the document at `path`, falling back to
    /// [`ACCOUNT_ENV_VAR`] for the account.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration document");
        Self::from_json(&raw, std::env::var(ACCOUNT_ENV_VAR).ok())
    }

    /// Parse and validate a JSON document.
    ///
    /// `fallback_account` is used only when the document has no `account`.
    pub fn from_json(raw: &str, fallback_account: Option<String>) -> ConfigResult<Self> {
        let document: InfraDocument = serde_json::from_str(raw)?;
        Self::from_document(document, fallback_account)
    }

    /// Validate an already parsed document and resolve its environment.
    pub fn from_document(
        document: InfraDocument,
        fallback_account: Option<String>,
    ) -> ConfigResult<Self> {
        let InfraDocument {
            account,
            region,
            environment,
            cognito,
            mut dashboard,
        } = document;

        validation::require_non_empty("region", &region)?;
        validation::require_non_empty("environment", &environment)?;

        validation::require_non_empty("cognito.user_pool_name", &cognito.user_pool_name)?;
        validation::require_non_empty("cognito.client_name", &cognito.client_name)?;
        validation::require_non_empty("cognito.ssm_prefix", &cognito.ssm_prefix)?;
        validation::validate_parameter_prefix("cognito.ssm_prefix", &cognito.ssm_prefix)?;

        validation::require_non_empty(
            "dashboard.dynamodb_table_name",
            &dashboard.dynamodb_table_name,
        )?;
        validation::require_non_empty("dashboard.domain_name", &dashboard.domain_name)?;
        validation::validate_domain_name("dashboard.domain_name", &dashboard.domain_name)?;
        validation::require_non_empty(
            "dashboard.acm_certificate_arn",
            &dashboard.acm_certificate_arn,
        )?;
        validation::validate_certificate_arn(
            "dashboard.acm_certificate_arn",
            &dashboard.acm_certificate_arn,
        )?;
        validation::require_non_empty("dashboard.s3_bucket_name", &dashboard.s3_bucket_name)?;
        validation::validate_bucket_name("dashboard.s3_bucket_name", &dashboard.s3_bucket_name)?;
        dashboard.s3_origin_path =
            validation::normalize_origin_path("dashboard.s3_origin_path", &dashboard.s3_origin_path)?;
        validation::require_non_empty(
            "dashboard.backend_stack_name",
            &dashboard.backend_stack_name,
        )?;
        validation::require_non_empty(
            "dashboard.backend_api_output_key",
            &dashboard.backend_api_output_key,
        )?;

        let account = account
            .filter(|a| !a.trim().is_empty())
            .or_else(|| fallback_account.filter(|a| !a.trim().is_empty()))
            .map(AccountId::new)
            .transpose()?;

        Ok(Self {
            target: DeployEnvironment::new(account, AwsRegion::new(region)),
            environment,
            cognito,
            dashboard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> serde_json::Value {
        serde_json::json!({
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
                "s3_origin_path": "/dist/",
                "backend_stack_name": "stack-finance-dashboard-backend"
            }
        })
    }

    fn parse(doc: &serde_json::Value, fallback: Option<&str>) -> ConfigResult<InfraConfig> {
        InfraConfig::from_json(&doc.to_string(), fallback.map(str::to_owned))
    }

    #[test]
    fn test_should_load_valid_document() {
        let config = parse(&sample_document(), None).unwrap();
        assert_eq!(config.target.uri(), "aws://123456789012/ap-northeast-1");
        assert_eq!(config.environment, "prod");
        assert_eq!(config.cognito.ssm_prefix, "/finance/common");
        assert_eq!(config.dashboard.s3_origin_path, "/dist");
        assert_eq!(config.dashboard.backend_api_output_key, DEFAULT_API_OUTPUT_KEY);
    }

    #[test]
    fn test_should_fail_when_region_missing() {
        let mut doc = sample_document();
        doc.as_object_mut().unwrap().remove("region");
        let err = parse(&doc, None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn test_should_fail_when_nested_field_missing() {
        let mut doc = sample_document();
        doc["dashboard"]
            .as_object_mut()
            .unwrap()
            .remove("backend_stack_name");
        let err = parse(&doc, None).unwrap_err();
        assert!(err.to_string().contains("backend_stack_name"));
    }

    #[test]
    fn test_should_fail_when_required_field_blank() {
        let mut doc = sample_document();
        doc["cognito"]["client_name"] = serde_json::json!("");
        let err = parse(&doc, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("cognito.client_name")));
    }

    #[test]
    fn test_should_fall_back_to_environment_account() {
        let mut doc = sample_document();
        doc.as_object_mut().unwrap().remove("account");
        let config = parse(&doc, Some("210987654321")).unwrap();
        assert_eq!(config.target.account.unwrap().as_str(), "210987654321");
    }

    #[test]
    fn test_should_prefer_document_account_over_fallback() {
        let config = parse(&sample_document(), Some("210987654321")).unwrap();
        assert_eq!(config.target.account.unwrap().as_str(), "123456789012");
    }

    #[test]
    fn test_should_allow_environment_agnostic_target() {
        let mut doc = sample_document();
        doc["account"] = serde_json::Value::Null;
        let config = parse(&doc, None).unwrap();
        assert!(config.target.account.is_none());
    }

    #[test]
    fn test_should_reject_malformed_account() {
        let mut doc = sample_document();
        doc["account"] = serde_json::json!("12345");
        assert!(matches!(
            parse(&doc, None),
            Err(ConfigError::InvalidAccountId(_))
        ));
    }

    #[test]
    fn test_should_ignore_unconsumed_fields() {
        let mut doc = sample_document();
        doc["dashboard"]["sam_template"] = serde_json::json!("template.yaml");
        doc["cognito"]["callback_urls"] = serde_json::json!(["https://example.com"]);
        let config = parse(&doc, None).unwrap();
        assert_eq!(config.dashboard.dynamodb_table_name, "finance-dash");
        assert_eq!(config.cognito.ssm_prefix, "/finance/common");
    }

    #[test]
    fn test_should_honor_custom_api_output_key() {
        let mut doc = sample_document();
        doc["dashboard"]["backend_api_output_key"] = serde_json::json!("HttpApiEndpoint");
        let config = parse(&doc, None).unwrap();
        assert_eq!(config.dashboard.backend_api_output_key, "HttpApiEndpoint");
    }

    #[test]
    fn test_should_report_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InfraConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_should_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, sample_document().to_string()).unwrap();
        let config = InfraConfig::load(&path).unwrap();
        assert_eq!(config.dashboard.dynamodb_table_name, "finance-dash");
    }

    #[test]
    fn test_should_load_account_from_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut doc = sample_document();
        doc.as_object_mut().unwrap().remove("account");
        std::fs::write(&path, doc.to_string()).unwrap();

        // SAFETY: the other loading tests fail before the lookup or carry their own account.
        unsafe { std::env::set_var(ACCOUNT_ENV_VAR, "210987654321") };
        let result = InfraConfig::load(&path);
        unsafe { std::env::remove_var(ACCOUNT_ENV_VAR) };

        let config = result.unwrap();
        assert_eq!(config.target.uri(), "aws://210987654321/ap-northeast-1");
    }
}

//! Common AWS type definitions shared across stacks.

use std::fmt;

use crate::error::ConfigError;

/// AWS Account ID (12-digit string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account ID from a string.
    ///
    /// # Errors
    /// Returns an error if the account ID is not a 12-digit numeric string.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.len() != 12 || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidAccountId(id));
        }
        Ok(Self(id))
    }

    /// Get the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Region CloudFront requires viewer certificates to live in.
    pub const CLOUDFRONT_CERTIFICATE_REGION: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The deployment target of a stack: an optional account plus a region.
///
/// A stack without an account is environment-agnostic; deployment tooling
/// fills the account in from its own credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeployEnvironment {
    /// Target account, if known at synthesis time.
    pub account: Option<AccountId>,
    /// Target region.
    pub region: AwsRegion,
}

impl DeployEnvironment {
    /// Placeholder used in environment URIs when the account is unknown.
    pub const UNKNOWN_ACCOUNT: &str = "unknown-account";

    /// Create a new deployment environment.
    #[must_use]
    pub fn new(account: Option<AccountId>, region: AwsRegion) -> Self {
        Self { account, region }
    }

    /// Render the environment as an `aws://<account>/<region>` URI.
    #[must_use]
    pub fn uri(&self) -> String {
        let account = self
            .account
            .as_ref()
            .map_or(Self::UNKNOWN_ACCOUNT, AccountId::as_str);
        format!("aws://{account}/{}", self.region)
    }
}

impl fmt::Display for DeployEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

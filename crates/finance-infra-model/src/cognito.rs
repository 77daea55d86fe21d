//! `AWS::Cognito::UserPool` and `AWS::Cognito::UserPoolClient` properties.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::intrinsic::CfnValue;
use crate::tag::{merge_tag_map, Tag};
use crate::template::ResourceProperties;

/// Password complexity requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PasswordPolicy {
    /// Minimum password length.
    pub minimum_length: u8,
    /// Require at least one lowercase letter.
    pub require_lowercase: bool,
    /// Require at least one uppercase letter.
    pub require_uppercase: bool,
    /// Require at least one digit.
    pub require_numbers: bool,
    /// Require at least one symbol.
    pub require_symbols: bool,
    /// Days an admin-issued temporary password stays valid.
    pub temporary_password_validity_days: u8,
}

/// Pool-level policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolPolicies {
    /// Password policy.
    pub password_policy: PasswordPolicy,
}

/// Username handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsernameConfiguration {
    /// Whether usernames and aliases are case sensitive.
    pub case_sensitive: bool,
}

/// A channel used to recover an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecoveryMechanism {
    /// Recovery through a verified email address.
    #[serde(rename = "verified_email")]
    VerifiedEmail,
    /// Recovery through a verified phone number.
    #[serde(rename = "verified_phone_number")]
    VerifiedPhoneNumber,
    /// Only an administrator can recover the account.
    #[serde(rename = "admin_only")]
    AdminOnly,
}

/// A prioritized recovery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecoveryOption {
    /// The channel.
    pub name: RecoveryMechanism,
    /// Priority (1 is tried first).
    pub priority: u8,
}

/// Account recovery channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRecoverySetting {
    /// Ordered recovery channels.
    pub recovery_mechanisms: Vec<RecoveryOption>,
}

/// Self sign-up switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdminCreateUserConfig {
    /// When `true`, only administrators may create users.
    pub allow_admin_create_user_only: bool,
}

/// How verification codes are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerificationMessageTemplate {
    /// `CONFIRM_WITH_CODE` or `CONFIRM_WITH_LINK`.
    pub default_email_option: String,
}

/// Properties of an `AWS::Cognito::UserPool`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolProperties {
    /// Pool name.
    pub user_pool_name: String,
    /// Attributes usable as sign-in aliases besides the username.
    pub alias_attributes: Vec<String>,
    /// Attributes verified automatically on sign-up.
    pub auto_verified_attributes: Vec<String>,
    /// Username handling.
    pub username_configuration: UsernameConfiguration,
    /// Pool policies.
    pub policies: UserPoolPolicies,
    /// Account recovery.
    pub account_recovery_setting: AccountRecoverySetting,
    /// Self sign-up switch.
    pub admin_create_user_config: AdminCreateUserConfig,
    /// Verification message settings.
    pub verification_message_template: VerificationMessageTemplate,
    /// Resource tags (map-shaped for this resource type).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub user_pool_tags: BTreeMap<String, String>,
}

impl ResourceProperties for UserPoolProperties {
    const RESOURCE_TYPE: &'static str = "AWS::Cognito::UserPool";

    fn apply_tags(&mut self, tags: &[Tag]) {
        merge_tag_map(&mut self.user_pool_tags, tags);
    }
}

/// Authentication flows a client may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ExplicitAuthFlow {
    /// Server-side admin username/password auth.
    #[serde(rename = "ALLOW_ADMIN_USER_PASSWORD_AUTH")]
    AdminUserPassword,
    /// Custom auth challenges.
    #[serde(rename = "ALLOW_CUSTOM_AUTH")]
    Custom,
    /// Plain username/password auth.
    #[serde(rename = "ALLOW_USER_PASSWORD_AUTH")]
    UserPassword,
    /// Secure remote password auth.
    #[serde(rename = "ALLOW_USER_SRP_AUTH")]
    UserSrp,
    /// Refresh-token exchange.
    #[serde(rename = "ALLOW_REFRESH_TOKEN_AUTH")]
    RefreshToken,
}

/// Units for token validity values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenTimeUnit {
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days.
    Days,
}

/// Units applied to each token validity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenValidityUnits {
    /// Unit of `AccessTokenValidity`.
    pub access_token: TokenTimeUnit,
    /// Unit of `IdTokenValidity`.
    pub id_token: TokenTimeUnit,
    /// Unit of `RefreshTokenValidity`.
    pub refresh_token: TokenTimeUnit,
}

/// Whether sign-in errors reveal that a user does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PreventUserExistenceErrors {
    /// Return generic errors.
    Enabled,
    /// Return `UserNotFoundException`.
    Legacy,
}

/// Properties of an `AWS::Cognito::UserPoolClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolClientProperties {
    /// Owning pool.
    pub user_pool_id: CfnValue,
    /// Client name.
    pub client_name: String,
    /// Whether a client secret is generated.
    pub generate_secret: bool,
    /// Allowed auth flows.
    pub explicit_auth_flows: Vec<ExplicitAuthFlow>,
    /// Access token lifetime, in `token_validity_units.access_token`.
    pub access_token_validity: u32,
    /// ID token lifetime, in `token_validity_units.id_token`.
    pub id_token_validity: u32,
    /// Refresh token lifetime, in `token_validity_units.refresh_token`.
    pub refresh_token_validity: u32,
    /// Units for the three validity values.
    pub token_validity_units: TokenValidityUnits,
    /// Whether refresh tokens can be revoked.
    pub enable_token_revocation: bool,
    /// User-existence error behavior.
    pub prevent_user_existence_errors: PreventUserExistenceErrors,
    /// Identity providers the client may federate through.
    pub supported_identity_providers: Vec<String>,
}

impl ResourceProperties for UserPoolClientProperties {
    const RESOURCE_TYPE: &'static str = "AWS::Cognito::UserPoolClient";
}

/// Name of the pool's built-in identity provider.
pub const NATIVE_IDENTITY_PROVIDER: &str = "COGNITO";

/// Attribute exposing a pool client's generated secret.
pub const CLIENT_SECRET_ATTRIBUTE: &str = "ClientSecret";

//! Authentication stack: user pool, app client, and published identifiers.

use std::time::Duration;

use finance_infra_core::{CognitoConfig, DeployEnvironment};
use finance_infra_model::cognito::{
    AccountRecoverySetting, AdminCreateUserConfig, CLIENT_SECRET_ATTRIBUTE, ExplicitAuthFlow,
    NATIVE_IDENTITY_PROVIDER, PasswordPolicy, PreventUserExistenceErrors, RecoveryMechanism,
    RecoveryOption, TokenTimeUnit, TokenValidityUnits, UserPoolClientProperties,
    UserPoolPolicies, UserPoolProperties, UsernameConfiguration, VerificationMessageTemplate,
};
use finance_infra_model::{RemovalPolicy, Tag};
use tracing::info;
use typed_builder::TypedBuilder;

use crate::error::SynthResult;
use crate::namespace::ParameterNamespace;
use crate::stack::{ResourceHandle, Stack};

/// Name of the authentication stack.
pub const AUTH_STACK_NAME: &str = "stack-finance-common-infra-cognito";

const DESCRIPTION: &str = "Cognito User Pool and Client for Finance Project";
const CREATED: &str = "20251026";
const NAME_TAG: &str = "cognito-finance-common";

const USER_POOL_ID: &str = "FinanceCommonUserPool";
const CLIENT_ID: &str = "FinanceCommonUserPoolClient";

const MIN_PASSWORD_LENGTH: u8 = 8;
const TEMPORARY_PASSWORD_VALIDITY_DAYS: u8 = 7;
const ACCESS_TOKEN_VALIDITY: Duration = Duration::from_secs(30 * 60);
const ID_TOKEN_VALIDITY: Duration = Duration::from_secs(30 * 60);
const REFRESH_TOKEN_VALIDITY: Duration = Duration::from_secs(5 * 24 * 60 * 60);

/// Leaf names of the published parameters, relative to the prefix.
pub const USER_POOL_ID_PARAMETER: &str = "user_pool_id";
/// See [`USER_POOL_ID_PARAMETER`].
pub const CLIENT_ID_PARAMETER: &str = "client_id";
/// See [`USER_POOL_ID_PARAMETER`].
pub const CLIENT_SECRET_PARAMETER: &str = "client_secret";

/// Inputs of the authentication stack.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct AuthStackProps {
    /// User pool name.
    #[builder(setter(into))]
    pub user_pool_name: String,
    /// App client name.
    #[builder(setter(into))]
    pub client_name: String,
    /// Parameter prefix, e.g. `/finance/common`.
    #[builder(setter(into))]
    pub ssm_prefix: String,
    /// Environment label for tagging.
    #[builder(setter(into))]
    pub environment: String,
}

impl AuthStackProps {
    /// Slice the authentication settings out of the configuration document.
    #[must_use]
    pub fn from_config(cognito: &CognitoConfig, environment: &str) -> Self {
        Self {
            user_pool_name: cognito.user_pool_name.clone(),
            client_name: cognito.client_name.clone(),
            ssm_prefix: cognito.ssm_prefix.clone(),
            environment: environment.to_owned(),
        }
    }

    fn parameter_path(&self, leaf: &str) -> String {
        format!("{}/{leaf}", self.ssm_prefix)
    }
}

/// The synthesized authentication stack.
#[derive(Debug, Clone)]
pub struct AuthStack {
    stack: Stack,
    user_pool: ResourceHandle,
    client: ResourceHandle,
}

impl AuthStack {
    /// Declare the pool and client and publish their identifiers.
    pub fn new(
        props: &AuthStackProps,
        target: DeployEnvironment,
        namespace: &mut ParameterNamespace,
    ) -> SynthResult<Self> {
        let mut stack = Stack::new(
            AUTH_STACK_NAME,
            target,
            Some(DESCRIPTION.to_owned()),
            vec![
                Tag::new("Environment", &props.environment),
                Tag::new("Created", CREATED),
                Tag::new("Name", NAME_TAG),
            ],
        );

        let user_pool = stack.add_resource(
            USER_POOL_ID,
            user_pool_properties(&props.user_pool_name),
            Some(RemovalPolicy::Retain),
        )?;
        let client = stack.add_resource(
            CLIENT_ID,
            client_properties(&user_pool, &props.client_name),
            None,
        )?;

        stack.publish_parameter(
            namespace,
            "UserPoolIdParameter",
            &props.parameter_path(USER_POOL_ID_PARAMETER),
            user_pool.reference(),
            "Cognito User Pool ID for Finance Project",
            false,
        )?;
        stack.publish_parameter(
            namespace,
            "ClientIdParameter",
            &props.parameter_path(CLIENT_ID_PARAMETER),
            client.reference(),
            "Cognito User Pool Client ID for Finance Project",
            false,
        )?;
        // TODO: switch to a Secrets Manager secret once the backend reads it from there.
        stack.publish_parameter(
            namespace,
            "ClientSecretParameter",
            &props.parameter_path(CLIENT_SECRET_PARAMETER),
            client.attribute(CLIENT_SECRET_ATTRIBUTE),
            "Cognito User Pool Client Secret",
            true,
        )?;

        stack.add_output("UserPoolId", user_pool.reference(), Some("Cognito User Pool ID"))?;
        stack.add_output(
            "UserPoolClientId",
            client.reference(),
            Some("Cognito User Pool Client ID"),
        )?;

        info!(
            stack = AUTH_STACK_NAME,
            user_pool = %props.user_pool_name,
            prefix = %props.ssm_prefix,
            "constructed authentication stack"
        );
        Ok(Self {
            stack,
            user_pool,
            client,
        })
    }

    /// Handle to the user pool.
    #[must_use]
    pub fn user_pool(&self) -> &ResourceHandle {
        &self.user_pool
    }

    /// Handle to the app client.
    #[must_use]
    pub fn client(&self) -> &ResourceHandle {
        &self.client
    }

    /// The underlying stack.
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Consume into the underlying stack.
    #[must_use]
    pub fn into_stack(self) -> Stack {
        self.stack
    }
}

fn user_pool_properties(name: &str) -> UserPoolProperties {
    UserPoolProperties {
        user_pool_name: name.to_owned(),
        // Username sign-in plus a verified email alias.
        alias_attributes: vec!["email".to_owned()],
        auto_verified_attributes: vec!["email".to_owned()],
        username_configuration: UsernameConfiguration {
            case_sensitive: false,
        },
        policies: UserPoolPolicies {
            password_policy: PasswordPolicy {
                minimum_length: MIN_PASSWORD_LENGTH,
                require_lowercase: true,
                require_uppercase: true,
                require_numbers: true,
                require_symbols: true,
                temporary_password_validity_days: TEMPORARY_PASSWORD_VALIDITY_DAYS,
            },
        },
        account_recovery_setting: AccountRecoverySetting {
            recovery_mechanisms: vec![RecoveryOption {
                name: RecoveryMechanism::VerifiedEmail,
                priority: 1,
            }],
        },
        admin_create_user_config: AdminCreateUserConfig {
            allow_admin_create_user_only: false,
        },
        verification_message_template: VerificationMessageTemplate {
            default_email_option: "CONFIRM_WITH_CODE".to_owned(),
        },
        user_pool_tags: std::collections::BTreeMap::new(),
    }
}

fn client_properties(user_pool: &ResourceHandle, name: &str) -> UserPoolClientProperties {
    UserPoolClientProperties {
        user_pool_id: user_pool.reference(),
        client_name: name.to_owned(),
        generate_secret: true,
        explicit_auth_flows: vec![
            ExplicitAuthFlow::AdminUserPassword,
            ExplicitAuthFlow::RefreshToken,
        ],
        access_token_validity: minutes(ACCESS_TOKEN_VALIDITY),
        id_token_validity: minutes(ID_TOKEN_VALIDITY),
        refresh_token_validity: minutes(REFRESH_TOKEN_VALIDITY),
        token_validity_units: TokenValidityUnits {
            access_token: TokenTimeUnit::Minutes,
            id_token: TokenTimeUnit::Minutes,
            refresh_token: TokenTimeUnit::Minutes,
        },
        enable_token_revocation: true,
        prevent_user_existence_errors: PreventUserExistenceErrors::Enabled,
        supported_identity_providers: vec![NATIVE_IDENTITY_PROVIDER.to_owned()],
    }
}

fn minutes(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs() / 60).unwrap_or(u32::MAX)
}

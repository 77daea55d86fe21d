//! Dashboard site stack: asset bucket and CDN distribution in front of it and
//! of the separately deployed backend API.

use std::collections::BTreeMap;

use finance_infra_core::config::DEFAULT_API_OUTPUT_KEY;
use finance_infra_core::{DashboardConfig, DeployEnvironment};
use finance_infra_model::cloudfront::{
    self, ALL_VIEWER_EXCEPT_HOST_HEADER_POLICY_ID, CACHING_DISABLED_POLICY_ID,
    CACHING_OPTIMIZED_POLICY_ID, CacheBehavior, CustomOriginConfig, DistributionConfig,
    DistributionProperties, FunctionAssociation, FunctionEventType, FunctionProperties, Origin,
    OriginAccessControlProperties, OriginProtocolPolicy, S3OriginConfig, ViewerCertificate,
    ViewerProtocolPolicy,
};
use finance_infra_model::s3::{
    BucketPolicyProperties, BucketProperties, Effect, PolicyDocument, PolicyStatement,
};
use finance_infra_model::{CfnValue, RemovalPolicy, Tag};
use tracing::info;
use typed_builder::TypedBuilder;

use crate::endpoint::ApiEndpoint;
use crate::error::SynthResult;
use crate::registry::{OutputRef, StackOutputRegistry};
use crate::stack::{ResourceHandle, Stack};

/// Name of the site stack.
pub const SITE_STACK_NAME: &str = "stack-finance-dashboard-infra-main";

const DESCRIPTION: &str =
    "S3 + CloudFront for the Finance Dashboard frontend (imports the API URL from the backend stack)";
const CREATED: &str = "20251109";
const NAME_TAG: &str = "dashboard-main";

const BUCKET_ID: &str = "SiteBucket";
const ORIGIN_ACCESS_CONTROL_ID: &str = "SiteOriginAccessControl";
const SPA_REWRITE_ID: &str = "SiteSpaRewriteFunction";
const DISTRIBUTION_ID: &str = "SiteDistribution";
const BUCKET_POLICY_ID: &str = "SiteBucketPolicy";

const S3_ORIGIN: &str = "S3Origin";
const API_ORIGIN: &str = "ApiOrigin";

/// Path pattern routed to the backend API.
pub const API_PATH_PATTERN: &str = "/api/*";

const INDEX_DOCUMENT: &str = "index.html";
const MAX_NAME_LEN: usize = 64;

/// Viewer-request rewrite for client-side routes: a path whose last segment
/// has no extension is served the index document. Runs on the default
/// behavior only, so API responses reach the viewer untouched.
const SPA_REWRITE_CODE: &str = r"function handler(event) {
  var request = event.request;
  var last = request.uri.split('/').pop();
  if (last.indexOf('.') === -1) {
    request.uri = '/index.html';
  }
  return request;
}
";

/// Inputs of the site stack.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct SiteStackProps {
    /// Public domain of the dashboard.
    #[builder(setter(into))]
    pub domain_name: String,
    /// ACM certificate covering `domain_name` (us-east-1).
    #[builder(setter(into))]
    pub acm_certificate_arn: String,
    /// Asset bucket name.
    #[builder(setter(into))]
    pub s3_bucket_name: String,
    /// Normalized origin path inside the bucket; empty for the root.
    #[builder(setter(into), default)]
    pub s3_origin_path: String,
    /// Separately deployed backend stack publishing the API URL.
    #[builder(setter(into))]
    pub backend_stack_name: String,
    /// Output key of the API URL on the backend stack.
    #[builder(setter(into), default = DEFAULT_API_OUTPUT_KEY.to_owned())]
    pub backend_api_output_key: String,
    /// Environment label for tagging.
    #[builder(setter(into))]
    pub environment: String,
}

impl SiteStackProps {
    /// Slice the site settings out of the configuration document.
    #[must_use]
    pub fn from_config(dashboard: &DashboardConfig, environment: &str) -> Self {
        Self {
            domain_name: dashboard.domain_name.clone(),
            acm_certificate_arn: dashboard.acm_certificate_arn.clone(),
            s3_bucket_name: dashboard.s3_bucket_name.clone(),
            s3_origin_path: dashboard.s3_origin_path.clone(),
            backend_stack_name: dashboard.backend_stack_name.clone(),
            backend_api_output_key: dashboard.backend_api_output_key.clone(),
            environment: environment.to_owned(),
        }
    }

    /// The backend output this stack imports.
    #[must_use]
    pub fn api_output(&self) -> OutputRef {
        OutputRef::new(&self.backend_stack_name, &self.backend_api_output_key)
    }
}

/// The synthesized site stack.
#[derive(Debug, Clone)]
pub struct SiteStack {
    stack: Stack,
}

impl SiteStack {
    /// Resolve the backend API URL, then declare the bucket and distribution.
    ///
    /// Fails with a cross-stack error when the backend stack or its API
    /// output is unknown to `registry`; nothing is declared in that case.
    pub fn new(
        props: &SiteStackProps,
        target: DeployEnvironment,
        registry: &StackOutputRegistry,
    ) -> SynthResult<Self> {
        let mut stack = Stack::new(
            SITE_STACK_NAME,
            target,
            Some(DESCRIPTION.to_owned()),
            vec![
                Tag::new("Environment", &props.environment),
                Tag::new("Created", CREATED),
                Tag::new("Name", NAME_TAG),
            ],
        );

        let api: ApiEndpoint = stack.import_output(registry, props.api_output())?;

        let bucket = stack.add_resource(
            BUCKET_ID,
            BucketProperties::private(&props.s3_bucket_name),
            Some(RemovalPolicy::Retain),
        )?;
        let access_control = stack.add_resource(
            ORIGIN_ACCESS_CONTROL_ID,
            OriginAccessControlProperties::s3_always_sign(
                bucket_scoped_name(&props.s3_bucket_name, "-oac"),
                format!("Signs CloudFront requests to {}", props.s3_bucket_name),
            ),
            None,
        )?;
        let spa_rewrite = stack.add_resource(
            SPA_REWRITE_ID,
            FunctionProperties::javascript(
                bucket_scoped_name(&props.s3_bucket_name, "-spa-rewrite"),
                "Serves index.html for client-side routes",
                SPA_REWRITE_CODE,
            ),
            None,
        )?;
        let distribution = stack.add_resource(
            DISTRIBUTION_ID,
            distribution_properties(props, &api, &bucket, &access_control, &spa_rewrite),
            None,
        )?;
        stack.add_resource(
            BUCKET_POLICY_ID,
            bucket_policy_properties(&bucket, &distribution),
            None,
        )?;

        stack.add_output("BucketName", bucket.reference(), Some("Static asset bucket"))?;
        stack.add_output(
            "DistributionId",
            distribution.reference(),
            Some("CloudFront distribution ID"),
        )?;
        stack.add_output(
            "DistributionDomainName",
            distribution.attribute("DomainName"),
            Some("CloudFront distribution domain name"),
        )?;
        stack.add_output(
            "SiteUrl",
            CfnValue::literal(format!("https://{}", props.domain_name)),
            Some("Dashboard URL"),
        )?;
        stack.add_output(
            "ApiUrl",
            CfnValue::literal(api.url()),
            Some("Backend API URL imported from the backend stack"),
        )?;

        info!(
            stack = SITE_STACK_NAME,
            domain = %props.domain_name,
            backend = %props.backend_stack_name,
            api_host = api.host(),
            "constructed site stack"
        );
        Ok(Self { stack })
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

/// Account-unique CloudFront names: letters, digits, `-` and `_`, at most 64
/// characters.
fn bucket_scoped_name(bucket_name: &str, suffix: &str) -> String {
    let stem: String = bucket_name
        .chars()
        .map(|c| if c == '.' { '-' } else { c })
        .take(MAX_NAME_LEN.saturating_sub(suffix.len()))
        .collect();
    format!("{stem}{suffix}")
}

fn distribution_properties(
    props: &SiteStackProps,
    api: &ApiEndpoint,
    bucket: &ResourceHandle,
    access_control: &ResourceHandle,
    spa_rewrite: &ResourceHandle,
) -> DistributionProperties {
    let s3_origin = Origin {
        id: S3_ORIGIN.to_owned(),
        domain_name: bucket.attribute("RegionalDomainName"),
        origin_path: (!props.s3_origin_path.is_empty()).then(|| props.s3_origin_path.clone()),
        s3_origin_config: Some(S3OriginConfig::default()),
        origin_access_control_id: Some(access_control.attribute("Id")),
        custom_origin_config: None,
    };
    let api_origin = Origin {
        id: API_ORIGIN.to_owned(),
        domain_name: CfnValue::literal(api.host()),
        origin_path: api.stage_path().map(str::to_owned),
        s3_origin_config: None,
        origin_access_control_id: None,
        custom_origin_config: Some(CustomOriginConfig {
            https_port: 443,
            origin_protocol_policy: OriginProtocolPolicy::HttpsOnly,
            origin_ssl_protocols: vec!["TLSv1.2".to_owned()],
        }),
    };

    DistributionProperties {
        distribution_config: DistributionConfig {
            enabled: true,
            comment: format!("Finance Dashboard ({})", props.domain_name),
            aliases: vec![props.domain_name.clone()],
            default_root_object: INDEX_DOCUMENT.to_owned(),
            http_version: "http2and3".to_owned(),
            ipv6_enabled: true,
            price_class: "PriceClass_100".to_owned(),
            viewer_certificate: ViewerCertificate {
                acm_certificate_arn: props.acm_certificate_arn.clone(),
                ssl_support_method: "sni-only".to_owned(),
                minimum_protocol_version: "TLSv1.2_2021".to_owned(),
            },
            origins: vec![s3_origin, api_origin],
            default_cache_behavior: CacheBehavior {
                path_pattern: None,
                target_origin_id: S3_ORIGIN.to_owned(),
                viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
                allowed_methods: cloudfront::read_and_options_methods(),
                cached_methods: cloudfront::read_methods(),
                cache_policy_id: CACHING_OPTIMIZED_POLICY_ID.to_owned(),
                origin_request_policy_id: None,
                compress: true,
                function_associations: vec![FunctionAssociation {
                    event_type: FunctionEventType::ViewerRequest,
                    function_arn: spa_rewrite.attribute("FunctionARN"),
                }],
            },
            cache_behaviors: vec![CacheBehavior {
                path_pattern: Some(API_PATH_PATTERN.to_owned()),
                target_origin_id: API_ORIGIN.to_owned(),
                viewer_protocol_policy: ViewerProtocolPolicy::HttpsOnly,
                allowed_methods: cloudfront::all_methods(),
                cached_methods: cloudfront::read_methods(),
                cache_policy_id: CACHING_DISABLED_POLICY_ID.to_owned(),
                origin_request_policy_id: Some(ALL_VIEWER_EXCEPT_HOST_HEADER_POLICY_ID.to_owned()),
                compress: true,
                function_associations: Vec::new(),
            }],
        },
        tags: Vec::new(),
    }
}

fn bucket_policy_properties(
    bucket: &ResourceHandle,
    distribution: &ResourceHandle,
) -> BucketPolicyProperties {
    let source_arn = CfnValue::sub(format!(
        "arn:${{AWS::Partition}}:cloudfront::${{AWS::AccountId}}:distribution/${{{}}}",
        distribution.logical_id()
    ));
    BucketPolicyProperties {
        bucket: bucket.reference(),
        policy_document: PolicyDocument::new(vec![PolicyStatement {
            sid: "AllowCloudFrontServicePrincipalReadOnly".to_owned(),
            effect: Effect::Allow,
            principal: BTreeMap::from([(
                "Service".to_owned(),
                "cloudfront.amazonaws.com".to_owned(),
            )]),
            action: vec!["s3:GetObject".to_owned()],
            resource: CfnValue::sub(format!("${{{}.Arn}}/*", bucket.logical_id())),
            condition: BTreeMap::from([(
                "StringEquals".to_owned(),
                BTreeMap::from([("AWS:SourceArn".to_owned(), source_arn)]),
            )]),
        }]),
    }
}

//! `AWS::CloudFront::Distribution`, `AWS::CloudFront::OriginAccessControl`
//! and `AWS::CloudFront::Function` properties.

use serde::Serialize;

use crate::intrinsic::CfnValue;
use crate::tag::{merge_tag_list, Tag};
use crate::template::ResourceProperties;

/// AWS managed cache policy: `Managed-CachingOptimized`.
pub const CACHING_OPTIMIZED_POLICY_ID: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

/// AWS managed cache policy: `Managed-CachingDisabled`.
pub const CACHING_DISABLED_POLICY_ID: &str = "4135ea2d-6df8-44a3-9df3-4b5a84be39ad";

/// AWS managed origin request policy: `Managed-AllViewerExceptHostHeader`.
pub const ALL_VIEWER_EXCEPT_HOST_HEADER_POLICY_ID: &str = "b689b0a8-53d0-40ab-baf2-68738e2966ac";

/// Properties of an `AWS::CloudFront::OriginAccessControl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OriginAccessControlProperties {
    /// Control configuration.
    pub origin_access_control_config: OriginAccessControlConfig,
}

/// Origin access control settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OriginAccessControlConfig {
    /// Unique control name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Origin kind (`s3`).
    pub origin_access_control_origin_type: String,
    /// `always`, `never` or `no-override`.
    pub signing_behavior: String,
    /// Always `sigv4`.
    pub signing_protocol: String,
}

impl OriginAccessControlProperties {
    /// A control that signs every request to an S3 origin.
    #[must_use]
    pub fn s3_always_sign(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            origin_access_control_config: OriginAccessControlConfig {
                name: name.into(),
                description: description.into(),
                origin_access_control_origin_type: "s3".to_owned(),
                signing_behavior: "always".to_owned(),
                signing_protocol: "sigv4".to_owned(),
            },
        }
    }
}

impl ResourceProperties for OriginAccessControlProperties {
    const RESOURCE_TYPE: &'static str = "AWS::CloudFront::OriginAccessControl";
}

/// JavaScript runtime of CloudFront Functions.
pub const FUNCTION_RUNTIME: &str = "cloudfront-js-2.0";

/// Function settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionConfig {
    /// Comment.
    pub comment: String,
    /// Runtime, see [`FUNCTION_RUNTIME`].
    pub runtime: String,
}

/// Properties of an `AWS::CloudFront::Function`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionProperties {
    /// Function name, unique in the account.
    pub name: String,
    /// Publish to the live stage on every update.
    pub auto_publish: bool,
    /// JavaScript source.
    pub function_code: String,
    /// Function settings.
    pub function_config: FunctionConfig,
}

impl FunctionProperties {
    /// An auto-published function on the current JavaScript runtime.
    #[must_use]
    pub fn javascript(
        name: impl Into<String>,
        comment: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            auto_publish: true,
            function_code: code.into(),
            function_config: FunctionConfig {
                comment: comment.into(),
                runtime: FUNCTION_RUNTIME.to_owned(),
            },
        }
    }
}

impl ResourceProperties for FunctionProperties {
    const RESOURCE_TYPE: &'static str = "AWS::CloudFront::Function";
}

/// Stage of the request/response cycle a function runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionEventType {
    /// Before the cache lookup.
    ViewerRequest,
    /// Before the response is returned to the viewer.
    ViewerResponse,
}

/// A function attached to a cache behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionAssociation {
    /// When the function runs.
    pub event_type: FunctionEventType,
    /// ARN of the published function.
    #[serde(rename = "FunctionARN")]
    pub function_arn: CfnValue,
}

/// How viewers may reach a cache behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    /// HTTP and HTTPS.
    AllowAll,
    /// HTTPS only, HTTP rejected.
    HttpsOnly,
    /// HTTP redirected to HTTPS.
    RedirectToHttps,
}

/// Protocol CloudFront uses towards a custom origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginProtocolPolicy {
    /// HTTP only.
    HttpOnly,
    /// HTTPS only.
    HttpsOnly,
    /// Same as the viewer.
    MatchViewer,
}

/// S3 origin settings. The identity is empty when an origin access control is used.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3OriginConfig {
    /// Legacy origin access identity; empty with origin access control.
    pub origin_access_identity: String,
}

/// Custom (HTTP) origin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomOriginConfig {
    /// HTTPS port.
    #[serde(rename = "HTTPSPort")]
    pub https_port: u16,
    /// Origin protocol policy.
    #[serde(rename = "OriginProtocolPolicy")]
    pub origin_protocol_policy: OriginProtocolPolicy,
    /// TLS versions used towards the origin.
    #[serde(rename = "OriginSSLProtocols")]
    pub origin_ssl_protocols: Vec<String>,
}

/// A distribution origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Origin {
    /// Origin ID referenced by cache behaviors.
    pub id: String,
    /// Origin host.
    pub domain_name: CfnValue,
    /// Path prefix appended to every origin request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    /// Set for S3 origins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_origin_config: Option<S3OriginConfig>,
    /// Origin access control for S3 origins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_access_control_id: Option<CfnValue>,
    /// Set for custom origins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_origin_config: Option<CustomOriginConfig>,
}

/// A cache behavior; `path_pattern` is `None` for the default behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheBehavior {
    /// Path pattern this behavior matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_pattern: Option<String>,
    /// Origin requests are forwarded to.
    pub target_origin_id: String,
    /// Viewer protocol policy.
    pub viewer_protocol_policy: ViewerProtocolPolicy,
    /// Methods forwarded to the origin.
    pub allowed_methods: Vec<String>,
    /// Methods whose responses are cached.
    pub cached_methods: Vec<String>,
    /// Cache policy.
    pub cache_policy_id: String,
    /// Origin request policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_request_policy_id: Option<String>,
    /// Whether responses are compressed.
    pub compress: bool,
    /// Functions run for requests matching this behavior.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub function_associations: Vec<FunctionAssociation>,
}

/// TLS certificate presented to viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ViewerCertificate {
    /// ACM certificate ARN (us-east-1).
    pub acm_certificate_arn: String,
    /// `sni-only` or `vip`.
    pub ssl_support_method: String,
    /// Minimum viewer TLS version.
    pub minimum_protocol_version: String,
}

/// The distribution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionConfig {
    /// Whether the distribution serves traffic.
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    /// Comment.
    #[serde(rename = "Comment")]
    pub comment: String,
    /// Alternate domain names.
    #[serde(rename = "Aliases")]
    pub aliases: Vec<String>,
    /// Object returned for `/`.
    #[serde(rename = "DefaultRootObject")]
    pub default_root_object: String,
    /// HTTP versions offered to viewers.
    #[serde(rename = "HttpVersion")]
    pub http_version: String,
    /// Whether IPv6 is enabled.
    #[serde(rename = "IPV6Enabled")]
    pub ipv6_enabled: bool,
    /// Edge location price class.
    #[serde(rename = "PriceClass")]
    pub price_class: String,
    /// Viewer certificate.
    #[serde(rename = "ViewerCertificate")]
    pub viewer_certificate: ViewerCertificate,
    /// Origins.
    #[serde(rename = "Origins")]
    pub origins: Vec<Origin>,
    /// Behavior for unmatched paths.
    #[serde(rename = "DefaultCacheBehavior")]
    pub default_cache_behavior: CacheBehavior,
    /// Path-specific behaviors, matched in order.
    #[serde(rename = "CacheBehaviors", skip_serializing_if = "Vec::is_empty")]
    pub cache_behaviors: Vec<CacheBehavior>,
}

/// Properties of an `AWS::CloudFront::Distribution`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionProperties {
    /// Distribution configuration.
    pub distribution_config: DistributionConfig,
    /// Resource tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ResourceProperties for DistributionProperties {
    const RESOURCE_TYPE: &'static str = "AWS::CloudFront::Distribution";

    fn apply_tags(&mut self, tags: &[Tag]) {
        merge_tag_list(&mut self.tags, tags);
    }
}

/// `GET`, `HEAD`.
#[must_use]
pub fn read_methods() -> Vec<String> {
    ["GET", "HEAD"].map(str::to_owned).to_vec()
}

/// `GET`, `HEAD`, `OPTIONS`.
#[must_use]
pub fn read_and_options_methods() -> Vec<String> {
    ["GET", "HEAD", "OPTIONS"].map(str::to_owned).to_vec()
}

/// Every method CloudFront can forward.
#[must_use]
pub fn all_methods() -> Vec<String> {
    ["GET", "HEAD", "OPTIONS", "PUT", "PATCH", "POST", "DELETE"]
        .map(str::to_owned)
        .to_vec()
}

//! `AWS::S3::Bucket` and `AWS::S3::BucketPolicy` properties.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::intrinsic::CfnValue;
use crate::tag::{merge_tag_list, Tag};
use crate::template::ResourceProperties;

/// Public access block settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicAccessBlockConfiguration {
    /// Reject public ACLs on PUT.
    pub block_public_acls: bool,
    /// Reject public bucket policies.
    pub block_public_policy: bool,
    /// Ignore existing public ACLs.
    pub ignore_public_acls: bool,
    /// Restrict cross-account access when a public policy exists.
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlockConfiguration {
    /// Every public access path blocked.
    pub const BLOCK_ALL: Self = Self {
        block_public_acls: true,
        block_public_policy: true,
        ignore_public_acls: true,
        restrict_public_buckets: true,
    };
}

/// Default server-side encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSideEncryptionByDefault {
    /// `AES256` or `aws:kms`.
    #[serde(rename = "SSEAlgorithm")]
    pub sse_algorithm: String,
}

/// A server-side encryption rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerSideEncryptionRule {
    /// Default encryption applied to new objects.
    pub server_side_encryption_by_default: ServerSideEncryptionByDefault,
}

/// Bucket encryption configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketEncryption {
    /// Encryption rules.
    pub server_side_encryption_configuration: Vec<ServerSideEncryptionRule>,
}

impl BucketEncryption {
    /// S3-managed keys (SSE-S3).
    #[must_use]
    pub fn s3_managed() -> Self {
        Self {
            server_side_encryption_configuration: vec![ServerSideEncryptionRule {
                server_side_encryption_by_default: ServerSideEncryptionByDefault {
                    sse_algorithm: "AES256".to_owned(),
                },
            }],
        }
    }
}

/// An object ownership rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OwnershipControlsRule {
    /// `BucketOwnerEnforced`, `BucketOwnerPreferred` or `ObjectWriter`.
    pub object_ownership: String,
}

/// Object ownership controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OwnershipControls {
    /// Ownership rules.
    pub rules: Vec<OwnershipControlsRule>,
}

/// Properties of an `AWS::S3::Bucket`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketProperties {
    /// Physical bucket name.
    pub bucket_name: String,
    /// Public access block.
    pub public_access_block_configuration: PublicAccessBlockConfiguration,
    /// Default encryption.
    pub bucket_encryption: BucketEncryption,
    /// Object ownership.
    pub ownership_controls: OwnershipControls,
    /// Resource tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl BucketProperties {
    /// A private, SSE-S3 encrypted bucket with ACLs disabled.
    #[must_use]
    pub fn private(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            public_access_block_configuration: PublicAccessBlockConfiguration::BLOCK_ALL,
            bucket_encryption: BucketEncryption::s3_managed(),
            ownership_controls: OwnershipControls {
                rules: vec![OwnershipControlsRule {
                    object_ownership: "BucketOwnerEnforced".to_owned(),
                }],
            },
            tags: Vec::new(),
        }
    }
}

impl ResourceProperties for BucketProperties {
    const RESOURCE_TYPE: &'static str = "AWS::S3::Bucket";

    fn apply_tags(&mut self, tags: &[Tag]) {
        merge_tag_list(&mut self.tags, tags);
    }
}

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Grant.
    Allow,
    /// Explicit deny.
    Deny,
}

/// One IAM policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    /// Statement identifier.
    pub sid: String,
    /// Allow or deny.
    pub effect: Effect,
    /// Principal map, e.g. `{"Service": "cloudfront.amazonaws.com"}`.
    pub principal: BTreeMap<String, String>,
    /// Actions covered.
    pub action: Vec<String>,
    /// Resource the statement applies to.
    pub resource: CfnValue,
    /// Conditions keyed by operator then condition key.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub condition: BTreeMap<String, BTreeMap<String, CfnValue>>,
}

/// An IAM policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Always `2012-10-17`.
    pub version: String,
    /// Statements.
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// A document with the current policy language version.
    #[must_use]
    pub fn new(statement: Vec<PolicyStatement>) -> Self {
        Self {
            version: "2012-10-17".to_owned(),
            statement,
        }
    }
}

/// Properties of an `AWS::S3::BucketPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicyProperties {
    /// Bucket the policy is attached to.
    pub bucket: CfnValue,
    /// Policy document.
    pub policy_document: PolicyDocument,
}

impl ResourceProperties for BucketPolicyProperties {
    const RESOURCE_TYPE: &'static str = "AWS::S3::BucketPolicy";
}

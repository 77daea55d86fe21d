//! Template documents and resource declarations.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::intrinsic::CfnValue;
use crate::tag::Tag;

/// The only template format version CloudFormation accepts.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Typed properties of one CloudFormation resource type.
pub trait ResourceProperties: Serialize {
    /// CloudFormation type name, e.g. `AWS::DynamoDB::Table`.
    const RESOURCE_TYPE: &'static str;

    /// Apply stack-level tags. Resources without a tag property ignore them.
    fn apply_tags(&mut self, _tags: &[Tag]) {}
}

/// What happens to a resource when it leaves its stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RemovalPolicy {
    /// The resource is deleted with the stack.
    Delete,
    /// The resource is orphaned and kept.
    Retain,
}

/// A resource entry in the `Resources` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceDeclaration {
    /// CloudFormation type name.
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties, serialized with sorted keys.
    pub properties: serde_json::Value,
    /// Policy applied when the resource is removed from the stack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<RemovalPolicy>,
    /// Policy applied when an update forces replacement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<RemovalPolicy>,
}

impl ResourceDeclaration {
    /// Serialize typed properties into a declaration.
    ///
    /// `Retain` is applied to both deletion and replacement so a replaced
    /// resource is orphaned rather than destroyed.
    pub fn new<P: ResourceProperties>(
        properties: &P,
        removal_policy: Option<RemovalPolicy>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            resource_type: P::RESOURCE_TYPE.to_owned(),
            properties: serde_json::to_value(properties)?,
            deletion_policy: removal_policy,
            update_replace_policy: removal_policy,
        })
    }

    /// Look up a top-level property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }
}

/// An entry in the `Outputs` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateOutput {
    /// Output value.
    pub value: CfnValue,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A complete CloudFormation template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// Always [`TEMPLATE_FORMAT_VERSION`].
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    /// Stack description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resources keyed by logical ID.
    pub resources: BTreeMap<String, ResourceDeclaration>,
    /// Outputs keyed by output name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, TemplateOutput>,
}

impl Template {
    /// Create an empty template.
    #[must_use]
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_owned(),
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }
}

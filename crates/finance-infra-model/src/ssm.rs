//! `AWS::SSM::Parameter` properties.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::intrinsic::CfnValue;
use crate::tag::{merge_tag_map, Tag};
use crate::template::ResourceProperties;

/// Parameter value type.
///
/// CloudFormation cannot create `SecureString` parameters, so a template can
/// only ever declare these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterType {
    /// A single string.
    String,
    /// A comma-separated list.
    StringList,
}

/// Parameter storage tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ParameterTier {
    /// Free tier, 4 KB values.
    #[default]
    Standard,
    /// Paid tier, 8 KB values and policies.
    Advanced,
    /// Let the service pick.
    #[serde(rename = "Intelligent-Tiering")]
    IntelligentTiering,
}

/// Properties of an `AWS::SSM::Parameter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterProperties {
    /// Fully qualified parameter name.
    pub name: String,
    /// Value type.
    #[serde(rename = "Type")]
    pub parameter_type: ParameterType,
    /// Parameter value.
    pub value: CfnValue,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Storage tier.
    pub tier: ParameterTier,
    /// Resource tags (map-shaped for this resource type).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl ParameterProperties {
    /// A standard-tier `String` parameter.
    #[must_use]
    pub fn string(name: impl Into<String>, value: CfnValue, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: ParameterType::String,
            value,
            description,
            tier: ParameterTier::Standard,
            tags: BTreeMap::new(),
        }
    }
}

impl ResourceProperties for ParameterProperties {
    const RESOURCE_TYPE: &'static str = "AWS::SSM::Parameter";

    fn apply_tags(&mut self, tags: &[Tag]) {
        merge_tag_map(&mut self.tags, tags);
    }
}

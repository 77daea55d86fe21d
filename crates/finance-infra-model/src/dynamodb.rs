//! `AWS::DynamoDB::Table` properties.
//!
//! Enum variants use idiomatic Rust naming with `#[serde(rename)]` mapping to
//! the `SCREAMING_SNAKE_CASE` values CloudFormation expects.

use serde::{Deserialize, Serialize};

use crate::tag::{merge_tag_list, Tag};
use crate::template::ResourceProperties;

/// Key type within a key schema element.
///
/// `Hash` denotes the partition key; `Range` denotes the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Partition key.
    #[serde(rename = "HASH")]
    Hash,
    /// Sort key.
    #[serde(rename = "RANGE")]
    Range,
}

/// Scalar attribute types allowed for key attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarAttributeType {
    /// String type.
    S,
    /// Number type.
    N,
    /// Binary type.
    B,
}

/// Billing mode for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BillingMode {
    /// Provisioned capacity mode with explicit RCU/WCU settings.
    #[serde(rename = "PROVISIONED")]
    Provisioned,
    /// On-demand capacity mode (pay per request).
    #[default]
    #[serde(rename = "PAY_PER_REQUEST")]
    PayPerRequest,
}

/// An element of the key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    /// The name of the key attribute.
    pub attribute_name: String,
    /// The role of the attribute in the key schema (`HASH` or `RANGE`).
    pub key_type: KeyType,
}

/// An attribute definition for an attribute used in the key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    /// The name of the attribute.
    pub attribute_name: String,
    /// The scalar data type of the attribute.
    pub attribute_type: ScalarAttributeType,
}

/// Continuous backup settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointInTimeRecoverySpecification {
    /// Whether point-in-time recovery is on.
    pub point_in_time_recovery_enabled: bool,
}

/// A composite primary key: partition key plus optional sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Partition key name and type.
    pub partition: (String, ScalarAttributeType),
    /// Sort key name and type.
    pub sort: Option<(String, ScalarAttributeType)>,
}

impl PrimaryKey {
    /// Key schema in `HASH`, `RANGE` order.
    #[must_use]
    pub fn key_schema(&self) -> Vec<KeySchemaElement> {
        let mut schema = vec![KeySchemaElement {
            attribute_name: self.partition.0.clone(),
            key_type: KeyType::Hash,
        }];
        if let Some((name, _)) = &self.sort {
            schema.push(KeySchemaElement {
                attribute_name: name.clone(),
                key_type: KeyType::Range,
            });
        }
        schema
    }

    /// Attribute definitions for every key attribute.
    #[must_use]
    pub fn attribute_definitions(&self) -> Vec<AttributeDefinition> {
        std::iter::once(&self.partition)
            .chain(self.sort.as_ref())
            .map(|(name, ty)| AttributeDefinition {
                attribute_name: name.clone(),
                attribute_type: *ty,
            })
            .collect()
    }
}

/// Properties of an `AWS::DynamoDB::Table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableProperties {
    /// Physical table name.
    pub table_name: String,
    /// Key schema.
    pub key_schema: Vec<KeySchemaElement>,
    /// Definitions of the key attributes.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Capacity billing mode.
    pub billing_mode: BillingMode,
    /// Continuous backups.
    pub point_in_time_recovery_specification: PointInTimeRecoverySpecification,
    /// Resource tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl TableProperties {
    /// An on-demand table keyed by `key`, with point-in-time recovery on.
    #[must_use]
    pub fn on_demand(table_name: impl Into<String>, key: &PrimaryKey) -> Self {
        Self {
            table_name: table_name.into(),
            key_schema: key.key_schema(),
            attribute_definitions: key.attribute_definitions(),
            billing_mode: BillingMode::PayPerRequest,
            point_in_time_recovery_specification: PointInTimeRecoverySpecification {
                point_in_time_recovery_enabled: true,
            },
            tags: Vec::new(),
        }
    }
}

impl ResourceProperties for TableProperties {
    const RESOURCE_TYPE: &'static str = "AWS::DynamoDB::Table";

    fn apply_tags(&mut self, tags: &[Tag]) {
        merge_tag_list(&mut self.tags, tags);
    }
}

//! Resource tags.
//!
//! CloudFormation resources disagree on how tags are shaped: most take a list
//! of `{Key, Value}` objects, a few (Cognito user pools, SSM parameters) take a
//! plain string map. Both shapes are filled from the same [`Tag`] list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A key-value tag associated with a resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    /// The tag key (up to 128 Unicode characters).
    pub key: String,
    /// The tag value (up to 256 Unicode characters).
    pub value: String,
}

impl Tag {
    /// Create a new tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Merge `tags` into a list-shaped tag property.
///
/// Keys already present on the resource win; the result is sorted by key.
pub fn merge_tag_list(target: &mut Vec<Tag>, tags: &[Tag]) {
    for tag in tags {
        if !target.iter().any(|t| t.key == tag.key) {
            target.push(tag.clone());
        }
    }
    target.sort();
}

/// Merge `tags` into a map-shaped tag property. Keys already present win.
pub fn merge_tag_map(target: &mut BTreeMap<String, String>, tags: &[Tag]) {
    for tag in tags {
        target
            .entry(tag.key.clone())
            .or_insert_with(|| tag.value.clone());
    }
}

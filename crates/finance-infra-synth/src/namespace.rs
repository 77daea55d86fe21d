//! The shared parameter namespace.
//!
//! Identifiers provisioned by this application are handed to collaborators
//! outside the repository through hierarchical parameters. The namespace has a
//! single writer: the first stack that publishes claims it, and any later
//! publish from a different stack is rejected.

use std::collections::BTreeMap;

use finance_infra_model::CfnValue;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{SynthError, SynthResult};

/// One published parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterEntry {
    /// Fully qualified parameter path.
    pub path: String,
    /// Stack declaring the parameter.
    pub owner_stack: String,
    /// Value, usually a deploy-time token.
    pub value: CfnValue,
    /// Whether the value is a credential stored without encryption.
    pub sensitive: bool,
}

/// Single-writer registry of published parameters.
#[derive(Debug, Clone, Default)]
pub struct ParameterNamespace {
    owner: Option<String>,
    entries: BTreeMap<String, ParameterEntry>,
}

impl ParameterNamespace {
    /// Create an empty, unowned namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `value` under `path` on behalf of `writer`.
    pub fn publish(
        &mut self,
        writer: &str,
        path: impl Into<String>,
        value: CfnValue,
        sensitive: bool,
    ) -> SynthResult<&ParameterEntry> {
        let path = path.into();

        let owner = self.owner.get_or_insert_with(|| writer.to_owned());
        if owner.as_str() != writer {
            return Err(SynthError::NamespaceOwnership {
                writer: writer.to_owned(),
                owner: owner.clone(),
                path,
            });
        }

        if self.entries.contains_key(&path) {
            return Err(SynthError::DuplicateParameter(path));
        }

        if sensitive {
            warn!(
                stack = writer,
                parameter = %path,
                "secret published as a plaintext String parameter; readers with ssm:GetParameter can see it"
            );
        } else {
            debug!(stack = writer, parameter = %path, "published parameter");
        }

        let entry = ParameterEntry {
            path: path.clone(),
            owner_stack: writer.to_owned(),
            value,
            sensitive,
        };
        Ok(self.entries.entry(path).or_insert(entry))
    }

    /// The stack owning the namespace, once something has been published.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Look up a published parameter.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ParameterEntry> {
        self.entries.get(path)
    }

    /// All entries, ordered by path.
    pub fn entries(&self) -> impl Iterator<Item = &ParameterEntry> {
        self.entries.values()
    }

    /// Number of published parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

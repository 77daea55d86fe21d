//! Published outputs of separately deployed stacks.
//!
//! A [`StackOutputRegistry`] holds the literal output values of stacks that
//! live outside this application (for example the backend API stack). Stacks
//! resolve them at synthesis time through [`StackOutputRegistry::require`],
//! which parses the raw string into a typed value and fails loudly when the
//! stack, the key, or a usable value is missing.
//!
//! Two file shapes are accepted:
//!
//! - the flat map written by `cdk deploy --outputs-file`:
//!   `{"stack-name": {"ApiUrl": "https://..."}}`
//! - the `aws cloudformation describe-stacks` response:
//!   `{"Stacks": [{"StackName": "...", "Outputs": [{"OutputKey": "...", "OutputValue": "..."}]}]}`

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SynthError, SynthResult};

/// Reference to one output of one stack.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRef {
    /// Name of the stack publishing the output.
    pub stack_name: String,
    /// Output key.
    pub output_key: String,
}

impl OutputRef {
    /// Create a new reference.
    #[must_use]
    pub fn new(stack_name: impl Into<String>, output_key: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            output_key: output_key.into(),
        }
    }
}

impl fmt::Display for OutputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.stack_name, self.output_key)
    }
}

/// A value that can be parsed out of a raw stack output string.
pub trait OutputValue: Sized {
    /// Parse the raw output, returning a reason on failure.
    fn parse_output(raw: &str) -> Result<Self, String>;
}

impl OutputValue for String {
    fn parse_output(raw: &str) -> Result<Self, String> {
        if raw.is_empty() {
            return Err("value is empty".to_owned());
        }
        Ok(raw.to_owned())
    }
}

#[derive(Deserialize)]
struct DescribedOutput {
    #[serde(rename = "OutputKey")]
    key: String,
    #[serde(rename = "OutputValue")]
    value: String,
}

#[derive(Deserialize)]
struct DescribedStack {
    #[serde(rename = "StackName")]
    name: String,
    #[serde(rename = "Outputs", default)]
    outputs: Vec<DescribedOutput>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutputsDocument {
    DescribeStacks {
        #[serde(rename = "Stacks")]
        stacks: Vec<DescribedStack>,
    },
    Flat(BTreeMap<String, BTreeMap<String, String>>),
}

/// Registry of deployed stack outputs, keyed by stack name then output key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackOutputRegistry {
    stacks: BTreeMap<String, BTreeMap<String, String>>,
}

impl StackOutputRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from either supported JSON shape.
    pub fn from_json(raw: &str) -> SynthResult<Self> {
        let document: OutputsDocument =
            serde_json::from_str(raw).map_err(SynthError::OutputsFormat)?;
        let stacks = match document {
            OutputsDocument::Flat(stacks) => stacks,
            OutputsDocument::DescribeStacks { stacks } => stacks
                .into_iter()
                .map(|s| {
                    let outputs = s.outputs.into_iter().map(|o| (o.key, o.value)).collect();
                    (s.name, outputs)
                })
                .collect(),
        };
        Ok(Self { stacks })
    }

    /// Load a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SynthResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SynthError::OutputsFile {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json(&raw)?;
        debug!(
            path = %path.display(),
            stacks = registry.stacks.len(),
            "loaded deployed stack outputs"
        );
        Ok(registry)
    }

    /// Record one output value, replacing any previous value.
    pub fn insert(
        &mut self,
        stack_name: impl Into<String>,
        output_key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.stacks
            .entry(stack_name.into())
            .or_default()
            .insert(output_key.into(), value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with_output(
        mut self,
        stack_name: impl Into<String>,
        output_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(stack_name, output_key, value);
        self
    }

    /// Whether any outputs are known for `stack_name`.
    #[must_use]
    pub fn contains_stack(&self, stack_name: &str) -> bool {
        self.stacks.contains_key(stack_name)
    }

    /// Number of stacks with known outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// The raw output string for `output`.
    pub fn require_raw(&self, output: &OutputRef) -> SynthResult<&str> {
        let outputs =
            self.stacks
                .get(&output.stack_name)
                .ok_or_else(|| SynthError::UnresolvedStack {
                    stack: output.stack_name.clone(),
                })?;
        outputs
            .get(&output.output_key)
            .map(String::as_str)
            .ok_or_else(|| SynthError::UnresolvedOutput {
                stack: output.stack_name.clone(),
                key: output.output_key.clone(),
            })
    }

    /// The output for `output`, parsed as `T`.
    pub fn require<T: OutputValue>(&self, output: &OutputRef) -> SynthResult<T> {
        let raw = self.require_raw(output)?;
        T::parse_output(raw).map_err(|reason| SynthError::InvalidOutput {
            stack: output.stack_name.clone(),
            key: output.output_key.clone(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_known_output() {
        let registry = StackOutputRegistry::new().with_output("backend", "ApiUrl", "https://x/");
        let value: String = registry.require(&OutputRef::new("backend", "ApiUrl")).unwrap();
        assert_eq!(value, "https://x/");
    }

    #[test]
    fn test_should_fail_on_unknown_stack() {
        let registry = StackOutputRegistry::new();
        let err = registry
            .require::<String>(&OutputRef::new("nonexistent-stack", "ApiUrl"))
            .unwrap_err();
        assert!(matches!(err, SynthError::UnresolvedStack { ref stack } if stack == "nonexistent-stack"));
        assert!(err.is_cross_stack());
    }

    #[test]
    fn test_should_fail_on_missing_output_key() {
        let registry = StackOutputRegistry::new().with_output("backend", "Other", "x");
        let err = registry
            .require::<String>(&OutputRef::new("backend", "ApiUrl"))
            .unwrap_err();
        assert!(matches!(err, SynthError::UnresolvedOutput { .. }));
    }

    #[test]
    fn test_should_fail_on_empty_value() {
        let registry = StackOutputRegistry::new().with_output("backend", "ApiUrl", "");
        let err = registry
            .require::<String>(&OutputRef::new("backend", "ApiUrl"))
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidOutput { .. }));
    }

    #[test]
    fn test_should_parse_flat_outputs_file() {
        let registry = StackOutputRegistry::from_json(
            r#"{"backend": {"ApiUrl": "https://a.example.com/Prod/", "FunctionArn": "arn"}}"#,
        )
        .unwrap();
        assert!(registry.contains_stack("backend"));
        assert_eq!(
            registry.require_raw(&OutputRef::new("backend", "FunctionArn")).unwrap(),
            "arn"
        );
    }

    #[test]
    fn test_should_parse_describe_stacks_response() {
        let raw = r#"{
            "Stacks": [{
                "StackName": "backend",
                "StackStatus": "CREATE_COMPLETE",
                "Outputs": [
                    {"OutputKey": "ApiUrl", "OutputValue": "https://a.example.com/Prod/", "Description": "API"}
                ]
            }, {
                "StackName": "empty"
            }]
        }"#;
        let registry = StackOutputRegistry::from_json(raw).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.require_raw(&OutputRef::new("backend", "ApiUrl")).unwrap(),
            "https://a.example.com/Prod/"
        );
        assert!(matches!(
            registry.require_raw(&OutputRef::new("empty", "ApiUrl")),
            Err(SynthError::UnresolvedOutput { .. })
        ));
    }

    #[test]
    fn test_should_reject_malformed_outputs_file() {
        assert!(matches!(
            StackOutputRegistry::from_json("[1, 2]"),
            Err(SynthError::OutputsFormat(_))
        ));
    }

    #[test]
    fn test_should_report_missing_outputs_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            StackOutputRegistry::load(dir.path().join("nope.json")),
            Err(SynthError::OutputsFile { .. })
        ));
    }
}

//! Process-level settings for a synthesis run.
//!
//! Settings are driven by environment variables, following the conventions of
//! the external deployment tooling (`CDK_OUTDIR`) where one exists.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Settings controlling where input is read from and where the plan is written.
///
/// # Examples
///
/// ```
/// use finance_infra_core::SynthSettings;
///
/// let settings = SynthSettings::default();
/// assert_eq!(settings.output_dir.to_str(), Some("cdk.out"));
/// assert!(settings.backend_outputs_file.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SynthSettings {
    /// Path of the configuration document.
    #[builder(default = PathBuf::from("config.json"))]
    pub config_file: PathBuf,

    /// Directory the deployment plan is written to.
    #[builder(default = PathBuf::from("cdk.out"))]
    pub output_dir: PathBuf,

    /// JSON file of already deployed stack outputs (`{stack: {key: value}}`).
    #[builder(default)]
    pub backend_outputs_file: Option<PathBuf>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from("config.json"),
            output_dir: PathBuf::from("cdk.out"),
            backend_outputs_file: None,
            log_level: String::from("info"),
        }
    }
}

impl SynthSettings {
    /// Load settings from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `FINANCE_INFRA_CONFIG` | `config.json` |
    /// | `CDK_OUTDIR` | `cdk.out` |
    /// | `BACKEND_OUTPUTS_FILE` | *(unset)* |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = non_empty("FINANCE_INFRA_CONFIG") {
            settings.config_file = PathBuf::from(v);
        }
        if let Some(v) = non_empty("CDK_OUTDIR") {
            settings.output_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty("BACKEND_OUTPUTS_FILE") {
            settings.backend_outputs_file = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty("LOG_LEVEL") {
            settings.log_level = v;
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_should_create_default_settings() {
        let settings = SynthSettings::default();
        assert_eq!(settings.config_file, PathBuf::from("config.json"));
        assert_eq!(settings.output_dir, PathBuf::from("cdk.out"));
        assert!(settings.backend_outputs_file.is_none());
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_should_override_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("FINANCE_INFRA_CONFIG", "/etc/finance/config.json"),
            ("CDK_OUTDIR", "/tmp/plan"),
            ("BACKEND_OUTPUTS_FILE", "outputs.json"),
            ("LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();
        let settings = SynthSettings::from_lookup(|k| vars.get(k).map(|v| (*v).to_owned()));

        assert_eq!(settings.config_file, PathBuf::from("/etc/finance/config.json"));
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/plan"));
        assert_eq!(settings.backend_outputs_file, Some(PathBuf::from("outputs.json")));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_should_ignore_empty_variables() {
        let settings = SynthSettings::from_lookup(|_| Some(String::new()));
        assert_eq!(settings.output_dir, PathBuf::from("cdk.out"));
        assert!(settings.backend_outputs_file.is_none());
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let settings = SynthSettings::builder()
            .output_dir(PathBuf::from("out"))
            .backend_outputs_file(Some(PathBuf::from("backend.json")))
            .build();

        assert_eq!(settings.config_file, PathBuf::from("config.json"));
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.backend_outputs_file, Some(PathBuf::from("backend.json")));
        assert_eq!(settings.log_level, "info");
    }
}

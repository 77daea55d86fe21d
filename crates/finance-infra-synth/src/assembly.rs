//! The deployment plan written to disk.
//!
//! A plan is a directory holding `manifest.json` and one
//! `<stack>.template.json` per stack. Every map in the plan is ordered and no
//! timestamp is recorded, so synthesizing unchanged input twice yields
//! byte-identical files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use finance_infra_model::Template;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::AssemblyError;
use crate::namespace::{ParameterEntry, ParameterNamespace};
use crate::registry::OutputRef;
use crate::stack::Stack;

/// Name of the manifest file inside the plan directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Manifest schema version.
pub const MANIFEST_VERSION: &str = "1.0.0";

/// One stack entry of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackArtifact {
    /// Stack name.
    pub id: String,
    /// `aws://<account>/<region>`.
    pub environment: String,
    /// Template file name, relative to the plan directory.
    pub template_file: String,
    /// Stack description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stack-level tags.
    pub tags: BTreeMap<String, String>,
    /// Stacks outside the plan that must be deployed first.
    pub external_dependencies: Vec<String>,
    /// Parameter paths the stack writes.
    pub publishes: Vec<String>,
    /// Outputs the stack reads from other stacks.
    pub imports: Vec<OutputRef>,
    /// Warnings raised while constructing the stack.
    pub warnings: Vec<String>,
}

/// The plan manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Schema version.
    pub version: String,
    /// Stacks in deployment order.
    pub stacks: Vec<StackArtifact>,
    /// Every published parameter, ordered by path.
    pub parameters: Vec<ParameterEntry>,
}

/// A synthesized deployment plan.
#[derive(Debug, Clone)]
pub struct CloudAssembly {
    manifest: Manifest,
    templates: Vec<(String, Template)>,
}

impl CloudAssembly {
    pub(crate) fn new(stacks: &[Stack], namespace: &ParameterNamespace) -> Self {
        let mut artifacts = Vec::with_capacity(stacks.len());
        let mut templates = Vec::with_capacity(stacks.len());
        for stack in stacks {
            let template_file = template_file_name(stack.name());
            artifacts.push(StackArtifact {
                id: stack.name().to_owned(),
                environment: stack.environment().uri(),
                template_file: template_file.clone(),
                description: stack.template().description.clone(),
                tags: stack
                    .tags()
                    .iter()
                    .map(|t| (t.key.clone(), t.value.clone()))
                    .collect(),
                external_dependencies: stack.external_dependencies().to_vec(),
                publishes: stack.published_parameters().to_vec(),
                imports: stack.imports().to_vec(),
                warnings: stack.warnings().to_vec(),
            });
            templates.push((template_file, stack.template().clone()));
        }

        Self {
            manifest: Manifest {
                version: MANIFEST_VERSION.to_owned(),
                stacks: artifacts,
                parameters: namespace.entries().cloned().collect(),
            },
            templates,
        }
    }

    /// The manifest.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Stack names in deployment order.
    #[must_use]
    pub fn stack_names(&self) -> Vec<&str> {
        self.manifest.stacks.iter().map(|s| s.id.as_str()).collect()
    }

    /// Manifest entry of a stack.
    #[must_use]
    pub fn stack(&self, name: &str) -> Option<&StackArtifact> {
        self.manifest.stacks.iter().find(|s| s.id == name)
    }

    /// Template of a stack.
    #[must_use]
    pub fn template(&self, name: &str) -> Option<&Template> {
        let file = self.stack(name)?.template_file.as_str();
        self.templates
            .iter()
            .find(|(f, _)| f == file)
            .map(|(_, template)| template)
    }

    /// Render every file of the plan as `(file name, contents)`, manifest first.
    pub fn files(&self) -> Result<Vec<(String, String)>, AssemblyError> {
        let mut files = Vec::with_capacity(self.templates.len() + 1);
        files.push((MANIFEST_FILE.to_owned(), render(MANIFEST_FILE, &self.manifest)?));
        for (file, template) in &self.templates {
            files.push((file.clone(), render(file, template)?));
        }
        Ok(files)
    }

    /// Write the plan into `dir`, creating it if needed.
    ///
    /// All files are rendered before the first one is written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, AssemblyError> {
        let dir = dir.as_ref();
        let files = self.files()?;

        fs::create_dir_all(dir).map_err(|source| AssemblyError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|source| AssemblyError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "wrote plan file");
            written.push(path);
        }

        info!(dir = %dir.display(), files = written.len(), "deployment plan written");
        Ok(written)
    }
}

fn template_file_name(stack_name: &str) -> String {
    format!("{stack_name}.template.json")
}

fn render<T: Serialize>(file: &str, value: &T) -> Result<String, AssemblyError> {
    let mut rendered =
        serde_json::to_string_pretty(value).map_err(|source| AssemblyError::Serialize {
            file: file.to_owned(),
            source,
        })?;
    rendered.push('\n');
    Ok(rendered)
}

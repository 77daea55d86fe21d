//! A named, independently deployable unit of resource declarations.

use finance_infra_core::DeployEnvironment;
use finance_infra_model::ssm::ParameterProperties;
use finance_infra_model::{
    CfnValue, RemovalPolicy, ResourceDeclaration, ResourceProperties, Tag, Template,
    TemplateOutput,
};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::namespace::ParameterNamespace;
use crate::registry::{OutputRef, OutputValue, StackOutputRegistry};

/// Handle to a declared resource, used to build references to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    logical_id: String,
}

impl ResourceHandle {
    /// Logical ID of the resource.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// `Ref` to the resource.
    #[must_use]
    pub fn reference(&self) -> CfnValue {
        CfnValue::reference(&self.logical_id)
    }

    /// `Fn::GetAtt` on one of the resource's attributes.
    #[must_use]
    pub fn attribute(&self, name: &str) -> CfnValue {
        CfnValue::get_att(&self.logical_id, name)
    }
}

/// A stack under construction.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    environment: DeployEnvironment,
    tags: Vec<Tag>,
    template: Template,
    published_parameters: Vec<String>,
    imports: Vec<OutputRef>,
    external_dependencies: Vec<String>,
    warnings: Vec<String>,
}

impl Stack {
    /// Create an empty stack. `tags` are applied to every taggable resource.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        environment: DeployEnvironment,
        description: Option<String>,
        mut tags: Vec<Tag>,
    ) -> Self {
        tags.sort();
        tags.dedup_by(|a, b| a.key == b.key);
        Self {
            name: name.into(),
            environment,
            tags,
            template: Template::new(description),
            published_parameters: Vec::new(),
            imports: Vec::new(),
            external_dependencies: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Declare a resource.
    pub fn add_resource<P: ResourceProperties>(
        &mut self,
        logical_id: &str,
        mut properties: P,
        removal_policy: Option<RemovalPolicy>,
    ) -> SynthResult<ResourceHandle> {
        if self.template.resources.contains_key(logical_id) {
            return Err(SynthError::DuplicateResource {
                stack: self.name.clone(),
                logical_id: logical_id.to_owned(),
            });
        }

        properties.apply_tags(&self.tags);
        let declaration = ResourceDeclaration::new(&properties, removal_policy).map_err(
            |source| SynthError::Serialize {
                logical_id: logical_id.to_owned(),
                source,
            },
        )?;

        debug!(
            stack = %self.name,
            logical_id,
            resource_type = P::RESOURCE_TYPE,
            "declared resource"
        );
        self.template
            .resources
            .insert(logical_id.to_owned(), declaration);
        Ok(ResourceHandle {
            logical_id: logical_id.to_owned(),
        })
    }

    /// Declare a stack output.
    pub fn add_output(
        &mut self,
        key: &str,
        value: CfnValue,
        description: Option<&str>,
    ) -> SynthResult<()> {
        if self.template.outputs.contains_key(key) {
            return Err(SynthError::DuplicateOutput {
                stack: self.name.clone(),
                key: key.to_owned(),
            });
        }
        self.template.outputs.insert(
            key.to_owned(),
            TemplateOutput {
                value,
                description: description.map(str::to_owned),
            },
        );
        Ok(())
    }

    /// Declare a `String` parameter and record it in the shared namespace.
    ///
    /// Sensitive values also leave a warning on the stack, since the
    /// parameter cannot be declared as `SecureString`.
    pub fn publish_parameter(
        &mut self,
        namespace: &mut ParameterNamespace,
        logical_id: &str,
        path: &str,
        value: CfnValue,
        description: &str,
        sensitive: bool,
    ) -> SynthResult<ResourceHandle> {
        namespace.publish(&self.name, path, value.clone(), sensitive)?;
        let handle = self.add_resource(
            logical_id,
            ParameterProperties::string(path, value, Some(description.to_owned())),
            None,
        )?;
        self.published_parameters.push(path.to_owned());
        if sensitive {
            self.add_warning(format!(
                "{path} holds a credential in a plaintext String parameter; \
                 move it to a SecureString or Secrets Manager secret"
            ));
        }
        Ok(handle)
    }

    /// Resolve another stack's published output and record the dependency.
    pub fn import_output<T: OutputValue>(
        &mut self,
        registry: &StackOutputRegistry,
        output: OutputRef,
    ) -> SynthResult<T> {
        let value = registry.require(&output)?;
        debug!(stack = %self.name, import = %output, "resolved cross-stack output");
        if !self.external_dependencies.contains(&output.stack_name) {
            self.external_dependencies.push(output.stack_name.clone());
        }
        self.imports.push(output);
        Ok(value)
    }

    fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Stack name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deployment environment.
    #[must_use]
    pub fn environment(&self) -> &DeployEnvironment {
        &self.environment
    }

    /// Stack-level tags, sorted by key.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The template built so far.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Parameter paths this stack published.
    #[must_use]
    pub fn published_parameters(&self) -> &[String] {
        &self.published_parameters
    }

    /// Outputs imported from other stacks.
    #[must_use]
    pub fn imports(&self) -> &[OutputRef] {
        &self.imports
    }

    /// Stacks outside this application that must be deployed first.
    #[must_use]
    pub fn external_dependencies(&self) -> &[String] {
        &self.external_dependencies
    }

    /// Warnings attached during construction.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

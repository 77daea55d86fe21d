//! The application: owns the stacks and the parameter namespace they share.

use finance_infra_core::InfraConfig;
use tracing::info;

use crate::assembly::CloudAssembly;
use crate::error::{SynthError, SynthResult};
use crate::namespace::ParameterNamespace;
use crate::registry::StackOutputRegistry;
use crate::stack::Stack;
use crate::stacks::{AuthStack, AuthStackProps, SiteStack, SiteStackProps, TableStack, TableStackProps};

/// A set of stacks synthesized together.
#[derive(Debug, Default)]
pub struct App {
    namespace: ParameterNamespace,
    stacks: Vec<Stack>,
}

impl App {
    /// Create an empty application.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The parameter namespace stacks publish into.
    pub fn namespace_mut(&mut self) -> &mut ParameterNamespace {
        &mut self.namespace
    }

    /// The parameter namespace.
    #[must_use]
    pub fn namespace(&self) -> &ParameterNamespace {
        &self.namespace
    }

    /// Register a constructed stack. Stack names are unique.
    pub fn add_stack(&mut self, stack: Stack) -> SynthResult<()> {
        if self.stacks.iter().any(|s| s.name() == stack.name()) {
            return Err(SynthError::DuplicateStack(stack.name().to_owned()));
        }
        self.stacks.push(stack);
        Ok(())
    }

    /// Stacks in registration order.
    #[must_use]
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Freeze the application into a deployment plan.
    #[must_use]
    pub fn synth(self) -> CloudAssembly {
        CloudAssembly::new(&self.stacks, &self.namespace)
    }
}

/// Build every stack from `config` and return the deployment plan.
///
/// Stacks are constructed in dependency order: authentication, table, site.
/// The first error aborts the pass; no plan is produced.
pub fn synthesize(
    config: &InfraConfig,
    registry: &StackOutputRegistry,
) -> SynthResult<CloudAssembly> {
    let mut app = App::new();

    let auth = AuthStack::new(
        &AuthStackProps::from_config(&config.cognito, &config.environment),
        config.target.clone(),
        app.namespace_mut(),
    )?;
    app.add_stack(auth.into_stack())?;

    let table = TableStack::new(
        &TableStackProps::from_config(&config.dashboard, &config.environment),
        config.target.clone(),
    )?;
    app.add_stack(table.into_stack())?;

    let site = SiteStack::new(
        &SiteStackProps::from_config(&config.dashboard, &config.environment),
        config.target.clone(),
        registry,
    )?;
    app.add_stack(site.into_stack())?;

    info!(
        stacks = app.stacks().len(),
        parameters = app.namespace().len(),
        target = %config.target,
        "synthesis complete"
    );
    Ok(app.synth())
}

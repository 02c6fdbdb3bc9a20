//! The compilation request pipeline.
//!
//! ```text
//! read template -> render -> compile (resolver called back) -> check diagnostics -> extract
//! ```
//!
//! Every step blocks; nothing is cached or shared between runs.

use std::path::Path;

use serde_json::{Map, Value};

use crate::artifact::{self, ArtifactResponse};
use crate::compiler::{self, SolidityCompiler};
use crate::config::ForgeConfig;
use crate::error::Result;
use crate::resolver::{ImportResolver, NamespaceResolver};
use crate::store::TemplateStore;
use crate::templates::renderer::TemplateRenderer;

/// One configured template-to-artifact pipeline.
pub struct Pipeline {
    store: TemplateStore,
    renderer: TemplateRenderer,
    resolver: Box<dyn ImportResolver>,
    compiler: Box<dyn SolidityCompiler>,
    template_name: String,
    contract_name: String,
    variables: Map<String, Value>,
}

impl Pipeline {
    pub fn new(
        store: TemplateStore,
        resolver: Box<dyn ImportResolver>,
        compiler: Box<dyn SolidityCompiler>,
        template_name: impl Into<String>,
        contract_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            renderer: TemplateRenderer::new(),
            resolver,
            compiler,
            template_name: template_name.into(),
            contract_name: contract_name.into(),
            variables: Map::new(),
        }
    }

    /// Build the pipeline described by a project's config, with paths relative to `project_dir`.
    pub fn from_config(
        project_dir: &Path,
        config: &ForgeConfig,
        compiler: Box<dyn SolidityCompiler>,
    ) -> Self {
        let resolver = NamespaceResolver::new(
            config.dependency_root(project_dir),
            config.dependencies.namespaces.clone(),
        );
        Self::new(
            TemplateStore::new(config.template_dir(project_dir)),
            Box::new(resolver),
            compiler,
            config.template.name.clone(),
            config.template.contract.clone(),
        )
        .with_variables(config.variables.clone())
    }

    /// Substitution variables made available to the template.
    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Run the pipeline once.
    pub fn run(&self) -> Result<ArtifactResponse> {
        // Stage 1: template read
        let template = self.store.read(&self.template_name)?;

        // Stage 2: render
        let source = self
            .renderer
            .resolve(&template, &self.variables, &self.contract_name)?;

        // Stage 3: compile, the resolver is only reachable from here
        let output = compiler::invoke(self.compiler.as_ref(), &source, self.resolver.as_ref())?;

        // Stage 4: diagnostics, then extraction
        artifact::check_diagnostics(&output)?;
        artifact::extract(&output, &source.name, &self.contract_name)
    }
}

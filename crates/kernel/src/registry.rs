use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module};

/// Core module initialization order (the HTTP server is started separately)
const CORE_MODULE_ORDER: &[&str] = &[
    "db", // Book store connection
];

/// Module registry for managing module lifecycle with core/custom separation
pub struct ModuleRegistry {
    core_modules: Vec<Arc<dyn Module>>,
    custom_modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            core_modules: Vec::new(),
            custom_modules: Vec::new(),
        }
    }

    /// Register a core module with the registry
    pub fn register_core(&mut self, module: Arc<dyn Module>) {
        self.core_modules.push(module);
    }

    /// Register a custom module with the registry
    pub fn register_custom(&mut self, module: Arc<dyn Module>) {
        self.custom_modules.push(module);
    }

    /// Get all registered modules (core + custom)
    pub fn modules(&self) -> Vec<&Arc<dyn Module>> {
        let mut all_modules = Vec::new();
        all_modules.extend(self.core_modules.iter());
        all_modules.extend(self.custom_modules.iter());
        all_modules
    }

    /// Modules contributing HTTP routes
    pub fn custom_modules(&self) -> &[Arc<dyn Module>] {
        &self.custom_modules
    }

    /// Get a module by name (searches both core and custom modules)
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.core_modules
            .iter()
            .find(|module| module.name() == name)
            .or_else(|| {
                self.custom_modules
                    .iter()
                    .find(|module| module.name() == name)
            })
    }

    /// Core modules in [`CORE_MODULE_ORDER`]; unknown core modules go last
    fn ordered_core_modules(&self) -> Vec<&Arc<dyn Module>> {
        let rank = |module: &Arc<dyn Module>| {
            CORE_MODULE_ORDER
                .iter()
                .position(|&name| name == module.name())
                .unwrap_or(CORE_MODULE_ORDER.len())
        };
        let mut ordered: Vec<_> = self.core_modules.iter().collect();
        ordered.sort_by_key(|module| rank(*module));
        ordered
    }

    /// Initialize core modules, then custom modules
    pub async fn init_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            "initializing core modules in order: {:?}",
            CORE_MODULE_ORDER
        );
        for module in self.ordered_core_modules() {
            tracing::info!(module = module.name(), "initializing core module");
            module.init(ctx).await.with_context(|| {
                format!("failed to initialize core module '{}'", module.name())
            })?;
        }

        tracing::info!("initializing {} custom modules", self.custom_modules.len());
        for module in &self.custom_modules {
            tracing::info!(module = module.name(), "initializing custom module");
            module.init(ctx).await.with_context(|| {
                format!("failed to initialize custom module '{}'", module.name())
            })?;
        }

        Ok(())
    }

    /// Start core modules, then custom modules
    pub async fn start_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in self.ordered_core_modules() {
            tracing::info!(module = module.name(), "starting core module");
            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start core module '{}'", module.name()))?;
        }

        for module in &self.custom_modules {
            tracing::info!(module = module.name(), "starting custom module");
            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start custom module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop custom modules first, then core modules, each in reverse order
    pub async fn stop_all(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} custom modules", self.custom_modules.len());
        for module in self.custom_modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping custom module");
            module
                .stop()
                .await
                .with_context(|| format!("failed to stop custom module '{}'", module.name()))?;
        }

        tracing::info!("stopping core modules in reverse order");
        for module in self.ordered_core_modules().into_iter().rev() {
            tracing::info!(module = module.name(), "stopping core module");
            module
                .stop()
                .await
                .with_context(|| format!("failed to stop core module '{}'", module.name()))?;
        }

        Ok(())
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable probe over every registered module, detached from the registry
#[derive(Clone, Default)]
pub struct Readiness {
    modules: Vec<Arc<dyn Module>>,
}

impl Readiness {
    /// Fails with the first module that reports itself unready
    pub async fn check(&self) -> anyhow::Result<()> {
        for module in &self.modules {
            module
                .ready()
                .await
                .with_context(|| format!("module '{}' is not ready", module.name()))?;
        }
        Ok(())
    }
}

impl ModuleRegistry {
    pub fn readiness(&self) -> Readiness {
        let modules = self
            .ordered_core_modules()
            .into_iter()
            .chain(self.custom_modules.iter())
            .cloned()
            .collect();
        Readiness { modules }
    }
}

//! Top-level installation run.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info};

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;
use plume_database::Persistence;
use plume_hooks::HookContext;

use crate::catalog::Catalog;
use crate::manager::ModuleManager;
use crate::module::InstallContext;

/// Record counts in the store after an installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub pages: u64,
    pub menus: u64,
    pub menu_items: u64,
    pub variables: u64,
    pub permissions: u64,
}

impl StoreCounts {
    /// Counts every table in `persistence`.
    pub async fn collect(persistence: &Persistence) -> AppResult<Self> {
        Ok(Self {
            pages: persistence.pages.count().await?,
            menus: persistence.menus.count().await?,
            menu_items: persistence.menu_items.count().await?,
            variables: persistence.variables.count().await?,
            permissions: persistence.permissions.count().await?,
        })
    }
}

/// Outcome of a successful installation.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    /// Installed module ids in install order.
    pub modules: Vec<String>,
    /// Number of catalog entries assembled.
    pub catalog_entries: usize,
    /// What the store holds afterwards.
    pub counts: StoreCounts,
    pub duration_ms: u64,
}

/// Runs the installation of every loaded module.
#[derive(Debug, Clone)]
pub struct Installer {
    manager: Arc<ModuleManager>,
    persistence: Persistence,
    hooks: HookContext,
}

impl Installer {
    pub fn new(manager: Arc<ModuleManager>, persistence: Persistence) -> Self {
        Self {
            manager,
            persistence,
            hooks: HookContext::new(),
        }
    }

    /// Replaces the context bag handed to every hook during the run.
    pub fn with_context(mut self, hooks: HookContext) -> Self {
        self.hooks = hooks;
        self
    }

    /// Assembles the catalog, then installs modules one by one in load
    /// order.
    ///
    /// A catalog conflict fails the run before anything is written. The
    /// first module failure stops the run; modules installed before it keep
    /// their content.
    pub async fn run(&self) -> AppResult<InstallReport> {
        let started = Instant::now();
        let dispatcher = self.manager.dispatcher().clone();

        info!(
            invocation_id = %self.hooks.invocation_id,
            modules = self.manager.modules().len(),
            "Starting installation"
        );

        let catalog = Catalog::collect(&dispatcher, &self.hooks)
            .await
            .map_err(|e| {
                error!(error = %e, "Catalog assembly failed");
                match e.kind {
                    ErrorKind::Configuration => e,
                    _ => AppError::with_source(ErrorKind::Install, "catalog assembly failed", e),
                }
            })?;
        info!(entries = catalog.len(), "Catalog assembled");

        let ctx = InstallContext {
            dispatcher,
            persistence: self.persistence.clone(),
            hooks: self.hooks.clone(),
            catalog: Arc::new(catalog),
        };

        let mut installed = Vec::with_capacity(self.manager.modules().len());
        for module in self.manager.modules() {
            let module_info = module.info();
            info!(module_id = %module_info.id, "Installing module");

            module.install(&ctx).await.map_err(|e| {
                error!(module_id = %module_info.id, error = %e, "Module installation failed");
                AppError::with_source(
                    ErrorKind::Install,
                    format!("installation of module '{}' failed", module_info.id),
                    e,
                )
            })?;

            installed.push(module_info.id);
        }

        let counts = StoreCounts::collect(&self.persistence).await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        info!(
            modules = installed.len(),
            pages = counts.pages,
            menu_items = counts.menu_items,
            variables = counts.variables,
            duration_ms = duration_ms,
            "Installation completed"
        );

        Ok(InstallReport {
            modules: installed,
            catalog_entries: ctx.catalog.len(),
            counts,
            duration_ms,
        })
    }
}

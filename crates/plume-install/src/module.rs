//! The contract every Plume module implements.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use plume_core::result::AppResult;
use plume_database::Persistence;
use plume_hooks::{HookContext, HookDispatcher, HookRegistry};

use crate::catalog::Catalog;

/// Metadata about a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Unique module identifier, also used as the hook owner id.
    pub id: String,
    /// Human-readable module name.
    pub name: String,
    /// Module description.
    pub description: String,
}

/// Everything a module needs while installing.
#[derive(Debug, Clone)]
pub struct InstallContext {
    /// Dispatcher over the fully populated registry.
    pub dispatcher: HookDispatcher,
    /// Where installed content is written.
    pub persistence: Persistence,
    /// Context bag handed to every hook invoked during this installation.
    pub hooks: HookContext,
    /// System variables assembled from every module before installs start.
    pub catalog: Arc<Catalog>,
}

/// Trait that all modules must implement.
///
/// Modules never depend on each other; they only meet through named hooks.
#[async_trait]
pub trait Module: Send + Sync + std::fmt::Debug {
    /// Returns module metadata.
    fn info(&self) -> ModuleInfo;

    /// Registers this module's hook handlers.
    ///
    /// Called once at startup, in module load order.
    async fn register_hooks(&self, registry: &HookRegistry) -> AppResult<()>;

    /// Creates the module's default content.
    async fn install(&self, _ctx: &InstallContext) -> AppResult<()> {
        Ok(())
    }
}

//! Module manager: loads modules and wires their hooks.

use std::sync::Arc;

use tracing::info;

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;
use plume_hooks::{HookDispatcher, HookRegistry};

use crate::module::{Module, ModuleInfo};

/// Owns the loaded modules, the hook registry, and its dispatcher.
#[derive(Debug)]
pub struct ModuleManager {
    /// Modules in load order.
    modules: Vec<Arc<dyn Module>>,
    /// Hook registry shared with the dispatcher.
    registry: Arc<HookRegistry>,
    /// Hook dispatcher.
    dispatcher: HookDispatcher,
}

impl ModuleManager {
    /// Creates a manager with an empty registry.
    pub fn new() -> Self {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(registry.clone());

        Self {
            modules: Vec::new(),
            registry,
            dispatcher,
        }
    }

    /// Loads modules in order, registering their hooks.
    pub async fn load_all(modules: Vec<Arc<dyn Module>>) -> AppResult<Self> {
        let mut manager = Self::new();
        for module in modules {
            manager.load(module).await?;
        }
        Ok(manager)
    }

    /// Loads one module after those already loaded.
    ///
    /// Rejects a module whose id is already taken.
    pub async fn load(&mut self, module: Arc<dyn Module>) -> AppResult<()> {
        let info = module.info();

        if self.modules.iter().any(|m| m.info().id == info.id) {
            return Err(AppError::configuration(format!(
                "Module '{}' is listed more than once",
                info.id
            )));
        }

        module.register_hooks(&self.registry).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Module '{}' failed to register hooks", info.id),
                e,
            )
        })?;

        info!(
            module_id = %info.id,
            name = %info.name,
            position = self.modules.len() + 1,
            "Module loaded"
        );

        self.modules.push(module);
        Ok(())
    }

    /// Returns the loaded modules in load order.
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Returns metadata for every loaded module.
    pub fn list_modules(&self) -> Vec<ModuleInfo> {
        self.modules.iter().map(|m| m.info()).collect()
    }

    /// Returns the hook dispatcher.
    pub fn dispatcher(&self) -> &HookDispatcher {
        &self.dispatcher
    }

    /// Returns the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

impl Default for ModuleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use plume_hooks::{StaticRecordsHandler, names};

    #[derive(Debug)]
    struct Contributor(&'static str);

    #[async_trait]
    impl Module for Contributor {
        fn info(&self) -> ModuleInfo {
            ModuleInfo {
                id: self.0.to_string(),
                name: self.0.to_string(),
                description: String::new(),
            }
        }

        async fn register_hooks(&self, registry: &HookRegistry) -> AppResult<()> {
            registry
                .register(
                    names::FRONTEND_PAGE_INSTALL,
                    self.0,
                    Arc::new(StaticRecordsHandler::new(Vec::new())),
                )
                .await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_order_is_registration_order() {
        let manager = ModuleManager::load_all(vec![
            Arc::new(Contributor("b")),
            Arc::new(Contributor("a")),
            Arc::new(Contributor("c")),
        ])
        .await
        .unwrap();

        let owners: Vec<String> = manager
            .registry()
            .get_handlers(names::FRONTEND_PAGE_INSTALL)
            .await
            .into_iter()
            .map(|h| h.module_id)
            .collect();
        assert_eq!(owners, vec!["b", "a", "c"]);

        let ids: Vec<String> = manager.list_modules().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_duplicate_module_rejected() {
        let err = ModuleManager::load_all(vec![
            Arc::new(Contributor("blog")),
            Arc::new(Contributor("blog")),
        ])
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("'blog'"));
    }
}

//! System module: owns site-wide variables.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::info;

use plume_core::result::AppResult;
use plume_hooks::HookRegistry;
use plume_install::{InstallContext, Module, ModuleInfo};

/// Persists the assembled catalog as system variables.
#[derive(Debug, Default)]
pub struct SystemModule;

impl SystemModule {
    pub const ID: &'static str = "system";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for SystemModule {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: Self::ID.to_string(),
            name: "System".to_string(),
            description: "Site-wide system variables".to_string(),
        }
    }

    async fn register_hooks(&self, _registry: &HookRegistry) -> AppResult<()> {
        Ok(())
    }

    async fn install(&self, ctx: &InstallContext) -> AppResult<()> {
        let variables = ctx.catalog.variables();

        let results = join_all(
            variables
                .iter()
                .map(|variable| ctx.persistence.variables.create(variable)),
        )
        .await;
        results.into_iter().collect::<AppResult<Vec<()>>>()?;

        info!(count = variables.len(), "System variables installed");
        Ok(())
    }
}

//! Frontend module: pages, menus, and site presentation settings.

mod variables;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use plume_core::result::AppResult;
use plume_hooks::{HookRegistry, StaticRecordsHandler, names};
use plume_install::{ContentInstaller, InstallContext, Module, ModuleInfo};

use crate::permissions::{PermissionInput, crud};

/// Body of the sample About page.
pub const ABOUT_PAGE: &str = include_str!("../../assets/about.html");

/// Installs the default pages and menus of the site.
#[derive(Debug, Default)]
pub struct FrontendModule;

impl FrontendModule {
    pub const ID: &'static str = "frontend";

    pub fn new() -> Self {
        Self
    }

    fn permissions() -> Vec<PermissionInput> {
        let mut perms = crud(Self::ID, "module", "Frontend");
        perms.extend(crud(Self::ID, "metadatas", "Frontend metadata"));
        perms.extend(crud(Self::ID, "menus", "Frontend menu"));
        perms.extend(crud(Self::ID, "menu_items", "Frontend menu item"));
        perms.extend(crud(Self::ID, "pages", "Frontend page"));
        perms.push(PermissionInput::new(
            Self::ID,
            "settings",
            "update",
            "Frontend settings update",
        ));
        perms
    }
}

#[async_trait]
impl Module for FrontendModule {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: Self::ID.to_string(),
            name: "Frontend".to_string(),
            description: "Public site pages, menus and presentation settings".to_string(),
        }
    }

    async fn register_hooks(&self, registry: &HookRegistry) -> AppResult<()> {
        registry
            .register(
                names::SYSTEM_VARIABLES_INSTALL,
                Self::ID,
                Arc::new(StaticRecordsHandler::from_serializable(&variables::entries())?),
            )
            .await;
        registry
            .register(
                names::USER_PERMISSION_INSTALL,
                Self::ID,
                Arc::new(StaticRecordsHandler::from_serializable(&Self::permissions())?),
            )
            .await;
        Ok(())
    }

    async fn install(&self, ctx: &InstallContext) -> AppResult<()> {
        let summary = ContentInstaller::new(ctx.dispatcher.clone(), ctx.persistence.clone(), ABOUT_PAGE)
            .install(&ctx.hooks)
            .await?;

        info!(
            pages = summary.pages,
            menus = summary.menus,
            menu_items = summary.menu_items,
            "Frontend content installed"
        );
        Ok(())
    }
}

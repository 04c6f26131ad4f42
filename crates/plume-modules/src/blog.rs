//! Blog module: a pure contributor.
//!
//! It has nothing of its own to install; it only answers the frontend,
//! system and user hooks.

use std::sync::Arc;

use async_trait::async_trait;

use plume_core::result::AppResult;
use plume_hooks::{HookRegistry, StaticRecordsHandler, names};
use plume_install::{CatalogEntry, MenuItemInput, Module, ModuleInfo, PageInput};

use crate::permissions::{PermissionInput, crud};

#[derive(Debug, Default)]
pub struct BlogModule;

impl BlogModule {
    pub const ID: &'static str = "blog";

    pub fn new() -> Self {
        Self
    }

    fn menu_items() -> Vec<MenuItemInput> {
        vec![MenuItemInput::new("Blog", "/blog/").with_priority(900)]
    }

    fn pages() -> Vec<PageInput> {
        vec![PageInput::new("Blog", "[blog-home-page]")]
    }

    fn variables() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("blog.page.title", "Blog page title")
                .with_value("Blog")
                .with_note("Title of the blog page"),
            CatalogEntry::new("blog.page.excerpt", "Blog page excerpt")
                .with_value("Latest posts")
                .with_note("Excerpt for the blog page"),
            CatalogEntry::new("blog.posts.page.limit", "Posts per page")
                .with_value("10")
                .with_note("How many posts are listed on one page"),
        ]
    }

    fn permissions() -> Vec<PermissionInput> {
        let mut perms = crud(Self::ID, "posts", "Blog post");
        perms.extend(crud(Self::ID, "categories", "Blog category"));
        perms.extend(crud(Self::ID, "authors", "Blog author"));
        perms
    }
}

#[async_trait]
impl Module for BlogModule {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: Self::ID.to_string(),
            name: "Blog".to_string(),
            description: "Posts, categories and authors".to_string(),
        }
    }

    async fn register_hooks(&self, registry: &HookRegistry) -> AppResult<()> {
        registry
            .register(
                names::FRONTEND_MAIN_MENU_INSTALL,
                Self::ID,
                Arc::new(StaticRecordsHandler::from_serializable(&Self::menu_items())?),
            )
            .await;
        registry
            .register(
                names::FRONTEND_PAGE_INSTALL,
                Self::ID,
                Arc::new(StaticRecordsHandler::from_serializable(&Self::pages())?),
            )
            .await;
        registry
            .register(
                names::SYSTEM_VARIABLES_INSTALL,
                Self::ID,
                Arc::new(StaticRecordsHandler::from_serializable(&Self::variables())?),
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
}

//! One repository per content entity, behind trait objects.

use std::sync::Arc;

use tracing::info;

use plume_core::config::{DatabaseConfig, DatabaseProvider};
use plume_core::result::AppResult;
use plume_core::traits::Repository;
use plume_entity::menu::{Menu, MenuItem};
use plume_entity::page::{Page, PageMetadata};
use plume_entity::system::SystemVariable;
use plume_entity::user::Permission;

use crate::connection::DatabasePool;
use crate::memory::{MemoryPageRepository, MemoryRepository};
use crate::migration::run_migrations;
use crate::postgres::{
    PgMenuItemRepository, PgMenuRepository, PgPageMetadataRepository, PgPageRepository,
    PgPermissionRepository, PgSystemVariableRepository,
};

/// The persistence collaborator handed to installers.
///
/// Cloning is cheap; every clone writes to the same underlying store.
#[derive(Debug, Clone)]
pub struct Persistence {
    /// Pages. Creating a page also creates its draft metadata.
    pub pages: Arc<dyn Repository<Page>>,
    /// Page metadata, keyed by page id.
    pub metadata: Arc<dyn Repository<PageMetadata>>,
    /// Menus.
    pub menus: Arc<dyn Repository<Menu>>,
    /// Menu items.
    pub menu_items: Arc<dyn Repository<MenuItem>>,
    /// System variables.
    pub variables: Arc<dyn Repository<SystemVariable>>,
    /// Declared permissions.
    pub permissions: Arc<dyn Repository<Permission>>,
}

impl Persistence {
    /// A fresh, empty in-memory store.
    pub fn memory() -> Self {
        let metadata = Arc::new(MemoryRepository::<PageMetadata>::new());
        Self {
            pages: Arc::new(MemoryPageRepository::new(metadata.clone())),
            metadata,
            menus: Arc::new(MemoryRepository::<Menu>::new()),
            menu_items: Arc::new(MemoryRepository::<MenuItem>::new()),
            variables: Arc::new(MemoryRepository::<SystemVariable>::new()),
            permissions: Arc::new(MemoryRepository::<Permission>::new()),
        }
    }

    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pool = pool.pool().clone();
        Self {
            pages: Arc::new(PgPageRepository::new(pool.clone())),
            metadata: Arc::new(PgPageMetadataRepository::new(pool.clone())),
            menus: Arc::new(PgMenuRepository::new(pool.clone())),
            menu_items: Arc::new(PgMenuItemRepository::new(pool.clone())),
            variables: Arc::new(PgSystemVariableRepository::new(pool.clone())),
            permissions: Arc::new(PgPermissionRepository::new(pool)),
        }
    }

    /// Build the store selected by configuration, running migrations for
    /// PostgreSQL when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Memory => {
                info!("Using in-memory content store");
                Ok(Self::memory())
            }
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(&pool))
            }
        }
    }
}

//! Shared fixtures for module integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use plume_core::error::AppError;
use plume_core::result::AppResult;
use plume_core::traits::{Entity, Repository};
use plume_database::Persistence;
use plume_hooks::{HookRegistry, StaticRecordsHandler, names};
use plume_install::{CatalogEntry, InstallReport, Installer, Module, ModuleInfo, ModuleManager};

/// Loads `modules` and installs them into `persistence`.
pub async fn install(modules: Vec<Arc<dyn Module>>, persistence: &Persistence) -> AppResult<InstallReport> {
    let manager = ModuleManager::load_all(modules).await?;
    Installer::new(Arc::new(manager), persistence.clone())
        .run()
        .await
}

/// Repository whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingRepository;

#[async_trait]
impl<E: Entity> Repository<E> for FailingRepository {
    async fn create(&self, _entity: &E) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn update(&self, _entity: &E) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_id(&self, _id: &E::Id) -> AppResult<Option<E>> {
        Ok(None)
    }

    async fn find_all(&self) -> AppResult<Vec<E>> {
        Ok(Vec::new())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(0)
    }
}

/// A third-party module that only declares catalog entries.
#[derive(Debug)]
pub struct CatalogContributor {
    pub id: &'static str,
    pub entries: Vec<CatalogEntry>,
}

#[async_trait]
impl Module for CatalogContributor {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: self.id.to_string(),
            name: self.id.to_string(),
            description: "test contributor".to_string(),
        }
    }

    async fn register_hooks(&self, registry: &HookRegistry) -> AppResult<()> {
        registry
            .register(
                names::SYSTEM_VARIABLES_INSTALL,
                self.id,
                Arc::new(StaticRecordsHandler::from_serializable(&self.entries)?),
            )
            .await;
        Ok(())
    }
}

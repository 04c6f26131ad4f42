//! User module: collects and stores permission declarations.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};

use plume_core::result::AppResult;
use plume_entity::user::Permission;
use plume_hooks::{HookRegistry, StaticRecordsHandler, names};
use plume_install::{InstallContext, Module, ModuleInfo};

use crate::permissions::{PermissionInput, crud};

/// Gathers every module's permissions and persists them.
#[derive(Debug, Default)]
pub struct UserModule;

impl UserModule {
    pub const ID: &'static str = "user";

    pub fn new() -> Self {
        Self
    }

    fn own_permissions() -> Vec<PermissionInput> {
        let mut perms = crud(Self::ID, "users", "User");
        perms.extend(crud(Self::ID, "roles", "User role"));
        perms.extend(crud(Self::ID, "permissions", "User permission"));
        perms
    }
}

#[async_trait]
impl Module for UserModule {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            id: Self::ID.to_string(),
            name: "User".to_string(),
            description: "Users, roles and permission declarations".to_string(),
        }
    }

    async fn register_hooks(&self, registry: &HookRegistry) -> AppResult<()> {
        registry
            .register(
                names::USER_PERMISSION_INSTALL,
                Self::ID,
                Arc::new(StaticRecordsHandler::from_serializable(&Self::own_permissions())?),
            )
            .await;
        Ok(())
    }

    async fn install(&self, ctx: &InstallContext) -> AppResult<()> {
        let inputs: Vec<PermissionInput> = ctx
            .dispatcher
            .invoke_shaped(names::USER_PERMISSION_INSTALL, &ctx.hooks)
            .await?;

        let mut seen = HashSet::new();
        let permissions: Vec<Permission> = inputs
            .into_iter()
            .filter(|input| {
                let fresh = seen.insert(input.key());
                if !fresh {
                    warn!(permission = %input.key(), "Permission declared twice, keeping the first");
                }
                fresh
            })
            .map(PermissionInput::into_permission)
            .collect();

        let results = join_all(
            permissions
                .iter()
                .map(|permission| ctx.persistence.permissions.create(permission)),
        )
        .await;
        results.into_iter().collect::<AppResult<Vec<()>>>()?;

        info!(count = permissions.len(), "Permissions installed");
        Ok(())
    }
}

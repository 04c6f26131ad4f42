//! Permission entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plume_core::traits::Entity;
use plume_core::types::PermissionId;

/// A grantable permission declared by a module.
///
/// Only declaration is modelled here; evaluation belongs to the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: PermissionId,
    /// Declaring module.
    pub module: String,
    /// Resource the permission applies to (`pages`, `settings`, ...).
    pub context: String,
    /// Action (`list`, `get`, `create`, `update`, `delete`, ...).
    pub action: String,
    /// Display name.
    pub name: String,
}

impl Permission {
    /// Dotted `module.context.action` identifier.
    pub fn key(&self) -> String {
        format!("{}.{}.{}", self.module, self.context, self.action)
    }
}

impl Entity for Permission {
    type Id = PermissionId;
    const KIND: &'static str = "permission";

    fn id(&self) -> PermissionId {
        self.id
    }
}

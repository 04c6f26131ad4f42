//! Menu entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plume_core::traits::Entity;
use plume_core::types::MenuId;

/// A named navigation menu (`main`, `footer`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Menu {
    /// Unique menu identifier.
    pub id: MenuId,
    /// Template lookup key.
    pub key: String,
    /// Display name.
    pub name: String,
}

impl Menu {
    /// Build a menu with a pre-allocated id.
    pub fn new(id: MenuId, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
        }
    }
}

impl Entity for Menu {
    type Id = MenuId;
    const KIND: &'static str = "menu";

    fn id(&self) -> MenuId {
        self.id
    }
}

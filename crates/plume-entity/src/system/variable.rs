//! System variable entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plume_core::traits::Entity;

/// A site-wide configuration value, keyed by a dot-namespaced key such as
/// `frontend.site.title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SystemVariable {
    /// Globally unique, dot-separated key (`module.category.name`).
    pub key: String,
    /// Display name for the admin interface.
    pub name: String,
    /// Current value. Unset until an administrator provides one.
    pub value: Option<String>,
    /// Help text.
    pub note: Option<String>,
}

impl SystemVariable {
    /// Returns the owning module, i.e. the first key segment.
    pub fn module(&self) -> &str {
        self.key.split('.').next().unwrap_or_default()
    }
}

impl Entity for SystemVariable {
    type Id = String;
    const KIND: &'static str = "system_variable";

    fn id(&self) -> String {
        self.key.clone()
    }
}

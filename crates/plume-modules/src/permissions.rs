//! Shape of `user-permission-install` contributions.

use serde::{Deserialize, Serialize};

use plume_core::types::PermissionId;
use plume_entity::user::Permission;
use plume_hooks::{FieldKind, FieldRules, Shape};

/// The actions every content model exposes.
pub const CRUD_ACTIONS: [&str; 5] = ["list", "get", "create", "update", "delete"];

/// A declared permission, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionInput {
    pub module: String,
    pub context: String,
    pub action: String,
    pub name: String,
}

impl PermissionInput {
    pub fn new(
        module: impl Into<String>,
        context: impl Into<String>,
        action: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            context: context.into(),
            action: action.into(),
            name: name.into(),
        }
    }

    /// `module.context.action`
    pub fn key(&self) -> String {
        format!("{}.{}.{}", self.module, self.context, self.action)
    }

    pub fn into_permission(self) -> Permission {
        Permission {
            id: PermissionId::new(),
            module: self.module,
            context: self.context,
            action: self.action,
            name: self.name,
        }
    }
}

impl Shape for PermissionInput {
    fn field_rules() -> FieldRules {
        FieldRules::new()
            .required("module", FieldKind::String)
            .required("context", FieldKind::String)
            .required("action", FieldKind::String)
            .required("name", FieldKind::String)
    }
}

/// List/get/create/update/delete permissions for one model.
///
/// `label` is the human name used in the display name, e.g. `"Frontend
/// page"` yields `"Frontend page list"`.
pub fn crud(module: &str, context: &str, label: &str) -> Vec<PermissionInput> {
    CRUD_ACTIONS
        .iter()
        .map(|action| PermissionInput::new(module, context, *action, format!("{label} {action}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_covers_every_action() {
        let perms = crud("blog", "posts", "Blog post");
        let keys: Vec<String> = perms.iter().map(PermissionInput::key).collect();
        assert_eq!(
            keys,
            vec![
                "blog.posts.list",
                "blog.posts.get",
                "blog.posts.create",
                "blog.posts.update",
                "blog.posts.delete"
            ]
        );
        assert_eq!(perms[0].name, "Blog post list");
    }

    #[test]
    fn test_into_permission_keeps_key() {
        let input = PermissionInput::new("frontend", "settings", "update", "Frontend settings update");
        let key = input.key();
        assert_eq!(input.into_permission().key(), key);
    }
}

//! Menu item entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plume_core::traits::Entity;
use plume_core::types::{MenuId, MenuItemId};

/// Default sort priority for menu items that do not state one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// A single link inside a [`super::Menu`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    /// Unique item identifier.
    pub id: MenuItemId,
    /// Optional icon name or glyph.
    pub icon: Option<String>,
    /// Link text.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Sort priority (lower sorts first).
    pub priority: i32,
    /// Whether the link opens in a new tab.
    pub target_blank: bool,
    /// The menu this item belongs to.
    pub menu_id: MenuId,
}

impl MenuItem {
    /// Build an item with default priority, no icon, same-tab target.
    pub fn new(menu_id: MenuId, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: MenuItemId::new(),
            icon: None,
            label: label.into(),
            url: url.into(),
            priority: DEFAULT_PRIORITY,
            target_blank: false,
            menu_id,
        }
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Open the link in a new tab.
    pub fn with_target_blank(mut self, target_blank: bool) -> Self {
        self.target_blank = target_blank;
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }
}

impl Entity for MenuItem {
    type Id = MenuItemId;
    const KIND: &'static str = "menu_item";

    fn id(&self) -> MenuItemId {
        self.id
    }
}

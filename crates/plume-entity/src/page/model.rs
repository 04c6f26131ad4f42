//! Page entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plume_core::traits::Entity;
use plume_core::types::PageId;

/// A static content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Page {
    /// Unique page identifier.
    pub id: PageId,
    /// Page title.
    pub title: String,
    /// HTML body, or a `[hook-name]` placeholder substituted at render time.
    pub content: String,
}

impl Page {
    /// Build a new page with a freshly allocated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: PageId::new(),
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Entity for Page {
    type Id = PageId;
    const KIND: &'static str = "page";

    fn id(&self) -> PageId {
        self.id
    }
}

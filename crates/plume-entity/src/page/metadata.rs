//! Publication metadata attached to every page.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plume_core::traits::Entity;
use plume_core::types::PageId;

use super::model::Page;

/// Publication state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "metadata_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MetadataStatus {
    /// Not visible on the site.
    Draft,
    /// Publicly reachable at its slug.
    Published,
}

impl fmt::Display for MetadataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
        }
    }
}

/// Routing and publication metadata for a page.
///
/// Stores create a draft row together with the page; publishing is an
/// update of this row keyed by the page id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PageMetadata {
    /// The page this metadata describes.
    pub page_id: PageId,
    /// Owning module.
    pub module: String,
    /// Model name inside the module.
    pub model: String,
    /// URL slug. Empty for the site root.
    pub slug: String,
    /// Title used for listings and the document head.
    pub title: String,
    /// Publication state.
    pub status: MetadataStatus,
    /// Whether this page is served at `/`.
    pub is_home: bool,
    /// Publication date.
    pub date: DateTime<Utc>,
}

impl PageMetadata {
    /// Draft metadata for a freshly created frontend page.
    pub fn draft(page: &Page) -> Self {
        Self {
            page_id: page.id,
            module: "frontend".to_string(),
            model: "pages".to_string(),
            slug: slugify(&page.title),
            title: page.title.clone(),
            status: MetadataStatus::Draft,
            is_home: false,
            date: Utc::now(),
        }
    }

    /// Metadata that publishes the page under its title slug.
    pub fn published(page: &Page) -> Self {
        Self {
            status: MetadataStatus::Published,
            ..Self::draft(page)
        }
    }

    /// Metadata that publishes the page as the site root.
    pub fn published_home(page: &Page) -> Self {
        Self {
            slug: String::new(),
            status: MetadataStatus::Published,
            is_home: true,
            ..Self::draft(page)
        }
    }

    /// Whether the page is publicly visible.
    pub fn is_published(&self) -> bool {
        self.status == MetadataStatus::Published
    }
}

impl Entity for PageMetadata {
    type Id = PageId;
    const KIND: &'static str = "page_metadata";

    fn id(&self) -> PageId {
        self.page_id
    }
}

/// Lowercase, ASCII-alphanumeric slug with single dashes between words.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About"), "about");
        assert_eq!(slugify("  Privacy & Terms!  "), "privacy-terms");
        assert_eq!(slugify("Release notes 2.0"), "release-notes-2-0");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_published_home_has_empty_slug() {
        let page = Page::new("Home", "[frontend-home-page]");
        let meta = PageMetadata::published_home(&page);
        assert!(meta.is_published());
        assert!(meta.is_home);
        assert_eq!(meta.slug, "");
        assert_eq!(meta.page_id, page.id);
    }

    #[test]
    fn test_published_keeps_title_slug() {
        let page = Page::new("About us", "<p>hi</p>");
        let meta = PageMetadata::published(&page);
        assert_eq!(meta.slug, "about-us");
        assert!(!meta.is_home);
        assert_eq!(PageMetadata::draft(&page).status, MetadataStatus::Draft);
    }
}

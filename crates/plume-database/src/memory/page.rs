//! In-memory page table that maintains page metadata alongside pages.

use std::sync::Arc;

use async_trait::async_trait;

use plume_core::result::AppResult;
use plume_core::traits::Repository;
use plume_core::types::PageId;
use plume_entity::page::{Page, PageMetadata};

use super::repository::MemoryRepository;

/// Page repository that inserts a draft [`PageMetadata`] row with every
/// page it creates.
#[derive(Debug)]
pub struct MemoryPageRepository {
    pages: MemoryRepository<Page>,
    metadata: Arc<MemoryRepository<PageMetadata>>,
}

impl MemoryPageRepository {
    /// Create a page table writing metadata into `metadata`.
    pub fn new(metadata: Arc<MemoryRepository<PageMetadata>>) -> Self {
        Self {
            pages: MemoryRepository::new(),
            metadata,
        }
    }
}

#[async_trait]
impl Repository<Page> for MemoryPageRepository {
    async fn create(&self, page: &Page) -> AppResult<()> {
        self.pages.create(page).await?;
        if let Err(e) = self.metadata.create(&PageMetadata::draft(page)).await {
            self.pages.remove(&page.id);
            return Err(e);
        }
        Ok(())
    }

    async fn update(&self, page: &Page) -> AppResult<()> {
        self.pages.update(page).await
    }

    async fn find_by_id(&self, id: &PageId) -> AppResult<Option<Page>> {
        self.pages.find_by_id(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Page>> {
        self.pages.find_all().await
    }

    async fn count(&self) -> AppResult<u64> {
        self.pages.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_entity::page::MetadataStatus;

    #[tokio::test]
    async fn test_create_page_adds_draft_metadata() {
        let metadata = Arc::new(MemoryRepository::<PageMetadata>::new());
        let pages = MemoryPageRepository::new(metadata.clone());
        let page = Page::new("About", "<p>About</p>");

        pages.create(&page).await.unwrap();

        let meta = metadata.find_by_id(&page.id).await.unwrap().unwrap();
        assert_eq!(meta.status, MetadataStatus::Draft);
        assert_eq!(meta.slug, "about");
    }

    #[tokio::test]
    async fn test_metadata_conflict_rolls_back_page() {
        let metadata = Arc::new(MemoryRepository::<PageMetadata>::new());
        let pages = MemoryPageRepository::new(metadata.clone());
        let page = Page::new("About", "<p>About</p>");
        metadata.create(&PageMetadata::draft(&page)).await.unwrap();

        assert!(pages.create(&page).await.is_err());
        assert_eq!(pages.count().await.unwrap(), 0);
    }
}

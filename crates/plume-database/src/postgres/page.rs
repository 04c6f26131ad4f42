//! Page and page metadata repositories.

use async_trait::async_trait;
use sqlx::PgPool;

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;
use plume_core::traits::Repository;
use plume_core::types::PageId;
use plume_entity::page::{Page, PageMetadata};

use super::{ensure_updated, insert_error};

/// Repository for pages. Creating a page also inserts its draft metadata
/// row inside the same transaction.
#[derive(Debug, Clone)]
pub struct PgPageRepository {
    pool: PgPool,
}

impl PgPageRepository {
    /// Create a new page repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Page> for PgPageRepository {
    async fn create(&self, page: &Page) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        sqlx::query("INSERT INTO pages (id, title, content) VALUES ($1, $2, $3)")
            .bind(page.id)
            .bind(&page.title)
            .bind(&page.content)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error("page", e))?;

        let meta = PageMetadata::draft(page);
        sqlx::query(
            "INSERT INTO page_metadata (page_id, module, model, slug, title, status, is_home, date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(meta.page_id)
        .bind(&meta.module)
        .bind(&meta.model)
        .bind(&meta.slug)
        .bind(&meta.title)
        .bind(meta.status)
        .bind(meta.is_home)
        .bind(meta.date)
        .execute(&mut *tx)
        .await
        .map_err(|e| insert_error("page metadata", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit page", e))
    }

    async fn update(&self, page: &Page) -> AppResult<()> {
        let result = sqlx::query("UPDATE pages SET title = $2, content = $3 WHERE id = $1")
            .bind(page.id)
            .bind(&page.title)
            .bind(&page.content)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update page", e))?;
        ensure_updated("page", page.id, result.rows_affected())
    }

    async fn find_by_id(&self, id: &PageId) -> AppResult<Option<Page>> {
        sqlx::query_as::<_, Page>("SELECT id, title, content FROM pages WHERE id = $1")
            .bind(*id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find page", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Page>> {
        sqlx::query_as::<_, Page>("SELECT id, title, content FROM pages ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list pages", e))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count pages", e))?;
        Ok(count as u64)
    }
}

/// Repository for page metadata rows, keyed by page id.
#[derive(Debug, Clone)]
pub struct PgPageMetadataRepository {
    pool: PgPool,
}

impl PgPageMetadataRepository {
    /// Create a new page metadata repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<PageMetadata> for PgPageMetadataRepository {
    async fn create(&self, meta: &PageMetadata) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO page_metadata (page_id, module, model, slug, title, status, is_home, date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(meta.page_id)
        .bind(&meta.module)
        .bind(&meta.model)
        .bind(&meta.slug)
        .bind(&meta.title)
        .bind(meta.status)
        .bind(meta.is_home)
        .bind(meta.date)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error("page metadata", e))?;
        Ok(())
    }

    async fn update(&self, meta: &PageMetadata) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE page_metadata SET module = $2, model = $3, slug = $4, title = $5, \
             status = $6, is_home = $7, date = $8 WHERE page_id = $1",
        )
        .bind(meta.page_id)
        .bind(&meta.module)
        .bind(&meta.model)
        .bind(&meta.slug)
        .bind(&meta.title)
        .bind(meta.status)
        .bind(meta.is_home)
        .bind(meta.date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update page metadata", e)
        })?;
        ensure_updated("page metadata", meta.page_id, result.rows_affected())
    }

    async fn find_by_id(&self, id: &PageId) -> AppResult<Option<PageMetadata>> {
        sqlx::query_as::<_, PageMetadata>(
            "SELECT page_id, module, model, slug, title, status, is_home, date \
             FROM page_metadata WHERE page_id = $1",
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find page metadata", e))
    }

    async fn find_all(&self) -> AppResult<Vec<PageMetadata>> {
        sqlx::query_as::<_, PageMetadata>(
            "SELECT page_id, module, model, slug, title, status, is_home, date \
             FROM page_metadata ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list page metadata", e))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM page_metadata")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count page metadata", e)
            })?;
        Ok(count as u64)
    }
}

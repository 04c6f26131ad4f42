//! Menu and menu item repositories.

use async_trait::async_trait;
use sqlx::PgPool;

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;
use plume_core::traits::Repository;
use plume_core::types::{MenuId, MenuItemId};
use plume_entity::menu::{Menu, MenuItem};

use super::{ensure_updated, insert_error};

/// Repository for menus.
#[derive(Debug, Clone)]
pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    /// Create a new menu repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Menu> for PgMenuRepository {
    async fn create(&self, menu: &Menu) -> AppResult<()> {
        sqlx::query("INSERT INTO menus (id, key, name) VALUES ($1, $2, $3)")
            .bind(menu.id)
            .bind(&menu.key)
            .bind(&menu.name)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error("menu", e))?;
        Ok(())
    }

    async fn update(&self, menu: &Menu) -> AppResult<()> {
        let result = sqlx::query("UPDATE menus SET key = $2, name = $3 WHERE id = $1")
            .bind(menu.id)
            .bind(&menu.key)
            .bind(&menu.name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update menu", e))?;
        ensure_updated("menu", menu.id, result.rows_affected())
    }

    async fn find_by_id(&self, id: &MenuId) -> AppResult<Option<Menu>> {
        sqlx::query_as::<_, Menu>("SELECT id, key, name FROM menus WHERE id = $1")
            .bind(*id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find menu", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Menu>> {
        sqlx::query_as::<_, Menu>("SELECT id, key, name FROM menus ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list menus", e))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count menus", e))?;
        Ok(count as u64)
    }
}

/// Repository for menu items.
#[derive(Debug, Clone)]
pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    /// Create a new menu item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<MenuItem> for PgMenuItemRepository {
    async fn create(&self, item: &MenuItem) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO menu_items (id, icon, label, url, priority, target_blank, menu_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(item.id)
        .bind(&item.icon)
        .bind(&item.label)
        .bind(&item.url)
        .bind(item.priority)
        .bind(item.target_blank)
        .bind(item.menu_id)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error("menu item", e))?;
        Ok(())
    }

    async fn update(&self, item: &MenuItem) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE menu_items SET icon = $2, label = $3, url = $4, priority = $5, \
             target_blank = $6, menu_id = $7 WHERE id = $1",
        )
        .bind(item.id)
        .bind(&item.icon)
        .bind(&item.label)
        .bind(&item.url)
        .bind(item.priority)
        .bind(item.target_blank)
        .bind(item.menu_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update menu item", e))?;
        ensure_updated("menu item", item.id, result.rows_affected())
    }

    async fn find_by_id(&self, id: &MenuItemId) -> AppResult<Option<MenuItem>> {
        sqlx::query_as::<_, MenuItem>(
            "SELECT id, icon, label, url, priority, target_blank, menu_id FROM menu_items WHERE id = $1",
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find menu item", e))
    }

    async fn find_all(&self) -> AppResult<Vec<MenuItem>> {
        sqlx::query_as::<_, MenuItem>(
            "SELECT id, icon, label, url, priority, target_blank, menu_id FROM menu_items ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list menu items", e))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count menu items", e)
            })?;
        Ok(count as u64)
    }
}

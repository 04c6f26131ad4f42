//! Permission repository.

use async_trait::async_trait;
use sqlx::PgPool;

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;
use plume_core::traits::Repository;
use plume_core::types::PermissionId;
use plume_entity::user::Permission;

use super::{ensure_updated, insert_error};

/// Repository for declared permissions.
#[derive(Debug, Clone)]
pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Permission> for PgPermissionRepository {
    async fn create(&self, permission: &Permission) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO permissions (id, module, context, action, name) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(permission.id)
        .bind(&permission.module)
        .bind(&permission.context)
        .bind(&permission.action)
        .bind(&permission.name)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error("permission", e))?;
        Ok(())
    }

    async fn update(&self, permission: &Permission) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE permissions SET module = $2, context = $3, action = $4, name = $5 WHERE id = $1",
        )
        .bind(permission.id)
        .bind(&permission.module)
        .bind(&permission.context)
        .bind(&permission.action)
        .bind(&permission.name)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update permission", e))?;
        ensure_updated("permission", permission.id, result.rows_affected())
    }

    async fn find_by_id(&self, id: &PermissionId) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT id, module, context, action, name FROM permissions WHERE id = $1",
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find permission", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT id, module, context, action, name FROM permissions ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list permissions", e))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM permissions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count permissions", e)
            })?;
        Ok(count as u64)
    }
}

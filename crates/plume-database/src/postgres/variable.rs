//! System variable repository.

use async_trait::async_trait;
use sqlx::PgPool;

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;
use plume_core::traits::Repository;
use plume_entity::system::SystemVariable;

use super::{ensure_updated, insert_error};

/// Repository for system variables, keyed by their dotted key.
#[derive(Debug, Clone)]
pub struct PgSystemVariableRepository {
    pool: PgPool,
}

impl PgSystemVariableRepository {
    /// Create a new system variable repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<SystemVariable> for PgSystemVariableRepository {
    async fn create(&self, variable: &SystemVariable) -> AppResult<()> {
        sqlx::query("INSERT INTO system_variables (key, name, value, note) VALUES ($1, $2, $3, $4)")
            .bind(&variable.key)
            .bind(&variable.name)
            .bind(&variable.value)
            .bind(&variable.note)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error("system variable", e))?;
        Ok(())
    }

    async fn update(&self, variable: &SystemVariable) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE system_variables SET name = $2, value = $3, note = $4 WHERE key = $1",
        )
        .bind(&variable.key)
        .bind(&variable.name)
        .bind(&variable.value)
        .bind(&variable.note)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update system variable", e)
        })?;
        ensure_updated("system variable", &variable.key, result.rows_affected())
    }

    async fn find_by_id(&self, key: &String) -> AppResult<Option<SystemVariable>> {
        sqlx::query_as::<_, SystemVariable>(
            "SELECT key, name, value, note FROM system_variables WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find system variable", e))
    }

    async fn find_all(&self) -> AppResult<Vec<SystemVariable>> {
        sqlx::query_as::<_, SystemVariable>(
            "SELECT key, name, value, note FROM system_variables ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list system variables", e))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM system_variables")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count system variables", e)
            })?;
        Ok(count as u64)
    }
}

//! PostgreSQL repository implementations.

pub mod menu;
pub mod page;
pub mod permission;
pub mod variable;

pub use menu::{PgMenuItemRepository, PgMenuRepository};
pub use page::{PgPageMetadataRepository, PgPageRepository};
pub use permission::PgPermissionRepository;
pub use variable::PgSystemVariableRepository;

use plume_core::error::{AppError, ErrorKind};

/// Map an insert failure, turning unique violations into conflicts.
pub(crate) fn insert_error(kind: &str, e: sqlx::Error) -> AppError {
    let unique_violation = e
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if unique_violation {
        AppError::with_source(ErrorKind::Conflict, format!("{kind} already exists"), e)
    } else {
        AppError::with_source(ErrorKind::Database, format!("Failed to create {kind}"), e)
    }
}

/// Turn a zero-row update into a not-found error.
pub(crate) fn ensure_updated(kind: &str, id: impl std::fmt::Display, rows: u64) -> Result<(), AppError> {
    if rows == 0 {
        Err(AppError::not_found(format!("{kind} '{id}' not found")))
    } else {
        Ok(())
    }
}

//! Convenience result type alias for Plume.

use crate::error::AppError;

/// A specialized `Result` type for Plume operations.
pub type AppResult<T> = Result<T, AppError>;

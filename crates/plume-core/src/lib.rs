//! # plume-core
//!
//! Core crate for Plume. Contains the unified error system, configuration
//! schemas, typed identifiers, and the persistence traits implemented by
//! `plume-database`.
//!
//! This crate has **no** internal dependencies on other Plume crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

//! User-related entities.

pub mod permission;

pub use permission::Permission;

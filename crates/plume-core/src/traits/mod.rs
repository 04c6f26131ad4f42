//! Core traits defined in `plume-core` and implemented by other crates.

pub mod repository;

pub use repository::{Entity, Repository};

//! # plume-entity
//!
//! Content entity models for Plume. Every struct in this crate represents a
//! database table row. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and `sqlx::FromRow`, and implement
//! [`plume_core::traits::Entity`].

pub mod menu;
pub mod page;
pub mod system;
pub mod user;

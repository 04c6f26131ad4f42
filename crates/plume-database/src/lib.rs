//! # plume-database
//!
//! Persistence collaborator for Plume. Provides an in-memory store for
//! tests and throwaway sites, a PostgreSQL store for real deployments, and
//! the [`Persistence`] bundle the installer writes through.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod persistence;
pub mod postgres;

pub use connection::DatabasePool;
pub use memory::MemoryRepository;
pub use persistence::Persistence;

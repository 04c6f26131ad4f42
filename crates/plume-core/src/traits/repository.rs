//! Generic persistence traits.
//!
//! The installer only ever talks to storage through [`Repository`]. Each
//! call is expected to be atomic on its own; nothing here spans a
//! transaction across calls.

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;

use crate::result::AppResult;

/// A persisted record with a stable identity.
pub trait Entity: Clone + Send + Sync + serde::Serialize + 'static {
    /// Primary key type.
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Short record name used in log fields and error messages.
    const KIND: &'static str;

    /// Returns the primary key of this record.
    fn id(&self) -> Self::Id;
}

/// Generic CRUD repository trait.
///
/// Entity-specific query methods live on the concrete repository structs.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync + fmt::Debug {
    /// Insert a new record. Fails with a conflict if the id is taken.
    async fn create(&self, entity: &E) -> AppResult<()>;

    /// Replace an existing record. Fails with not-found if it is missing.
    async fn update(&self, entity: &E) -> AppResult<()>;

    /// Find a record by its primary key.
    async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>>;

    /// Return every record in insertion order.
    async fn find_all(&self) -> AppResult<Vec<E>>;

    /// Count records.
    async fn count(&self) -> AppResult<u64>;

    /// Insert a batch of records, one after another, stopping at the first
    /// failure.
    async fn create_all(&self, entities: &[E]) -> AppResult<()> {
        for entity in entities {
            self.create(entity).await?;
        }
        Ok(())
    }
}

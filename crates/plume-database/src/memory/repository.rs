//! Generic in-memory repository.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use plume_core::error::AppError;
use plume_core::result::AppResult;
use plume_core::traits::{Entity, Repository};

/// Thread-safe in-memory table for one entity type.
///
/// Each record is stamped with a monotonically increasing sequence number
/// so [`Repository::find_all`] can return insertion order.
pub struct MemoryRepository<E: Entity> {
    records: DashMap<E::Id, (u64, E)>,
    sequence: AtomicU64,
}

impl<E: Entity> MemoryRepository<E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Remove a record, returning it if it existed.
    pub fn remove(&self, id: &E::Id) -> Option<E> {
        self.records.remove(id).map(|(_, (_, entity))| entity)
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for MemoryRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("kind", &E::KIND)
            .field("records", &self.records.len())
            .finish()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn create(&self, entity: &E) -> AppResult<()> {
        match self.records.entry(entity.id()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "{} '{}' already exists",
                E::KIND,
                entity.id()
            ))),
            Entry::Vacant(slot) => {
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                slot.insert((seq, entity.clone()));
                Ok(())
            }
        }
    }

    async fn update(&self, entity: &E) -> AppResult<()> {
        match self.records.get_mut(&entity.id()) {
            Some(mut record) => {
                record.1 = entity.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "{} '{}' not found",
                E::KIND,
                entity.id()
            ))),
        }
    }

    async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>> {
        Ok(self.records.get(id).map(|record| record.1.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<E>> {
        let mut rows: Vec<(u64, E)> = self
            .records
            .iter()
            .map(|record| record.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, entity)| entity).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::error::ErrorKind;
    use plume_core::types::MenuId;
    use plume_entity::menu::Menu;
    use plume_entity::system::SystemVariable;

    fn variable(key: &str) -> SystemVariable {
        SystemVariable {
            key: key.to_string(),
            name: key.to_string(),
            value: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryRepository::<Menu>::new();
        let menu = Menu::new(MenuId::new(), "main", "Main menu");
        repo.create(&menu).await.unwrap();

        assert_eq!(repo.find_by_id(&menu.id).await.unwrap(), Some(menu));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let repo = MemoryRepository::<SystemVariable>::new();
        repo.create(&variable("frontend.site.title")).await.unwrap();
        let err = repo
            .create(&variable("frontend.site.title"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = MemoryRepository::<SystemVariable>::new();
        let err = repo.update(&variable("blog.home.title")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = MemoryRepository::<SystemVariable>::new();
        let keys = ["c.c.c", "a.a.a", "b.b.b"];
        repo.create_all(&keys.map(variable)).await.unwrap();

        let found: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.key)
            .collect();
        assert_eq!(found, keys);
    }
}

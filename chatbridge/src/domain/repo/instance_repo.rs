use chatbridge_sdk::models::ServiceInstance;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::traits::{InstanceRepository, RepositoryError};

/// In-memory instance record store backed by `DashMap`.
///
/// The name index is the uniqueness constraint: `insert` claims the
/// `(module, instance)` key through the map's entry API, so two concurrent
/// inserts for the same pair resolve to exactly one winner.
pub struct InMemoryInstanceRepo {
    /// Primary store: instance id -> record.
    store: DashMap<Uuid, ServiceInstance>,
    /// Unique index: (module_name, instance_name) -> instance id.
    name_index: DashMap<(String, String), Uuid>,
}

impl InMemoryInstanceRepo {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
            name_index: DashMap::new(),
        }
    }
}

impl Default for InMemoryInstanceRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InstanceRepository for InMemoryInstanceRepo {
    async fn insert(
        &self,
        module_name: &str,
        instance_name: &str,
    ) -> Result<ServiceInstance, RepositoryError> {
        let key = (module_name.to_owned(), instance_name.to_owned());

        match self.name_index.entry(key) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "instance '{instance_name}' of module '{module_name}' already exists"
            ))),
            Entry::Vacant(slot) => {
                let record = ServiceInstance {
                    id: Uuid::new_v4(),
                    module_name: module_name.to_owned(),
                    instance_name: instance_name.to_owned(),
                    configured: true,
                    enabled: true,
                };
                slot.insert(record.id);
                self.store.insert(record.id, record.clone());
                Ok(record)
            }
        }
    }

    async fn get_by_id(&self, id: Uuid) -> Result<ServiceInstance, RepositoryError> {
        self.store
            .get(&id)
            .map(|r| r.clone())
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_name(
        &self,
        module_name: &str,
        instance_name: &str,
    ) -> Result<Option<ServiceInstance>, RepositoryError> {
        let key = (module_name.to_owned(), instance_name.to_owned());
        let Some(id) = self.name_index.get(&key).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.store.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> Result<Vec<ServiceInstance>, RepositoryError> {
        let mut records: Vec<ServiceInstance> =
            self.store.iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| {
            (a.module_name.as_str(), a.instance_name.as_str())
                .cmp(&(b.module_name.as_str(), b.instance_name.as_str()))
        });
        Ok(records)
    }

    async fn set_enabled(
        &self,
        id: Uuid,
        enabled: bool,
    ) -> Result<ServiceInstance, RepositoryError> {
        let mut record = self.store.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.enabled = enabled;
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_id_and_sets_flags() {
        let repo = InMemoryInstanceRepo::new();
        let record = repo.insert("telegram", "main").await.unwrap();

        assert!(record.configured);
        assert!(record.enabled);
        assert_eq!(repo.get_by_id(record.id).await.unwrap(), record);
    }

    #[tokio::test]
    async fn duplicate_name_pair_conflicts() {
        let repo = InMemoryInstanceRepo::new();
        repo.insert("telegram", "main").await.unwrap();

        let err = repo.insert("telegram", "main").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // Same instance name under another module is fine.
        assert!(repo.insert("discord", "main").await.is_ok());
    }

    #[tokio::test]
    async fn set_enabled_is_idempotent() {
        let repo = InMemoryInstanceRepo::new();
        let record = repo.insert("telegram", "main").await.unwrap();

        let once = repo.set_enabled(record.id, false).await.unwrap();
        let twice = repo.set_enabled(record.id, false).await.unwrap();
        assert!(!once.enabled);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn set_enabled_unknown_id() {
        let repo = InMemoryInstanceRepo::new();
        let err = repo.set_enabled(Uuid::new_v4(), true).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name_pair() {
        let repo = InMemoryInstanceRepo::new();
        repo.insert("telegram", "b").await.unwrap();
        repo.insert("discord", "z").await.unwrap();
        repo.insert("telegram", "a").await.unwrap();

        let records = repo.list().await.unwrap();
        let names: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.module_name.as_str(), r.instance_name.as_str()))
            .collect();
        assert_eq!(
            names,
            [("discord", "z"), ("telegram", "a"), ("telegram", "b")]
        );
    }
}

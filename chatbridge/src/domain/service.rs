use std::sync::Arc;

use chatbridge_sdk::error::BridgeError;
use chatbridge_sdk::models::{ConfigMap, InstanceWithModule, ServiceInstance, ServiceModule};
use chatbridge_sdk::schema::FieldDescriptor;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::introspect;
use super::registry::ModuleRegistry;
use super::repo::traits::{DocumentStore, InstanceRepository, RepositoryError};
use super::validate::{ValidationMode, validate};

/// Instance lifecycle manager: coordinates the module registry, the record
/// store, and the settings-document store.
pub struct LifecycleService {
    registry: ModuleRegistry,
    instances: Arc<dyn InstanceRepository>,
    documents: Arc<dyn DocumentStore>,
    validation: ValidationMode,
    /// Per-(module, instance) locks shared by creation and the orphan
    /// sweep. The record store's unique constraint is the authoritative
    /// duplicate arbiter; the lock closes the check-then-act window so a
    /// losing racer fails cleanly at the duplicate check, and keeps the
    /// sweep from taking an in-flight create's document for an orphan.
    /// Entries are evicted once idle.
    creation_locks: DashMap<(String, String), Arc<Mutex<()>>>,
}

impl LifecycleService {
    #[must_use]
    pub fn new(
        registry: ModuleRegistry,
        instances: Arc<dyn InstanceRepository>,
        documents: Arc<dyn DocumentStore>,
        validation: ValidationMode,
    ) -> Self {
        Self {
            registry,
            instances,
            documents,
            validation,
            creation_locks: DashMap::new(),
        }
    }

    /// Enumerate installable modules.
    #[must_use]
    pub fn list_modules(&self) -> Vec<ServiceModule> {
        self.registry.list_modules()
    }

    /// Resolve a module's introspected field descriptors.
    ///
    /// # Errors
    /// `ModuleNotFound` for unknown modules; `SchemaIntrospection` when the
    /// module's schema is malformed.
    pub fn get_schema(&self, module_name: &str) -> Result<Vec<FieldDescriptor>, BridgeError> {
        let schema = self.registry.get_schema(module_name)?;
        introspect::describe_fields(module_name, &schema)
    }

    /// Create a configured, enabled instance of a module.
    ///
    /// The settings document is written before the record on purpose: a
    /// failure in between leaves an orphaned document that the sweep
    /// reclaims, never a record that falsely reports `configured = true`.
    ///
    /// # Errors
    /// `ModuleNotFound`, `SchemaMismatch` (carrying every missing field),
    /// `DuplicateInstance`, or `Storage` when either backing store fails.
    pub async fn create_instance(
        &self,
        module_name: &str,
        instance_name: &str,
        config: ConfigMap,
    ) -> Result<ServiceInstance, BridgeError> {
        let schema = self.registry.get_schema(module_name)?;
        let descriptors = introspect::describe_fields(module_name, &schema)?;
        validate(&descriptors, &config, self.validation)
            .map_err(|violations| BridgeError::SchemaMismatch { violations })?;

        let key = (module_name.to_owned(), instance_name.to_owned());
        let lock = self.creation_locks.entry(key.clone()).or_default().clone();
        let result = {
            let _guard = lock.lock().await;
            self.create_locked(module_name, instance_name, &config).await
        };
        self.release_lock(&key);
        result
    }

    /// Caller must hold the creation lock for the pair.
    async fn create_locked(
        &self,
        module_name: &str,
        instance_name: &str,
        config: &ConfigMap,
    ) -> Result<ServiceInstance, BridgeError> {
        // Fast path only; the insert below re-checks under the store's
        // unique constraint.
        let existing = self
            .instances
            .find_by_name(module_name, instance_name)
            .await
            .map_err(repo_to_storage)?;
        if existing.is_some() {
            return Err(BridgeError::DuplicateInstance {
                module: module_name.to_owned(),
                instance: instance_name.to_owned(),
            });
        }

        self.documents
            .write(module_name, instance_name, config)
            .await?;

        let record = self
            .instances
            .insert(module_name, instance_name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => BridgeError::DuplicateInstance {
                    module: module_name.to_owned(),
                    instance: instance_name.to_owned(),
                },
                other => repo_to_storage(other),
            })?;

        info!(
            module = module_name,
            instance = instance_name,
            id = %record.id,
            "created service instance"
        );
        Ok(record)
    }

    /// List all persisted instances joined with module discovery metadata.
    ///
    /// Instances whose module is no longer registered are returned with
    /// `module: None`, never dropped.
    ///
    /// # Errors
    /// `Storage` when the record store fails.
    pub async fn list_instances(&self) -> Result<Vec<InstanceWithModule>, BridgeError> {
        let records = self.instances.list().await.map_err(repo_to_storage)?;
        Ok(records
            .into_iter()
            .map(|instance| {
                let module = self.registry.get_module(&instance.module_name).ok();
                if module.is_none() {
                    debug!(
                        module = instance.module_name,
                        instance = instance.instance_name,
                        "instance references an unregistered module"
                    );
                }
                InstanceWithModule { instance, module }
            })
            .collect())
    }

    /// Enable an instance. A no-op when already enabled.
    ///
    /// # Errors
    /// `InstanceNotFound` for unknown ids; `Storage` on store failure.
    pub async fn enable_instance(&self, id: Uuid) -> Result<(), BridgeError> {
        self.set_enabled(id, true).await
    }

    /// Disable an instance. A no-op when already disabled.
    ///
    /// # Errors
    /// `InstanceNotFound` for unknown ids; `Storage` on store failure.
    pub async fn disable_instance(&self, id: Uuid) -> Result<(), BridgeError> {
        self.set_enabled(id, false).await
    }

    async fn set_enabled(&self, id: Uuid, enabled: bool) -> Result<(), BridgeError> {
        self.instances
            .set_enabled(id, enabled)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => BridgeError::InstanceNotFound { id },
                other => repo_to_storage(other),
            })?;
        Ok(())
    }

    /// Delete settings documents whose name pair has no backing record with
    /// `configured = true`. Idempotent; safe to run at any time: each pair
    /// is re-checked under the same per-key lock creation holds, so a
    /// document written by an in-flight create is never taken for an
    /// orphan.
    ///
    /// # Errors
    /// `Storage` when either store fails mid-sweep.
    pub async fn sweep_orphans(&self) -> Result<usize, BridgeError> {
        let mut removed = 0;
        for (module, instance) in self.documents.list().await? {
            let key = (module.clone(), instance.clone());
            let lock = self.creation_locks.entry(key.clone()).or_default().clone();
            let swept = {
                let _guard = lock.lock().await;
                self.sweep_one(&module, &instance).await
            };
            self.release_lock(&key);
            if swept? {
                warn!(module, instance, "removed orphaned settings document");
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Caller must hold the creation lock for the pair.
    async fn sweep_one(&self, module: &str, instance: &str) -> Result<bool, BridgeError> {
        let record = self
            .instances
            .find_by_name(module, instance)
            .await
            .map_err(repo_to_storage)?;
        if record.is_some_and(|r| r.configured) {
            return Ok(false);
        }
        Ok(self.documents.delete(module, instance).await?)
    }

    /// Evict the per-key lock entry once idle. The caller still holds its
    /// own clone, so a strong count of two means map plus caller and no
    /// waiters; the count is read under the map's shard lock, which any new
    /// waiter must also take to clone the entry.
    fn release_lock(&self, key: &(String, String)) {
        self.creation_locks
            .remove_if(key, |_, lock| Arc::strong_count(lock) <= 2);
    }
}

fn repo_to_storage(err: RepositoryError) -> BridgeError {
    BridgeError::Storage {
        detail: err.to_string(),
    }
}

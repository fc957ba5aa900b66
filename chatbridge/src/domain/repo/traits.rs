use chatbridge_sdk::error::BridgeError;
use chatbridge_sdk::models::{ConfigMap, ServiceInstance};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by record-store operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// Errors returned by the settings-document store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(String),
    #[error("invalid document name: {0}")]
    InvalidName(String),
}

impl From<StorageError> for BridgeError {
    fn from(e: StorageError) -> Self {
        Self::Storage {
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

/// Structured record store for `ServiceInstance` rows.
///
/// The `(module_name, instance_name)` uniqueness constraint enforced by
/// `insert` is the authoritative duplicate arbiter; callers treat a
/// `Conflict` as a duplicate-instance failure.
#[async_trait::async_trait]
pub trait InstanceRepository: Send + Sync {
    /// Insert a new instance with `configured = true, enabled = true`. The
    /// store assigns the id.
    ///
    /// # Errors
    /// `Conflict` if the name pair is taken; `Internal` on store failure.
    async fn insert(
        &self,
        module_name: &str,
        instance_name: &str,
    ) -> Result<ServiceInstance, RepositoryError>;

    /// Get an instance by id.
    ///
    /// # Errors
    /// `NotFound` for unknown ids; `Internal` on store failure.
    async fn get_by_id(&self, id: Uuid) -> Result<ServiceInstance, RepositoryError>;

    /// Look up an instance by its name pair.
    ///
    /// # Errors
    /// `Internal` on store failure; an absent record is `Ok(None)`.
    async fn find_by_name(
        &self,
        module_name: &str,
        instance_name: &str,
    ) -> Result<Option<ServiceInstance>, RepositoryError>;

    /// List all persisted instances, ordered by `(module_name, instance_name)`.
    ///
    /// # Errors
    /// `Internal` on store failure.
    async fn list(&self) -> Result<Vec<ServiceInstance>, RepositoryError>;

    /// Set the `enabled` flag. Idempotent: setting the current value is a
    /// successful no-op. Returns the updated record.
    ///
    /// # Errors
    /// `NotFound` for unknown ids; `Internal` on store failure.
    async fn set_enabled(&self, id: Uuid, enabled: bool)
    -> Result<ServiceInstance, RepositoryError>;
}

// ---------------------------------------------------------------------------
// Document store
// ---------------------------------------------------------------------------

/// File-backed store holding one settings document per instance, addressed
/// by the `(module_name, instance_name)` pair.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write (or replace) the document for an instance.
    ///
    /// # Errors
    /// `InvalidName` for names unfit to be file-name components;
    /// `Serialize` or `Io` on write failure.
    async fn write(
        &self,
        module_name: &str,
        instance_name: &str,
        config: &ConfigMap,
    ) -> Result<(), StorageError>;

    /// Read the document for an instance, if present.
    ///
    /// # Errors
    /// `InvalidName`, `Serialize` for an unparsable document, or `Io`.
    async fn read(
        &self,
        module_name: &str,
        instance_name: &str,
    ) -> Result<Option<ConfigMap>, StorageError>;

    /// Delete the document for an instance. Returns whether a document
    /// existed. Deleting an absent document is not an error.
    ///
    /// # Errors
    /// `InvalidName` or `Io`.
    async fn delete(&self, module_name: &str, instance_name: &str) -> Result<bool, StorageError>;

    /// Enumerate the `(module_name, instance_name)` pairs of all stored
    /// documents.
    ///
    /// # Errors
    /// `Io` when the store directory cannot be scanned.
    async fn list(&self) -> Result<Vec<(String, String)>, StorageError>;
}

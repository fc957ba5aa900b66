//! ChatBridge
//!
//! Configuration lifecycle subsystem for pluggable chat-service modules:
//! discovers registered modules and their declared schemas, validates
//! submitted configuration, and tracks named instances across the record
//! store and the settings-document store.

// === PUBLIC API (from SDK) ===
pub use chatbridge_sdk::{
    error::{BridgeError, FieldViolation, ViolationKind},
    models::{ConfigMap, InstanceWithModule, ServiceInstance, ServiceModule},
    plugin::ServicePlugin,
    schema::{ConfigSchema, FieldDescriptor, FieldSpec, FieldType},
};

// === INTERNAL MODULES (pub for integration tests) ===
pub mod config;
pub mod domain;
pub mod infra;
pub mod plugins;

pub use config::BridgeConfig;
pub use domain::registry::{ModuleRegistry, RegistryBuilder};
pub use domain::service::LifecycleService;
pub use domain::validate::ValidationMode;

use std::sync::Arc;

use domain::repo::InstanceRepository;
use infra::storage::TomlDocumentStore;

/// Wire a [`LifecycleService`] from configuration: the TOML document store
/// at `documents_dir`, the caller's registry and record store, and the
/// configured validation mode.
#[must_use]
pub fn build_service(
    registry: ModuleRegistry,
    instances: Arc<dyn InstanceRepository>,
    config: &BridgeConfig,
) -> LifecycleService {
    let documents = Arc::new(TomlDocumentStore::new(config.documents_dir.clone()));
    LifecycleService::new(registry, instances, documents, config.validation)
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A submitted or persisted configuration payload: field name to value.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Discovery metadata for an installable service module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceModule {
    /// Unique module name, the lookup key for instances and schemas.
    pub module_name: String,
    /// Human-readable name for display surfaces.
    pub display_name: String,
    /// Module version as declared by the plugin.
    pub version: String,
}

/// A persisted, named deployment of one module.
///
/// `configured` and `enabled` are independent: creation always yields a
/// configured instance, while enabled is toggled separately afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    /// Identifier assigned by the record store on insert.
    pub id: Uuid,
    /// Weak reference to a `ServiceModule` by name.
    pub module_name: String,
    /// Unique together with `module_name`.
    pub instance_name: String,
    pub configured: bool,
    pub enabled: bool,
}

/// A `ServiceInstance` joined with its module's discovery metadata.
///
/// `module` is `None` when the referenced module is no longer registered;
/// such instances are still listed, never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceWithModule {
    #[serde(flatten)]
    pub instance: ServiceInstance,
    pub module: Option<ServiceModule>,
}

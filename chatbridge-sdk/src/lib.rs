//! ChatBridge SDK
//!
//! Contract crate for the ChatBridge service-module subsystem: domain models,
//! the declarative configuration schema types, the plugin registration trait,
//! and the public error enum. No I/O lives here.

pub mod error;
pub mod models;
pub mod plugin;
pub mod schema;

// === RE-EXPORTS ===
pub use error::{BridgeError, FieldViolation, ViolationKind};
pub use models::{ConfigMap, InstanceWithModule, ServiceInstance, ServiceModule};
pub use plugin::ServicePlugin;
pub use schema::{ConfigSchema, FieldDescriptor, FieldSpec, FieldType};

pub mod introspect;
pub mod registry;
pub mod repo;
pub mod service;
pub mod validate;

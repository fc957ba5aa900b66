use crate::models::ServiceModule;
use crate::schema::ConfigSchema;

/// Registration entry point for a service module.
///
/// A plugin declares its identity and its configuration contract as static
/// data; the registry never loads code by path to discover either. The
/// schema is re-requested on every discovery call, so a plugin must return
/// the same declaration each time.
pub trait ServicePlugin: Send + Sync {
    /// Unique module name. Also the first component of the persisted
    /// settings-document name, so it must stay stable across releases.
    fn module_name(&self) -> &str;

    /// Human-readable name for display surfaces.
    fn display_name(&self) -> &str {
        self.module_name()
    }

    /// Module version advertised in discovery metadata.
    fn version(&self) -> &str;

    /// The declared configuration contract.
    fn config_schema(&self) -> ConfigSchema;

    /// Discovery metadata derived from the other methods.
    fn manifest(&self) -> ServiceModule {
        ServiceModule {
            module_name: self.module_name().to_owned(),
            display_name: self.display_name().to_owned(),
            version: self.version().to_owned(),
        }
    }
}

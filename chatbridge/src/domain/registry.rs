use std::collections::HashSet;
use std::sync::Arc;

use chatbridge_sdk::error::BridgeError;
use chatbridge_sdk::models::ServiceModule;
use chatbridge_sdk::plugin::ServicePlugin;
use chatbridge_sdk::schema::ConfigSchema;
use tracing::warn;

/// Builder collecting plugin registrations before the registry is sealed.
#[derive(Default)]
pub struct RegistryBuilder {
    plugins: Vec<Arc<dyn ServicePlugin>>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn register(mut self, plugin: Arc<dyn ServicePlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    #[must_use]
    pub fn build(self) -> ModuleRegistry {
        ModuleRegistry {
            plugins: self.plugins,
        }
    }
}

/// Registry of installable service modules.
///
/// Immutable after build; every discovery call re-derives its answer from
/// the registered plugin set, so there is no shared iteration state and the
/// registry is safe to call concurrently and repeatedly.
pub struct ModuleRegistry {
    plugins: Vec<Arc<dyn ServicePlugin>>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Enumerate registered modules with their discovery metadata.
    ///
    /// Malformed registrations (empty name, duplicate name, schema with no
    /// fields) are skipped and reported, never fatal to the whole call.
    #[must_use]
    pub fn list_modules(&self) -> Vec<ServiceModule> {
        let mut seen = HashSet::new();
        let mut modules = Vec::new();

        for plugin in &self.plugins {
            let name = plugin.module_name();
            if name.is_empty() {
                warn!("skipping plugin with empty module name");
                continue;
            }
            if !seen.insert(name.to_owned()) {
                warn!(module = name, "skipping duplicate module registration");
                continue;
            }
            if plugin.config_schema().is_empty() {
                warn!(module = name, "skipping module with empty schema");
                continue;
            }
            modules.push(plugin.manifest());
        }

        modules
    }

    /// Resolve one module's declared schema.
    ///
    /// # Errors
    /// Returns `BridgeError::ModuleNotFound` if no plugin with that name is
    /// registered.
    pub fn get_schema(&self, module_name: &str) -> Result<ConfigSchema, BridgeError> {
        self.find(module_name)
            .map(|p| p.config_schema())
            .ok_or_else(|| BridgeError::ModuleNotFound {
                module: module_name.to_owned(),
            })
    }

    /// Resolve one module's discovery metadata.
    ///
    /// # Errors
    /// Returns `BridgeError::ModuleNotFound` if no plugin with that name is
    /// registered.
    pub fn get_module(&self, module_name: &str) -> Result<ServiceModule, BridgeError> {
        self.find(module_name)
            .map(|p| p.manifest())
            .ok_or_else(|| BridgeError::ModuleNotFound {
                module: module_name.to_owned(),
            })
    }

    fn find(&self, module_name: &str) -> Option<&Arc<dyn ServicePlugin>> {
        self.plugins
            .iter()
            .find(|p| p.module_name() == module_name)
    }
}

#[cfg(test)]
mod tests {
    use chatbridge_sdk::schema::FieldSpec;

    use super::*;

    struct StaticPlugin {
        name: &'static str,
        schema: ConfigSchema,
    }

    impl ServicePlugin for StaticPlugin {
        fn module_name(&self) -> &str {
            self.name
        }
        fn version(&self) -> &str {
            "1.0.0"
        }
        fn config_schema(&self) -> ConfigSchema {
            self.schema.clone()
        }
    }

    fn plugin(name: &'static str) -> Arc<dyn ServicePlugin> {
        Arc::new(StaticPlugin {
            name,
            schema: ConfigSchema::builder()
                .field(FieldSpec::string("token"))
                .build(),
        })
    }

    #[test]
    fn lists_registered_modules() {
        let registry = ModuleRegistry::builder()
            .register(plugin("telegram"))
            .register(plugin("discord"))
            .build();

        let modules = registry.list_modules();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].module_name, "telegram");
        assert_eq!(modules[1].module_name, "discord");
    }

    #[test]
    fn repeated_calls_are_independent() {
        let registry = ModuleRegistry::builder().register(plugin("telegram")).build();
        assert_eq!(registry.list_modules(), registry.list_modules());
    }

    #[test]
    fn duplicate_registration_is_skipped() {
        let registry = ModuleRegistry::builder()
            .register(plugin("telegram"))
            .register(plugin("telegram"))
            .build();

        assert_eq!(registry.list_modules().len(), 1);
    }

    #[test]
    fn empty_schema_module_is_skipped_in_listing() {
        let registry = ModuleRegistry::builder()
            .register(Arc::new(StaticPlugin {
                name: "broken",
                schema: ConfigSchema::builder().build(),
            }))
            .register(plugin("discord"))
            .build();

        let modules = registry.list_modules();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].module_name, "discord");
    }

    #[test]
    fn get_schema_unknown_module() {
        let registry = ModuleRegistry::builder().build();
        let err = registry.get_schema("doesnotexist").unwrap_err();
        assert!(matches!(err, BridgeError::ModuleNotFound { module } if module == "doesnotexist"));
    }
}

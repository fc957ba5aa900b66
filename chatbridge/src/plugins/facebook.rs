use chatbridge_sdk::plugin::ServicePlugin;
use chatbridge_sdk::schema::{ConfigSchema, FieldSpec};

/// Facebook Messenger integration using account credentials.
pub struct FacebookPlugin;

impl ServicePlugin for FacebookPlugin {
    fn module_name(&self) -> &str {
        "facebook"
    }

    fn display_name(&self) -> &str {
        "Facebook Messenger"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::builder()
            .field(FieldSpec::string("email"))
            .field(FieldSpec::secret("password"))
            .field(FieldSpec::boolean("forceLogin").optional().with_default(true))
            .build()
    }
}

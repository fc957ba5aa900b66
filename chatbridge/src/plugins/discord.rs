use chatbridge_sdk::plugin::ServicePlugin;
use chatbridge_sdk::schema::{ConfigSchema, FieldSpec};

/// Discord integration driven by a single bot token.
pub struct DiscordPlugin;

impl ServicePlugin for DiscordPlugin {
    fn module_name(&self) -> &str {
        "discord"
    }

    fn display_name(&self) -> &str {
        "Discord"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::builder()
            .field(FieldSpec::secret("token"))
            .build()
    }
}

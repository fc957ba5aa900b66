use chatbridge_sdk::plugin::ServicePlugin;
use chatbridge_sdk::schema::{ConfigSchema, FieldSpec};

/// Telegram integration: MTProto account credentials plus a bot token.
pub struct TelegramPlugin;

impl ServicePlugin for TelegramPlugin {
    fn module_name(&self) -> &str {
        "telegram"
    }

    fn display_name(&self) -> &str {
        "Telegram"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::builder()
            .field(FieldSpec::string("apiId"))
            .field(FieldSpec::secret("apiHash"))
            .field(FieldSpec::string("phoneNumber"))
            .field(FieldSpec::string("telegramUsername").optional())
            .field(FieldSpec::secret("botToken"))
            .build()
    }
}

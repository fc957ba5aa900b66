//! Built-in service plugins.
//!
//! Each plugin registers a static configuration contract through
//! [`ServicePlugin`]; nothing here loads module code to discover a schema.

pub mod discord;
pub mod facebook;
pub mod telegram;

use std::sync::Arc;

use chatbridge_sdk::plugin::ServicePlugin;

pub use discord::DiscordPlugin;
pub use facebook::FacebookPlugin;
pub use telegram::TelegramPlugin;

/// The built-in plugin set, in registration order.
#[must_use]
pub fn builtins() -> Vec<Arc<dyn ServicePlugin>> {
    vec![
        Arc::new(TelegramPlugin),
        Arc::new(FacebookPlugin),
        Arc::new(DiscordPlugin),
    ]
}

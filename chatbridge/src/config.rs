use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::validate::ValidationMode;

/// Configuration for the `chatbridge` subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Directory holding one settings document per instance, named
    /// `<module>.<instance>.toml`. Part of the on-disk contract.
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// Presence-only checking is the compatibility baseline; typed checking
    /// is an explicit opt-in.
    #[serde(default)]
    pub validation: ValidationMode,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            validation: ValidationMode::default(),
        }
    }
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_presence_validation_and_config_dir() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.documents_dir, PathBuf::from("config"));
        assert_eq!(cfg.validation, ValidationMode::Presence);
    }

    #[test]
    fn deserializes_with_all_fields_defaulted() {
        let cfg: BridgeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.validation, ValidationMode::Presence);
    }

    #[test]
    fn rejects_unknown_fields() {
        let res: Result<BridgeConfig, _> = serde_json::from_str(r#"{"nope": 1}"#);
        assert!(res.is_err());
    }
}

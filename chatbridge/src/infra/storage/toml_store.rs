use std::path::{Path, PathBuf};

use chatbridge_sdk::models::ConfigMap;
use serde_json::Value;
use tracing::debug;

use crate::domain::repo::traits::{DocumentStore, StorageError};

/// Settings-document store writing one TOML file per instance.
///
/// Documents are named `<module>.<instance>.toml` inside the store
/// directory. The stem is an on-disk contract: existing deployments address
/// their documents by it, so the naming scheme must not change.
pub struct TomlDocumentStore {
    dir: PathBuf,
}

impl TomlDocumentStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, module_name: &str, instance_name: &str) -> Result<PathBuf, StorageError> {
        validate_name(module_name)?;
        validate_name(instance_name)?;
        Ok(self.dir.join(format!("{module_name}.{instance_name}.toml")))
    }
}

/// Names become file-name components, so the charset is restricted to keep
/// the `<module>.<instance>` stem unambiguous and traversal-proof.
fn validate_name(name: &str) -> Result<(), StorageError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_owned()))
    }
}

/// TOML cannot represent null; absent means unset, so null entries are
/// dropped rather than failing the whole document.
fn strip_nulls(config: &ConfigMap) -> ConfigMap {
    config
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[async_trait::async_trait]
impl DocumentStore for TomlDocumentStore {
    async fn write(
        &self,
        module_name: &str,
        instance_name: &str,
        config: &ConfigMap,
    ) -> Result<(), StorageError> {
        let path = self.path_for(module_name, instance_name)?;
        let body = toml::to_string_pretty(&strip_nulls(config))
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, body).await?;
        debug!(module = module_name, instance = instance_name, "wrote settings document");
        Ok(())
    }

    async fn read(
        &self,
        module_name: &str,
        instance_name: &str,
    ) -> Result<Option<ConfigMap>, StorageError> {
        let path = self.path_for(module_name, instance_name)?;
        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let table: toml::Table =
            body.parse().map_err(|e: toml::de::Error| StorageError::Serialize(e.to_string()))?;
        let value = serde_json::to_value(table).map_err(|e| StorageError::Serialize(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(StorageError::Serialize(
                "document root is not a table".to_owned(),
            )),
        }
    }

    async fn delete(&self, module_name: &str, instance_name: &str) -> Result<bool, StorageError> {
        let path = self.path_for(module_name, instance_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<(String, String)>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut pairs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // The restricted name charset guarantees exactly one separator dot.
            if let Some((module, instance)) = stem.split_once('.') {
                if validate_name(module).is_ok() && validate_name(instance).is_ok() {
                    pairs.push((module.to_owned(), instance.to_owned()));
                }
            }
        }
        pairs.sort();
        Ok(pairs)
    }
}

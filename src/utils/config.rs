use std::path::PathBuf;
use std::sync::Arc;

use easy_config_store::ConfigStore;
use eyre::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub type Config = Arc<ConfigInner>;

pub fn config(path: PathBuf) -> Result<Config> {
    let config_store = ConfigStore::<ConfigInner>::read(path, "config".to_string())?;
    let inner = (*config_store).clone();

    info!("config parsing successful");
    debug!("loaded configuration:\n{}", toml::to_string_pretty(&inner)?);

    Ok(Arc::new(inner))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ConfigInner {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    /// Resolved once at startup; there is no runtime override.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".jobmatch-cache")
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: default_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            dir: default_storage_dir(),
        }
    }
}

impl Default for ConfigInner {
    fn default() -> Self {
        let cfg = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.default.toml",));

        toml::from_str(cfg).unwrap() // should be okay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_config_parses() {
        let config = ConfigInner::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.storage.dir, PathBuf::from(".jobmatch-cache"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: ConfigInner = toml::from_str("").unwrap();
        assert_eq!(config, ConfigInner::default());
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::bridge_config::BridgeConfig;
use crate::error::AppError;

pub const CONFIG_FILE: &str = "bridgeSettings.json";
const APP_DIR: &str = "hue-light";

/// JSON file holding the [`BridgeConfig`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// `<config dir>/hue-light/bridgeSettings.json`, or `bridgeSettings.json`
    /// in the working directory on platforms without a config dir.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join(APP_DIR).join(CONFIG_FILE),
            None => PathBuf::from(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored config. A missing, unreadable or malformed file is the
    /// normal unpaired state and yields an empty config.
    pub fn load(&self) -> BridgeConfig {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored bridge config");
                return BridgeConfig::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read bridge config");
                return BridgeConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed bridge config");
                BridgeConfig::default()
            }
        }
    }

    pub fn save(&self, config: &BridgeConfig) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(config)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "saved bridge config");
        Ok(())
    }
}

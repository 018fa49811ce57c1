//! Application configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{FlasherError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Explicit path to the toolchain binary
    pub toolchain_path: Option<PathBuf>,
    /// Explicit path to the firmware template
    pub template_path: Option<PathBuf>,
    /// Parent directory for build workspaces (OS temp dir when unset)
    pub workspace_root: Option<PathBuf>,
    /// UI configuration
    pub ui: UiConfig,
}

/// UI-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Log level used when no -v/-q flag is given
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Default location: `<config_dir>/keyflash/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::APP_NAME).join("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!(
                "No config file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| FlasherError::io(format!("reading {}", path.display()), e))?;
        let config: AppConfig = toml::from_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path or the default location
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FlasherError::io(format!("creating {}", parent.display()), e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| FlasherError::io(format!("writing {}", path.display()), e))
    }

    /// Log level filter derived from `ui.log_level`
    pub fn log_level(&self) -> log::LevelFilter {
        self.ui
            .log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

const DATABASE_FILE: &str = "payables.db";

fn default_currency_symbol() -> String {
    "$".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database file; defaults to the platform data directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Prefix printed before amounts in tables
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, or from the default location if a file exists there.
    /// A missing default file yields the built-in defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load_from_path(path);
        }

        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "payables")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Database file to open, creating its parent directory when needed.
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        let path = match &self.database_path {
            Some(custom) => custom.clone(),
            None => ProjectDirs::from("", "", "payables")
                .context("Could not determine project directories")?
                .data_dir()
                .join(DATABASE_FILE),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(path)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

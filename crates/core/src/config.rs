//! Application configuration handling.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Directory name used under the platform config and data roots.
pub const APP_DIR: &str = "rentdesk";

/// Runtime configuration for the rental desk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the durable car and customer stores.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration by layering built-in defaults, the optional
    /// config file, and `RENTDESK_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("data_dir", default_data_dir().to_string_lossy().to_string())
            .context("failed to set configuration defaults")?
            .add_source(File::from(config_path()).required(false))
            .add_source(Environment::with_prefix("RENTDESK"))
            .build()
            .context("failed to load configuration")?;
        settings
            .try_deserialize()
            .context("failed to parse configuration")
    }
}

/// Default location of the durable stores.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Location of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Write a commented default config file on first run. An existing
/// file is left untouched.
pub fn ensure_default_config() -> Result<()> {
    let path = config_path();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let contents = format!(
        "# rentdesk configuration\n\
         # Directory holding cars.txt and customers.txt.\n\
         data_dir = \"{}\"\n",
        default_data_dir().display()
    );
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))
}

//! Configuration file handling for fintrack.
//!
//! The configuration file is stored at `$FINTRACK_HOME/config.json` and controls how amounts are
//! displayed, how many entries the recent view shows and where exports are written. The file is
//! optional; without it every setting has its default.

use crate::export::ExportStyle;
use crate::{fs, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "fintrack";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const CURRENCY_SYMBOL: &str = "₹";
const RECENT_LIMIT: usize = 10;
const EXPORTS: &str = "exports";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINTRACK_HOME` and from there it loads `$FINTRACK_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory if needed and writes a default `config.json` into it.
    ///
    /// # Errors
    /// - Returns an error if a config file already exists, or if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        fs::create_dir_all(&maybe_relative).context("Unable to create the fintrack home directory")?;
        let root = fs::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Loads `$FINTRACK_HOME/config.json`. When the file does not exist the defaults are used and
    /// the home directory is not required to exist either.
    ///
    /// # Errors
    /// - Returns an error if the file exists but cannot be read or parsed, or names another app.
    pub fn load(fintrack_home: impl Into<PathBuf>) -> Result<Self> {
        let root = fintrack_home.into();
        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path)?
        } else {
            debug!(
                "No config file at '{}', using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };
        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    pub fn recent_limit(&self) -> usize {
        self.config_file.recent_limit
    }

    pub fn export_style(&self) -> ExportStyle {
        self.config_file.export_style
    }

    /// Returns the stored `export_dir` if it is absolute, otherwise resolves it against the home
    /// directory.
    pub fn export_dir(&self) -> PathBuf {
        let p = &self.config_file.export_dir;
        if p.is_absolute() {
            return p.clone();
        }
        self.root.join(p)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fintrack",
///   "config_version": 1,
///   "currency_symbol": "₹",
///   "recent_limit": 10,
///   "export_dir": "exports",
///   "export_style": "compatible"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct ConfigFile {
    /// Application name, should always be "fintrack"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Prefix used when amounts are displayed
    currency_symbol: String,

    /// Number of entries in the recent transactions view
    recent_limit: usize,

    /// Where `export` writes files, relative to the home directory or absolute
    export_dir: PathBuf,

    /// Quoting used by `export`
    export_style: ExportStyle,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            recent_limit: RECENT_LIMIT,
            export_dir: PathBuf::from(EXPORTS),
            export_style: ExportStyle::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write(p, data).context("Unable to write config file")
    }
}

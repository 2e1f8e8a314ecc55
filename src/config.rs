//! Client configuration file
//!
//! ```toml
//! binary_name = "audiowaveform"
//! bin_dir = "/opt/audiowaveform/bin"   # skips lookup when set
//! locator = "whereis"                  # or "which"
//! timeout_secs = 120
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::invoker::{Audiowaveform, BINARY_NAME, DEFAULT_TIMEOUT};
use crate::locator::{FixedLocator, LocatorKind};

/// Directory name under the user config dir
const CONFIG_DIR_NAME: &str = "audiowaveform-client";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub binary_name: String,
    /// Directory holding the executable; bypasses the locator when set
    pub bin_dir: Option<PathBuf>,
    pub locator: LocatorKind,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            binary_name: BINARY_NAME.to_string(),
            bin_dir: None,
            locator: LocatorKind::default(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ClientConfig {
    /// `<config dir>/audiowaveform-client/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load an explicit config file, or the default one if it exists
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build an invoker, running discovery unless `bin_dir` is set
    pub fn invoker(&self) -> Result<Audiowaveform> {
        let invoker = match &self.bin_dir {
            Some(dir) => Audiowaveform::with_binary(&self.binary_name, &FixedLocator::new(dir)),
            None => Audiowaveform::with_binary(&self.binary_name, &self.locator.locator()),
        }
        .with_context(|| format!("Failed to locate `{}`", self.binary_name))?;

        Ok(invoker.with_timeout(self.timeout()))
    }
}

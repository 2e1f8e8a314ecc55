//! Locating the audiowaveform executable
//!
//! A `BinaryLocator` turns a binary name into the directory that contains it.
//! The default asks `whereis`, which is how a system install is usually found;
//! `WhichLocator` searches `PATH` instead and `FixedLocator` takes a directory
//! from configuration. Tests can supply their own implementation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;

/// Resolves the directory holding an installed binary
pub trait BinaryLocator {
    fn resolve(&self, name: &str) -> Result<PathBuf, DiscoveryError>;
}

impl<T: BinaryLocator + ?Sized> BinaryLocator for &T {
    fn resolve(&self, name: &str) -> Result<PathBuf, DiscoveryError> {
        (**self).resolve(name)
    }
}

impl<T: BinaryLocator + ?Sized> BinaryLocator for Box<T> {
    fn resolve(&self, name: &str) -> Result<PathBuf, DiscoveryError> {
        (**self).resolve(name)
    }
}

/// Which lookup strategy to use, as named in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    #[default]
    Whereis,
    Which,
}

impl LocatorKind {
    pub fn locator(self) -> Box<dyn BinaryLocator> {
        match self {
            LocatorKind::Whereis => Box::new(WhereisLocator::default()),
            LocatorKind::Which => Box::new(WhichLocator::default()),
        }
    }
}

/// Looks binaries up with `whereis -b <name>`
#[derive(Debug, Clone)]
pub struct WhereisLocator {
    program: PathBuf,
}

impl Default for WhereisLocator {
    fn default() -> Self {
        Self {
            program: PathBuf::from("whereis"),
        }
    }
}

impl WhereisLocator {
    /// Use a different lookup program with the same output format
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl BinaryLocator for WhereisLocator {
    fn resolve(&self, name: &str) -> Result<PathBuf, DiscoveryError> {
        let output = Command::new(&self.program)
            .arg("-b")
            .arg(name)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DiscoveryError::LookupFailed {
                name: name.to_string(),
                reason: format!("could not run {}: {e}", self.program.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiscoveryError::LookupFailed {
                name: name.to_string(),
                reason: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let dir = parse_whereis_output(name, &stdout)?;
        tracing::debug!("whereis found {} in {}", name, dir.display());
        Ok(dir)
    }
}

/// Parse `<name>: <path> [<path> ...]` and return the directory of the first path
pub fn parse_whereis_output(name: &str, output: &str) -> Result<PathBuf, DiscoveryError> {
    let not_found = || DiscoveryError::NotFound {
        name: name.to_string(),
    };

    let result = output.trim();
    if result.len() < name.len() + 2 {
        return Err(not_found());
    }

    let entries: Vec<&str> = result.split_whitespace().collect();
    if entries.len() < 2 {
        return Err(not_found());
    }

    match Path::new(entries[1]).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => Err(not_found()),
    }
}

/// Searches `PATH` (or an explicit search path) with the `which` crate
#[derive(Debug, Clone, Default)]
pub struct WhichLocator {
    search_path: Option<OsString>,
}

impl WhichLocator {
    /// Search the given `PATH`-style list instead of the process environment
    pub fn in_paths(paths: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(paths.into()),
        }
    }
}

impl BinaryLocator for WhichLocator {
    fn resolve(&self, name: &str) -> Result<PathBuf, DiscoveryError> {
        let found = match &self.search_path {
            Some(paths) => which::which_in(name, Some(paths), "."),
            None => which::which(name),
        };

        let path = found.map_err(|e| {
            tracing::debug!("which lookup for {} failed: {}", name, e);
            DiscoveryError::NotFound {
                name: name.to_string(),
            }
        })?;

        match path.parent() {
            Some(dir) => Ok(dir.to_path_buf()),
            None => Err(DiscoveryError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}

/// A directory given up front, checked to contain the binary
#[derive(Debug, Clone)]
pub struct FixedLocator {
    dir: PathBuf,
}

impl FixedLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BinaryLocator for FixedLocator {
    fn resolve(&self, name: &str) -> Result<PathBuf, DiscoveryError> {
        if self.dir.join(name).is_file() {
            Ok(self.dir.clone())
        } else {
            Err(DiscoveryError::NotFound {
                name: name.to_string(),
            })
        }
    }
}

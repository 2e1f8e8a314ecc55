//! The audiowaveform invoker
//!
//! `Audiowaveform` holds where the executable lives and how long a run may take.
//! It does not hold arguments: each call to `execute` takes ownership of an
//! `Options` value, so an argument list runs at most once and two calls can never
//! share one. The invoker itself can be reused for any number of runs.
//!
//! # Timeout Behavior
//!
//! When a run exceeds its timeout the process is killed (SIGKILL on Unix,
//! TerminateProcess on Windows), reaped, and `Error::Timeout` is returned.
//! Nothing is retried.
//!
//! Standard output is captured up to 64 MiB. A run that writes more, or whose
//! stdout is still open 10s after the process exits, fails with
//! `Error::OutputTruncated` or `Error::OutputNotCollected` instead of returning
//! a partial copy.

mod config;
mod executor;


use std::path::{Path, PathBuf};
use std::time::Duration;

pub use config::{BINARY_NAME, DEFAULT_TIMEOUT};
pub use executor::{command_line, Output};

use crate::error::Result;
use crate::locator::{BinaryLocator, WhereisLocator};
use crate::options::Options;

/// Runs the audiowaveform executable
#[derive(Debug, Clone)]
pub struct Audiowaveform {
    binary_name: String,
    install_dir: PathBuf,
    timeout: Duration,
}

impl Audiowaveform {
    /// Locate `audiowaveform` with `whereis`
    pub fn new() -> Result<Self> {
        Self::with_locator(&WhereisLocator::default())
    }

    /// Locate `audiowaveform` with the given locator
    pub fn with_locator(locator: &impl BinaryLocator) -> Result<Self> {
        Self::with_binary(BINARY_NAME, locator)
    }

    /// Locate a differently named build of the tool
    pub fn with_binary(name: impl Into<String>, locator: &impl BinaryLocator) -> Result<Self> {
        let binary_name = name.into();
        let install_dir = locator.resolve(&binary_name)?;
        tracing::debug!("Using `{}` from `{}`", binary_name, install_dir.display());

        Ok(Self {
            binary_name,
            install_dir,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Use `install_dir` as-is, without any lookup
    pub fn at(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary_name: BINARY_NAME.to_string(),
            install_dir: install_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    /// Change the binary name; call `relocate` afterwards if it lives elsewhere
    pub fn set_binary_name(&mut self, name: impl Into<String>) {
        self.binary_name = name.into();
    }

    /// Directory the executable was found in
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Override the discovered directory
    pub fn set_install_dir(&mut self, dir: impl Into<PathBuf>) {
        self.install_dir = dir.into();
    }

    /// Run discovery again for the current binary name
    pub fn relocate(&mut self, locator: &impl BinaryLocator) -> Result<&Path> {
        self.install_dir = locator.resolve(&self.binary_name)?;
        Ok(&self.install_dir)
    }

    /// Full path of the executable
    pub fn executable(&self) -> PathBuf {
        self.install_dir.join(&self.binary_name)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The invocation `options` would produce, quoted for a shell
    pub fn command_line(&self, options: &Options) -> String {
        command_line(&self.executable(), &options.args())
    }

    /// Run with `options` and return everything captured
    pub fn run(&self, options: Options) -> Result<Output> {
        self.run_with_timeout(options, self.timeout)
    }

    /// Run with `options` under a one-off timeout
    pub fn run_with_timeout(&self, options: Options, timeout: Duration) -> Result<Output> {
        executor::run_with_timeout(&self.executable(), &options.args(), timeout)
    }

    /// Run with `options` and return standard output as text
    pub fn execute(&self, options: Options) -> Result<String> {
        self.execute_with_timeout(options, self.timeout)
    }

    pub fn execute_with_timeout(&self, options: Options, timeout: Duration) -> Result<String> {
        Ok(self.run_with_timeout(options, timeout)?.stdout_lossy())
    }

    /// Run with `options` and return standard output unchanged
    ///
    /// Use this with `--output-filename -` to receive image or binary data.
    /// Output over the capture limit is an error, never a cut-down image.
    pub fn execute_bytes(&self, options: Options) -> Result<Vec<u8>> {
        Ok(self.run(options)?.stdout)
    }

    /// Version string reported by `audiowaveform --version`
    pub fn version(&self) -> Result<String> {
        let mut options = Options::new();
        options.version();
        Ok(self.execute(options)?.trim().to_string())
    }
}

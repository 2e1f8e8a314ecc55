//! Error types for the audiowaveform client
//!
//! Every failure is returned to the caller synchronously. Nothing is retried.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The executable could not be located on the host
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("command `{name}` not found. Do you have audiowaveform installed?")]
    NotFound { name: String },

    #[error("binary lookup for `{name}` failed: {reason}")]
    LookupFailed { name: String, reason: String },
}

/// A caller supplied a value outside an option's domain
///
/// Raised before the option list is touched, so the builder stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value `{value}` for --{option}: {reason}")]
pub struct InvalidOption {
    pub option: &'static str,
    pub value: String,
    pub reason: String,
}

impl InvalidOption {
    pub fn new(option: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self {
            option,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Client-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    InvalidOption(#[from] InvalidOption),

    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audiowaveform exited with {}: {}", exit_code_label(.exit_code), .stderr.trim())]
    ProcessFailed {
        /// None when the process was terminated by a signal
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("audiowaveform did not finish within {}s and was killed", .timeout.as_secs_f64())]
    Timeout { timeout: Duration, pid: u32 },

    /// The tool succeeded but wrote more than the capture limit
    #[error("audiowaveform {stream} exceeded {limit} bytes and was cut short")]
    OutputTruncated { stream: &'static str, limit: usize },

    /// The tool exited but its output pipe stayed open, usually held by a
    /// leftover grandchild
    #[error("audiowaveform {stream} was still open {}s after exit", .waited.as_secs_f64())]
    OutputNotCollected { stream: &'static str, waited: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by caller input rather than the host or the tool
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::InvalidOption(_))
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

/// Result type alias using the client error
pub type Result<T> = std::result::Result<T, Error>;

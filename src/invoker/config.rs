//! Defaults for running audiowaveform

use std::time::Duration;

/// Name of the executable looked up on the host
pub const BINARY_NAME: &str = "audiowaveform";

/// Default time an invocation may run before it is killed (2 minutes)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for collecting output from child process pipes after exit
pub(crate) const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum captured stdout (64MB), enough for large PNG or JSON output
pub(crate) const MAX_STDOUT_SIZE: usize = 64 * 1024 * 1024;

/// Maximum captured stderr (1MB)
pub(crate) const MAX_STDERR_SIZE: usize = 1024 * 1024;

//! Low-level process execution for audiowaveform invocations

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::process::ChildGuard;

use super::config::{MAX_STDERR_SIZE, MAX_STDOUT_SIZE, OUTPUT_COLLECTION_TIMEOUT};

/// Captured result of a successful audiowaveform run
#[derive(Debug, Clone)]
pub struct Output {
    pub stdout: Vec<u8>,
    /// Progress and information messages, unless `--quiet` was set
    pub stderr: String,
    pub duration: Duration,
}

impl Output {
    /// Standard output as text, with invalid UTF-8 replaced
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Render a program and its arguments as a shell-safe line, for logs and dry runs
pub fn command_line(program: &Path, args: &[String]) -> String {
    std::iter::once(program.to_string_lossy())
        .chain(args.iter().map(|arg| Cow::Borrowed(arg.as_str())))
        .map(shell_escape::escape)
        .collect::<Vec<_>>()
        .join(" ")
}

/// How much output is kept and how long to wait for it once the child exits
#[derive(Debug, Clone, Copy)]
pub(crate) struct CaptureLimits {
    pub stdout: usize,
    pub stderr: usize,
    pub collection_timeout: Duration,
}

impl Default for CaptureLimits {
    fn default() -> Self {
        Self {
            stdout: MAX_STDOUT_SIZE,
            stderr: MAX_STDERR_SIZE,
            collection_timeout: OUTPUT_COLLECTION_TIMEOUT,
        }
    }
}

/// Run `program` with `args`, killing it if it outlives `timeout`
///
/// Each argument is its own argv element; no shell is involved. The child is
/// owned by a `ChildGuard`, so it is killed and reaped on every return path.
pub(crate) fn run_with_timeout(
    program: &Path,
    args: &[String],
    timeout: Duration,
) -> Result<Output> {
    run_captured(program, args, timeout, CaptureLimits::default())
}

/// `run_with_timeout` with explicit capture limits
///
/// A successful run whose stdout was cut at the limit, or never arrived, is an
/// error: callers parse or save stdout and must not get a partial copy.
pub(crate) fn run_captured(
    program: &Path,
    args: &[String],
    timeout: Duration,
    limits: CaptureLimits,
) -> Result<Output> {
    tracing::debug!("Running {}", command_line(program, args));
    let start = Instant::now();

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn {
            program: program.to_path_buf(),
            source,
        })?;
    let mut guard = ChildGuard::new(child);

    // Drain both pipes while waiting. A child that fills a pipe buffer would
    // otherwise block on write and never exit.
    let stdout_rx = drain(guard.child_mut().stdout.take(), limits.stdout);
    let stderr_rx = drain(guard.child_mut().stderr.take(), limits.stderr);

    let status = guard.wait_timeout(timeout)?;
    let duration = start.elapsed();

    let Some(status) = status else {
        let pid = guard.id();
        guard.terminate();
        tracing::warn!(
            "audiowaveform (pid {}) killed after {}s timeout",
            pid,
            timeout.as_secs_f64()
        );
        return Err(Error::Timeout { timeout, pid });
    };

    let stdout = collect(stdout_rx, limits.collection_timeout);
    let stderr = match collect(stderr_rx, limits.collection_timeout) {
        Some((buf, truncated)) => {
            if truncated {
                tracing::warn!("audiowaveform stderr truncated at {} bytes", buf.len());
            }
            String::from_utf8_lossy(&buf).into_owned()
        }
        None => {
            tracing::warn!("timed out collecting audiowaveform stderr");
            String::new()
        }
    };

    if !status.success() {
        tracing::debug!("audiowaveform failed with {}: {}", status, stderr.trim());
        return Err(Error::ProcessFailed {
            exit_code: status.code(),
            stderr,
        });
    }

    let stdout = match stdout {
        Some((buf, false)) => buf,
        Some((_, true)) => {
            tracing::warn!("audiowaveform stdout exceeded {} bytes", limits.stdout);
            return Err(Error::OutputTruncated {
                stream: "stdout",
                limit: limits.stdout,
            });
        }
        None => {
            tracing::warn!("timed out collecting audiowaveform stdout");
            return Err(Error::OutputNotCollected {
                stream: "stdout",
                waited: limits.collection_timeout,
            });
        }
    };

    tracing::info!(
        "audiowaveform finished in {}ms ({} bytes of output)",
        duration.as_millis(),
        stdout.len()
    );

    Ok(Output {
        stdout,
        stderr,
        duration,
    })
}

/// Read a pipe to the end on a background thread
fn drain<R: Read + Send + 'static>(
    stream: Option<R>,
    limit: usize,
) -> mpsc::Receiver<(Vec<u8>, bool)> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                let _ = tx.send(read_stream_capped(stream, limit));
            });
        }
        None => {
            let _ = tx.send((Vec::new(), false));
        }
    }
    rx
}

/// Wait for a drained pipe; `None` if it is still open after `wait`
fn collect(rx: mpsc::Receiver<(Vec<u8>, bool)>, wait: Duration) -> Option<(Vec<u8>, bool)> {
    rx.recv_timeout(wait).ok()
}

/// Read a stream into memory, keeping at most `limit` bytes
///
/// Anything past the limit is read and discarded so the writer never sees a
/// broken pipe. The flag reports whether data was dropped.
fn read_stream_capped<R: Read>(mut stream: R, limit: usize) -> (Vec<u8>, bool) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut truncated = false;

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let remaining = limit.saturating_sub(buf.len());
                let to_copy = n.min(remaining);
                buf.extend_from_slice(&chunk[..to_copy]);
                if to_copy < n {
                    truncated = true;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    (buf, truncated)
}

//! Child process handling
//!
//! `ChildGuard` owns a spawned audiowaveform process and makes sure it is killed
//! and reaped on every exit path, including early returns and panics.

use std::process::{Child, ExitStatus};
use std::time::Duration;

use wait_timeout::ChildExt;

/// Owns a child process until it has been reaped
#[derive(Debug)]
pub struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    pub fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    /// Wait for the child to exit, giving up after `timeout`
    ///
    /// Returns `Ok(None)` if the child is still running when the timeout elapses.
    pub fn wait_timeout(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
        let status = self.child.wait_timeout(timeout)?;
        if status.is_some() {
            self.reaped = true;
        }
        Ok(status)
    }

    /// Kill the child and wait for it so no zombie is left behind
    ///
    /// On Unix this sends SIGKILL, on Windows it calls TerminateProcess.
    pub fn terminate(&mut self) {
        if self.reaped {
            return;
        }
        // The process may already have exited on its own
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Check if a process with the given PID is alive
///
/// Sends the null signal, which checks existence without delivering anything.
/// `EPERM` means the process exists but belongs to someone else.
#[cfg(unix)]
pub fn is_process_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let pid = match i32::try_from(pid) {
        Ok(v) => v,
        // PID exceeds i32::MAX, treat as non-existent
        Err(_) => return false,
    };

    match kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

//! Integration tests for the audiowaveform client
//!
//! These tests stand in a shell script for audiowaveform and drive both the
//! library API and the `awc` binary against it. They are Unix-only.

#![cfg(unix)]

pub mod cli;
pub mod helpers;
pub mod invocation;

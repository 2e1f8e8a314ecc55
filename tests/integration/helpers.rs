//! Shared test helpers: fake audiowaveform executables

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Script that prints each argument on its own line, or the version for --version
pub const ECHO_ARGS_SCRIPT: &str = r#"if [ "$1" = "--version" ]; then
  printf 'AudioWaveform v1.10.3\n'
  exit 0
fi
printf '%s\n' "$@""#;

/// Create a temp dir holding an executable `name` that runs `body` with /bin/sh
pub fn fake_binary_named(name: &str, body: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write fake binary");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake binary executable");
    dir
}

pub fn fake_audiowaveform(body: &str) -> TempDir {
    fake_binary_named("audiowaveform", body)
}

/// A `whereis` replacement that reports `dir/<name>` for any query
pub fn fake_whereis(dir: &Path) -> TempDir {
    fake_binary_named(
        "whereis",
        &format!(r#"echo "$2: {}/$2""#, dir.display()),
    )
}

pub fn awc_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_awc"))
}

/// Run `awc` against the fake binary in `bin_dir`, isolated from any user config
pub fn run_awc(bin_dir: &Path, args: &[&str]) -> Output {
    let config_home = TempDir::new().expect("Failed to create config directory");
    Command::new(awc_binary())
        .args(args)
        .arg("--bin-dir")
        .arg(bin_dir)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run awc")
}

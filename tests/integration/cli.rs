//! End-to-end tests of the `awc` binary

use serial_test::serial;

use super::helpers::{fake_audiowaveform, run_awc, ECHO_ARGS_SCRIPT};

#[test]
#[serial]
fn test_version_command() {
    let bin = fake_audiowaveform(ECHO_ARGS_SCRIPT);
    let output = run_awc(bin.path(), &["version"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "AudioWaveform v1.10.3\n");
}

#[test]
#[serial]
fn test_locate_command_prints_executable() {
    let bin = fake_audiowaveform(ECHO_ARGS_SCRIPT);
    let output = run_awc(bin.path(), &["locate"]);

    assert!(output.status.success());
    let printed = String::from_utf8_lossy(&output.stdout);
    assert_eq!(printed.trim(), bin.path().join("audiowaveform").display().to_string());
}

#[test]
#[serial]
fn test_render_passes_options_through() {
    let bin = fake_audiowaveform(ECHO_ARGS_SCRIPT);
    let output = run_awc(
        bin.path(),
        &[
            "render",
            "-i",
            "in.wav",
            "-o",
            "out.png",
            "--waveform-color",
            "ff000080",
            "--compression",
            "-1",
        ],
    );

    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "--input-filename=in.wav\n--output-filename=out.png\n--waveform-color=ff000080\n--compression=-1\n"
    );
}

#[test]
#[serial]
fn test_render_failure_exits_nonzero_with_stderr() {
    let bin = fake_audiowaveform("echo 'Failed to read file: in.wav' >&2\nexit 1");
    let output = run_awc(bin.path(), &["render", "-i", "in.wav"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read file: in.wav"), "{stderr}");
}

#[test]
#[serial]
fn test_render_timeout_flag() {
    let bin = fake_audiowaveform("exec sleep 30");
    let output = run_awc(bin.path(), &["render", "--timeout", "1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("killed"), "{stderr}");
}

#[test]
#[serial]
fn test_invalid_option_rejected_before_running() {
    let bin = fake_audiowaveform(r#"touch "$(dirname "$0")/ran""#);
    let output = run_awc(bin.path(), &["render", "-b", "24"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("8 or 16"));
    assert!(!bin.path().join("ran").exists());
}

#[test]
#[serial]
fn test_args_command_prints_json() {
    let bin = fake_audiowaveform("exit 1");
    let output = run_awc(bin.path(), &["args", "--json", "-z", "256", "-b", "16", "-q"]);

    assert!(output.status.success());
    let args: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(args, ["--zoom=256", "--bits=16", "--quiet"]);
}

#[test]
#[serial]
fn test_missing_binary_is_reported() {
    let empty = tempfile::TempDir::new().unwrap();
    let output = run_awc(empty.path(), &["version"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to locate `audiowaveform`"));
}

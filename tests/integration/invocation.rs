//! Library-level invocation against fake executables

use std::time::Duration;

use audiowaveform_client::process::is_process_alive;
use audiowaveform_client::{
    Audiowaveform, DiscoveryError, Error, LocatorKind, Options, WhereisLocator, WhichLocator,
};
use serial_test::serial;

use super::helpers::{fake_audiowaveform, fake_binary_named, fake_whereis, ECHO_ARGS_SCRIPT};

#[test]
#[serial]
fn test_discovery_through_whereis_then_execute() {
    let bin = fake_audiowaveform(ECHO_ARGS_SCRIPT);
    let whereis = fake_whereis(bin.path());
    let locator = WhereisLocator::with_program(whereis.path().join("whereis"));

    let invoker = Audiowaveform::with_locator(&locator).unwrap();
    assert_eq!(invoker.install_dir(), bin.path());
    assert_eq!(invoker.version().unwrap(), "AudioWaveform v1.10.3");

    let mut options = Options::new();
    options
        .input_filename("show.flac")
        .unwrap()
        .output_filename("show.json")
        .unwrap()
        .pixels_per_second(20)
        .bits(8)
        .unwrap();
    let stdout = invoker.execute(options).unwrap();
    assert_eq!(
        stdout,
        "--input-filename=show.flac\n--output-filename=show.json\n--pixels-per-second=20\n--bits=8\n"
    );
}

#[test]
#[serial]
fn test_whereis_without_result_is_not_found() {
    let whereis = fake_binary_named("whereis", r#"echo "$2:""#);
    let locator = WhereisLocator::with_program(whereis.path().join("whereis"));

    let err = Audiowaveform::with_locator(&locator).unwrap_err();
    assert!(matches!(
        err,
        Error::Discovery(DiscoveryError::NotFound { ref name }) if name == "audiowaveform"
    ));
}

#[test]
#[serial]
fn test_failing_whereis_is_lookup_failure() {
    let whereis = fake_binary_named("whereis", "echo 'whereis: broken' >&2\nexit 1");
    let locator = WhereisLocator::with_program(whereis.path().join("whereis"));

    let err = Audiowaveform::with_locator(&locator).unwrap_err();
    match err {
        Error::Discovery(DiscoveryError::LookupFailed { name, reason }) => {
            assert_eq!(name, "audiowaveform");
            assert!(reason.contains("broken"));
        }
        other => panic!("expected LookupFailed, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_which_locator_with_custom_binary_name() {
    let bin = fake_binary_named("audiowaveform-nightly", "printf '1.11.0-dev'");
    let locator = WhichLocator::in_paths(bin.path().as_os_str());

    let invoker = Audiowaveform::with_binary("audiowaveform-nightly", &locator).unwrap();
    assert_eq!(invoker.version().unwrap(), "1.11.0-dev");
}

#[test]
#[serial]
fn test_locator_kind_builds_boxed_locator() {
    let locator = LocatorKind::Which.locator();
    let err = Audiowaveform::with_binary("definitely-not-installed-awc-test", &locator)
        .unwrap_err();
    assert!(matches!(err, Error::Discovery(DiscoveryError::NotFound { .. })));
}

#[test]
#[serial]
fn test_failure_then_timeout_then_success() {
    let bin = fake_audiowaveform(
        r#"case "$1" in
  --zoom=1) echo 'Invalid zoom' >&2; exit 1 ;;
  --zoom=2) exec sleep 30 ;;
  *) printf ok ;;
esac"#,
    );
    let invoker = Audiowaveform::at(bin.path()).with_timeout(Duration::from_millis(300));

    let mut failing = Options::new();
    failing.zoom(1);
    match invoker.execute(failing).unwrap_err() {
        Error::ProcessFailed { exit_code, stderr } => {
            assert_eq!(exit_code, Some(1));
            assert_eq!(stderr.trim(), "Invalid zoom");
        }
        other => panic!("expected ProcessFailed, got {other:?}"),
    }

    let mut hanging = Options::new();
    hanging.zoom(2);
    match invoker.execute(hanging).unwrap_err() {
        Error::Timeout { pid, .. } => assert!(!is_process_alive(pid)),
        other => panic!("expected Timeout, got {other:?}"),
    }

    let mut fine = Options::new();
    fine.zoom(3);
    assert_eq!(invoker.execute(fine).unwrap(), "ok");
}

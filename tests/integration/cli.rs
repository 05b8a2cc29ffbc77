//! Driver tests: reserved-flag handling, argument forwarding, and decode
//! failures.

use std::ffi::OsString;

use luban::cli::script_main;
use luban::engine::MockEngine;
use luban::ScriptHost;

fn args(list: &[&str]) -> Vec<OsString> {
    list.iter().map(OsString::from).collect()
}

#[test]
fn test_verbosity_recorded_before_initialize() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    let status = script_main(&mut host, &args(&["-v", "script.py"]));

    assert_eq!(status, 0);
    assert_eq!(host.verbosity(), 1);
    assert_eq!(handle.started_with_signals(), Some(true));
    // both flags forwarded verbatim
    assert_eq!(
        handle.main_calls(),
        vec![vec!["-v".to_string(), "script.py".to_string()]]
    );
}

#[test]
fn test_vv_forces_verbosity_two() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    script_main(&mut host, &args(&["-v", "-vv", "-v"]));
    assert_eq!(host.verbosity(), 2);
}

#[test]
fn test_v_does_not_lower_existing_verbosity() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));
    host.set_verbosity(2);

    script_main(&mut host, &args(&["-v"]));
    assert_eq!(host.verbosity(), 2);
}

#[test]
fn test_enable_bt_is_consumed() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    script_main(&mut host, &args(&["--enable-bt", "script.py"]));

    assert!(host.stack_trace_on_error());
    assert_eq!(handle.main_calls(), vec![vec!["script.py".to_string()]]);
}

#[test]
fn test_version_flag_is_still_forwarded() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    script_main(&mut host, &args(&["-V"]));
    assert_eq!(handle.main_calls(), vec![vec!["-V".to_string()]]);
}

#[test]
fn test_engine_status_passes_through() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));
    handle.set_main_status(42);

    assert_eq!(script_main(&mut host, &args(&["script.py"])), 42);
}

#[cfg(unix)]
#[test]
fn test_undecodable_argument_is_fatal() {
    use std::os::unix::ffi::OsStringExt;

    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    let bad = OsString::from_vec(vec![b'f', 0xFF, b'o']);
    let status = script_main(&mut host, &[bad, OsString::from("script.py")]);

    assert_eq!(status, 1);
    // nothing was forwarded, not even the arguments after the bad one
    assert!(handle.main_calls().is_empty());
}

//! Lifecycle state-machine tests: one-time initialization, idempotent
//! re-entry, finalize semantics, and event fan-out.

use std::sync::Arc;

use luban::engine::MockEngine;
use luban::interpreter::HostEvent;
use luban::ScriptHost;

use crate::common::Recorder;

#[test]
fn test_initialize_returns_true_exactly_once() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    assert!(host.initialize(true));
    assert!(!host.initialize(true));
    assert!(!host.initialize(false));

    // interleaving with finalize does not bring the first-time branch back
    host.finalize();
    assert!(!host.initialize(true));
}

#[test]
fn test_is_initialized_tracks_engine() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    assert!(!host.is_initialized());
    host.initialize(true);
    assert!(host.is_initialized());

    host.finalize();
    assert!(!host.is_initialized());
    assert_eq!(handle.shutdown_count(), 1);
}

#[test]
fn test_finalize_is_a_noop_when_not_running() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    host.finalize();
    assert_eq!(handle.shutdown_count(), 0);

    host.initialize(true);
    host.finalize();
    host.finalize();
    assert_eq!(handle.shutdown_count(), 1);
}

#[test]
fn test_first_initialize_runs_one_time_setup() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    host.initialize(true);

    // the no-op script flush ran before anything else
    assert_eq!(handle.executed(), vec![String::new()]);
    assert!(handle.streams_installed());
    assert!(handle.thread_support_initialized());
    assert_eq!(handle.started_with_signals(), Some(true));

    // second call repeats none of it
    host.initialize(true);
    assert_eq!(handle.executed(), vec![String::new()]);
}

#[test]
fn test_signal_flag_is_forwarded() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    host.initialize(false);
    assert_eq!(handle.started_with_signals(), Some(false));
}

#[test]
fn test_enter_and_exit_events() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    let recorder = Arc::new(Recorder::default());
    host.listeners().register(&recorder);

    host.initialize(true);
    assert_eq!(recorder.events(), vec![HostEvent::Enter]);

    host.finalize();
    assert_eq!(recorder.events(), vec![HostEvent::Enter, HostEvent::Exit]);

    // redundant finalize fires nothing
    host.finalize();
    assert_eq!(recorder.events().len(), 2);
}

#[test]
fn test_dropped_listener_is_never_invoked() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));
    host.initialize(true);

    let doomed = Arc::new(Recorder::default());
    host.listeners().register(&doomed);
    let survivor = Arc::new(Recorder::default());
    host.listeners().register(&survivor);

    drop(doomed);
    host.finalize();

    assert_eq!(survivor.events(), vec![HostEvent::Exit]);
    // the dead entry was pruned rather than resurrected
    assert_eq!(host.listeners().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_undecodable_program_name_becomes_empty() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    let bad = OsString::from_vec(vec![b'p', 0xFF, b'r']);
    host.set_program_name(&bad);

    // the engine still received a name, interned and empty
    assert_eq!(handle.program_name(), Some(String::new()));
}

#[test]
fn test_verbosity_and_stack_trace_state() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    assert_eq!(host.verbosity(), 0);
    host.set_verbosity(5);
    assert_eq!(host.verbosity(), 2); // clamped

    assert!(!host.stack_trace_on_error());
    host.set_stack_trace_on_error(true);
    assert!(host.stack_trace_on_error());
}

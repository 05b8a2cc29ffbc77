//! Stream capture tests: buffered windows flush as single events, DOS
//! line endings are stripped, status codes pass through.

use std::sync::Arc;

use luban::engine::MockEngine;
use luban::interpreter::HostEvent;
use luban::ScriptHost;

use crate::common::{NullDisplay, Recorder};

fn quiet_host() -> (ScriptHost, luban::engine::MockHandle) {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));
    host.set_display(Arc::new(NullDisplay));
    (host, handle)
}

#[test]
fn test_carriage_returns_are_stripped() {
    let (mut host, handle) = quiet_host();

    host.run_simple_string("print('hi')\r\n");
    host.run_simple_string("print('hi')\n");

    let executed = handle.executed();
    // executed[0] is the one-time no-op flush
    assert_eq!(executed[1], "print('hi')\n");
    assert_eq!(executed[1], executed[2]);
}

#[test]
fn test_buffered_output_flushes_as_one_event_per_stream() {
    let (mut host, handle) = quiet_host();
    host.initialize(true);

    let recorder = Arc::new(Recorder::default());
    host.listeners().register(&recorder);

    handle.queue_stdout("hello ");
    handle.queue_stdout("world\n");
    handle.queue_stderr("Traceback: ");
    handle.queue_stderr("boom\n");

    let status = host.run_simple_string("print('hello world')");
    assert_eq!(status, 0);

    // one complete event per non-empty buffer, stderr first
    assert_eq!(
        recorder.events(),
        vec![
            HostEvent::Error("Traceback: boom\n".to_string()),
            HostEvent::Output("hello world\n".to_string()),
        ]
    );

    // buffers are empty once the window is over
    assert_eq!(
        host.bridge().buffer_snapshot(),
        (String::new(), String::new())
    );
    assert!(!host.bridge().is_buffering());
}

#[test]
fn test_silent_execution_fires_no_events() {
    let (mut host, _handle) = quiet_host();
    host.initialize(true);

    let recorder = Arc::new(Recorder::default());
    host.listeners().register(&recorder);

    host.run_simple_string("x = 1");
    assert!(recorder.events().is_empty());
}

#[test]
fn test_status_code_is_returned_raw() {
    let (mut host, handle) = quiet_host();
    host.initialize(true);

    handle.queue_status(-1);
    assert_eq!(host.run_simple_string("raise SystemExit"), -1);
    assert_eq!(host.run_simple_string("pass"), 0);
}

#[test]
fn test_run_simple_string_initializes_on_demand() {
    let (mut host, handle) = quiet_host();

    assert!(!host.is_initialized());
    host.run_simple_string("x = 1");
    assert!(host.is_initialized());
    // flush plus the actual script
    assert_eq!(handle.executed().len(), 2);
}

#[test]
fn test_unbuffered_writes_are_delivered_immediately() {
    let (mut host, _handle) = quiet_host();
    host.initialize(true);

    let recorder = Arc::new(Recorder::default());
    host.listeners().register(&recorder);

    host.bridge().write_stdout("tick");
    host.bridge().write_stderr("tock");

    assert_eq!(
        recorder.events(),
        vec![
            HostEvent::Output("tick".to_string()),
            HostEvent::Error("tock".to_string()),
        ]
    );
}

#[test]
fn test_captured_stdin_is_filled_by_listener() {
    struct Answering;
    impl luban::interpreter::HostObserver for Answering {
        fn on_event(&self, event: &mut HostEvent) {
            if let HostEvent::ReadInput(text) = event {
                text.push_str("42");
            }
        }
    }

    let (mut host, _handle) = quiet_host();
    host.initialize(true);

    let answering = Arc::new(Answering);
    host.listeners().register(&answering);

    host.bridge().set_capture_stdin(true);
    assert_eq!(host.bridge().read_stdin(), "42");

    host.bridge().set_capture_stdin(false);
    assert!(!host.bridge().capture_stdin());
}

//! Scriptable in-memory engine.
//!
//! Drives the test suite and doubles as a runtime-shaped null object for
//! hosts that want the lifecycle machinery without a real runtime.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::RuntimeEngine;
use crate::interpreter::streams::StreamBridge;

#[derive(Default)]
struct MockState {
    running: bool,
    started_with_signals: Option<bool>,
    thread_support: bool,
    shutdown_count: usize,
    program_name: Option<Arc<str>>,
    search_paths: Vec<PathBuf>,
    bridge: Option<Arc<StreamBridge>>,
    executed: Vec<String>,
    queued_stdout: VecDeque<String>,
    queued_stderr: VecDeque<String>,
    queued_status: VecDeque<i32>,
    main_calls: Vec<Vec<String>>,
    main_status: i32,
}

/// In-memory [`RuntimeEngine`].
///
/// Every call is recorded. `run_simple_string` drains any queued
/// stdout/stderr text through the installed stream bridge, mimicking a
/// script that prints, then returns the next queued status (default 0).
pub struct MockEngine {
    state: Arc<Mutex<MockState>>,
}

/// Inspection and scripting handle onto a [`MockEngine`], usable after
/// the engine itself has been moved into a host.
#[derive(Clone)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockEngine {
    pub fn new() -> (Self, MockHandle) {
        let state = Arc::new(Mutex::new(MockState::default()));
        let handle = MockHandle {
            state: state.clone(),
        };
        (Self { state }, handle)
    }
}

impl MockHandle {
    /// Queue text the engine will write to stdout during the next
    /// `run_simple_string`.
    pub fn queue_stdout(&self, text: &str) {
        self.state.lock().queued_stdout.push_back(text.to_string());
    }

    /// Queue text the engine will write to stderr during the next
    /// `run_simple_string`.
    pub fn queue_stderr(&self, text: &str) {
        self.state.lock().queued_stderr.push_back(text.to_string());
    }

    /// Queue the status code for the next `run_simple_string`.
    pub fn queue_status(&self, status: i32) {
        self.state.lock().queued_status.push_back(status);
    }

    /// Status `run_main` returns.
    pub fn set_main_status(&self, status: i32) {
        self.state.lock().main_status = status;
    }

    /// Pretend the program name was already customized before the host
    /// took over.
    pub fn preset_program_name(&self, name: &str) {
        self.state.lock().program_name = Some(Arc::from(name));
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().executed.clone()
    }

    /// Live search path, front-to-back.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.state.lock().search_paths.clone()
    }

    pub fn program_name(&self) -> Option<String> {
        self.state.lock().program_name.as_deref().map(str::to_string)
    }

    pub fn main_calls(&self) -> Vec<Vec<String>> {
        self.state.lock().main_calls.clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn started_with_signals(&self) -> Option<bool> {
        self.state.lock().started_with_signals
    }

    pub fn thread_support_initialized(&self) -> bool {
        self.state.lock().thread_support
    }

    pub fn shutdown_count(&self) -> usize {
        self.state.lock().shutdown_count
    }

    pub fn streams_installed(&self) -> bool {
        self.state.lock().bridge.is_some()
    }
}

impl RuntimeEngine for MockEngine {
    fn is_running(&self) -> bool {
        self.state.lock().running
    }

    fn start(&mut self, install_signal_handlers: bool) {
        let mut state = self.state.lock();
        state.running = true;
        state.started_with_signals = Some(install_signal_handlers);
    }

    fn init_thread_support(&mut self) {
        self.state.lock().thread_support = true;
    }

    fn shutdown(&mut self) {
        let mut state = self.state.lock();
        state.running = false;
        state.shutdown_count += 1;
    }

    fn run_simple_string(&mut self, script: &str) -> i32 {
        // Collect under the lock, write through the bridge outside it;
        // bridge writes can re-enter observers.
        let (bridge, stdout, stderr, status) = {
            let mut state = self.state.lock();
            state.executed.push(script.to_string());
            (
                state.bridge.clone(),
                state.queued_stdout.drain(..).collect::<Vec<_>>(),
                state.queued_stderr.drain(..).collect::<Vec<_>>(),
                state.queued_status.pop_front().unwrap_or(0),
            )
        };
        if let Some(bridge) = bridge {
            for text in &stdout {
                bridge.write_stdout(text);
            }
            for text in &stderr {
                bridge.write_stderr(text);
            }
        }
        status
    }

    fn set_program_name(&mut self, name: Arc<str>) {
        self.state.lock().program_name = Some(name);
    }

    fn program_name(&self) -> Option<Arc<str>> {
        self.state.lock().program_name.clone()
    }

    fn prepend_search_path(&mut self, dir: &Path) {
        self.state.lock().search_paths.insert(0, dir.to_path_buf());
    }

    fn install_streams(&mut self, bridge: Arc<StreamBridge>) {
        self.state.lock().bridge = Some(bridge);
    }

    fn run_main(&mut self, args: &[String]) -> i32 {
        let mut state = self.state.lock();
        state.main_calls.push(args.to_vec());
        state.main_status
    }
}

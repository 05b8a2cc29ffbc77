//! Stream capture bridge presented to engines as stdout/stderr/stdin.
//!
//! Outside a buffered window, writes go straight to the host's display
//! sink and out as events. During a buffered window (one
//! `run_simple_string` call) writes accumulate and are flushed afterwards
//! as a single block per stream.

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::listeners::{HostEvent, ListenerRegistry};

/// Host output mechanism for text the runtime produces.
pub trait DisplaySink: Send + Sync {
    fn display_text(&self, text: &str);

    fn display_error(&self, text: &str);
}

/// Default sink: the process's own standard streams.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn display_text(&self, text: &str) {
        print!("{text}");
    }

    fn display_error(&self, text: &str) {
        eprint!("{text}");
    }
}

/// Redirection target installed as the engine's standard streams.
pub struct StreamBridge {
    buffering: AtomicBool,
    capture_stdin: AtomicBool,
    stdout: Mutex<String>,
    stderr: Mutex<String>,
    listeners: Arc<ListenerRegistry>,
    display: Mutex<Arc<dyn DisplaySink>>,
}

impl StreamBridge {
    pub fn new(listeners: Arc<ListenerRegistry>, display: Arc<dyn DisplaySink>) -> Self {
        Self {
            buffering: AtomicBool::new(false),
            capture_stdin: AtomicBool::new(false),
            stdout: Mutex::new(String::new()),
            stderr: Mutex::new(String::new()),
            listeners,
            display: Mutex::new(display),
        }
    }

    /// Enter or leave buffered-capture mode.
    pub(crate) fn set_buffering(&self, on: bool) {
        self.buffering.store(on, Ordering::SeqCst);
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering.load(Ordering::SeqCst)
    }

    /// Route stdin reads through `ReadInput` events instead of the console.
    pub fn set_capture_stdin(&self, on: bool) {
        self.capture_stdin.store(on, Ordering::SeqCst);
    }

    pub fn capture_stdin(&self) -> bool {
        self.capture_stdin.load(Ordering::SeqCst)
    }

    pub(crate) fn set_display(&self, display: Arc<dyn DisplaySink>) {
        *self.display.lock() = display;
    }

    pub(crate) fn display(&self) -> Arc<dyn DisplaySink> {
        self.display.lock().clone()
    }

    /// Stdout write hook handed to the engine.
    pub fn write_stdout(&self, text: &str) {
        if self.is_buffering() {
            self.stdout.lock().push_str(text);
        } else {
            self.display().display_text(text);
            self.listeners.notify(&mut HostEvent::Output(text.to_string()));
        }
    }

    /// Stderr write hook handed to the engine.
    pub fn write_stderr(&self, text: &str) {
        if self.is_buffering() {
            self.stderr.lock().push_str(text);
        } else {
            self.display().display_error(text);
            self.listeners.notify(&mut HostEvent::Error(text.to_string()));
        }
    }

    /// Engines flush eagerly; buffers drain only through `take_buffers`.
    pub fn flush_stdout(&self) {}

    pub fn flush_stderr(&self) {}

    /// Stdin read hook handed to the engine: one token.
    ///
    /// With capture off, reads one whitespace-delimited token from the
    /// real console. With capture on, fires a `ReadInput` event whose
    /// payload an observer fills synchronously; if nothing fills it the
    /// returned string is empty. There is no timeout.
    pub fn read_stdin(&self) -> String {
        if !self.capture_stdin() {
            return read_token(io::stdin().lock());
        }
        let mut event = HostEvent::ReadInput(String::new());
        self.listeners.notify(&mut event);
        match event {
            HostEvent::ReadInput(text) => text,
            _ => String::new(),
        }
    }

    /// Drain and clear both buffers: `(stdout, stderr)`.
    pub(crate) fn take_buffers(&self) -> (String, String) {
        (
            std::mem::take(&mut *self.stdout.lock()),
            std::mem::take(&mut *self.stderr.lock()),
        )
    }

    /// Current buffer contents without draining: `(stdout, stderr)`.
    pub fn buffer_snapshot(&self) -> (String, String) {
        (self.stdout.lock().clone(), self.stderr.lock().clone())
    }
}

/// `cin >> token` equivalent: skip leading whitespace, read until the next.
///
/// Delimits on ASCII whitespace only and decodes once at the end, so
/// multibyte sequences pass through intact.
fn read_token(reader: impl Read) -> String {
    let mut token = Vec::new();
    for byte in reader.bytes() {
        let Ok(byte) = byte else { break };
        if byte.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(byte);
    }
    String::from_utf8_lossy(&token).into_owned()
}

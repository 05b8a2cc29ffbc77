//! Embedded runtime lifecycle management.
//!
//! [`ScriptHost`] owns the one-time/idempotent initialize/finalize state
//! machine, the search-path registry, the stream capture bridge, and the
//! listener fan-out. It drives the runtime exclusively through the
//! [`RuntimeEngine`] seam.

pub mod listeners;
pub mod pool;
mod prefix;
pub mod streams;

pub use listeners::{HostEvent, HostObserver, ListenerId, ListenerRegistry};
pub use pool::StringPool;
pub use streams::{ConsoleDisplay, DisplaySink, StreamBridge};

use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::config::HostConfig;
use crate::engine::RuntimeEngine;
use crate::error::HostError;
use crate::platform::{restore_default_sigint, LibraryLocator, SystemLocator};

/// Lifecycle manager for one embedded scripting runtime.
///
/// # Lifetime contract
///
/// Embedded runtimes carry process-wide state, so exactly one `ScriptHost`
/// is meant to exist per process: create it at startup, keep it alive
/// until exit. [`initialize`](Self::initialize) is idempotent and safe to
/// call redundantly from unrelated subsystems; the first successful call
/// performs the one-time setup. After [`finalize`](Self::finalize) the
/// runtime cannot be re-initialized within the same process - a second
/// `initialize` is a documented limitation of the underlying runtimes,
/// not a restart.
///
/// # Threading
///
/// Calls are expected to be sequenced by the host; concurrent
/// `initialize`/`finalize` from multiple threads is not a supported mode.
/// Engine-object mutation is serialized inside the engine itself.
pub struct ScriptHost {
    engine: Box<dyn RuntimeEngine>,
    locator: Box<dyn LibraryLocator>,
    config: HostConfig,
    pool: StringPool,
    /// Ordered log of registrations, replayed against the engine at
    /// first-time initialization.
    search_paths: Vec<PathBuf>,
    listeners: Arc<ListenerRegistry>,
    bridge: Arc<StreamBridge>,
    initialized_once: bool,
    verbosity: u8,
    stack_trace_on_error: bool,
}

impl ScriptHost {
    /// Create a host around `engine` with default configuration, the
    /// platform locator, and console display.
    pub fn new(engine: Box<dyn RuntimeEngine>) -> Self {
        Self::with_config(engine, HostConfig::default())
    }

    pub fn with_config(engine: Box<dyn RuntimeEngine>, config: HostConfig) -> Self {
        let listeners = Arc::new(ListenerRegistry::new());
        let display: Arc<dyn DisplaySink> = Arc::new(ConsoleDisplay);
        let bridge = Arc::new(StreamBridge::new(listeners.clone(), display));
        Self {
            engine,
            locator: Box::new(SystemLocator),
            config,
            pool: StringPool::new(),
            search_paths: Vec::new(),
            listeners,
            bridge,
            initialized_once: false,
            verbosity: 0,
            stack_trace_on_error: false,
        }
    }

    /// Replace the dynamic-loader introspection seam.
    pub fn set_locator(&mut self, locator: Box<dyn LibraryLocator>) {
        self.locator = locator;
    }

    /// Replace the display sink used for non-buffered output and flushed
    /// buffers.
    pub fn set_display(&mut self, display: Arc<dyn DisplaySink>) {
        self.bridge.set_display(display);
    }

    /// The listener registry shared with the stream bridge.
    pub fn listeners(&self) -> &Arc<ListenerRegistry> {
        &self.listeners
    }

    /// The stream bridge engines see as their standard streams.
    pub fn bridge(&self) -> &Arc<StreamBridge> {
        &self.bridge
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Record the driver's verbosity level (0, 1, or 2).
    pub fn set_verbosity(&mut self, level: u8) {
        self.verbosity = level.min(2);
    }

    pub fn stack_trace_on_error(&self) -> bool {
        self.stack_trace_on_error
    }

    pub fn set_stack_trace_on_error(&mut self, on: bool) {
        self.stack_trace_on_error = on;
    }

    /// Whether the runtime is currently initialized.
    pub fn is_initialized(&self) -> bool {
        self.engine.is_running()
    }

    /// Start the runtime if needed and run first-time setup at most once
    /// per process.
    ///
    /// Returns `true` only for the call that performed the first-time
    /// setup; every other call is a no-op returning `false`.
    pub fn initialize(&mut self, install_signal_handlers: bool) -> bool {
        if !self.engine.is_running() {
            // Guide the engine toward its standard library, if possible.
            self.setup_prefix();
            self.engine.start(install_signal_handlers);
            // Engines commonly hijack SIGINT during startup; give it back
            // to the host immediately.
            restore_default_sigint();
        }

        if self.initialized_once {
            return false;
        }
        self.initialized_once = true;

        self.engine.init_thread_support();

        // Some engines emit a stray newline on their very first script
        // execution; flush it before the capture bridge is installed.
        self.engine.run_simple_string("");

        self.engine.install_streams(self.bridge.clone());

        // Paths discovered below are applied to the live engine as they
        // are registered, so only the entries that predate discovery
        // still need replaying.
        let preregistered = self.search_paths.len();
        self.setup_host_module_paths();

        // Replay back-to-front: each entry lands at the front, so the
        // engine's final front-to-back search order equals registration
        // order.
        for dir in self.search_paths[..preregistered].iter().rev() {
            debug!("adding module search path {}", dir.display());
            self.engine.prepend_search_path(dir);
        }

        self.listeners.notify(&mut HostEvent::Enter);
        true
    }

    /// Fire `Exit` and shut the runtime down. No-op when not running.
    ///
    /// The once-per-process flag is deliberately not reset; see the type
    /// docs.
    pub fn finalize(&mut self) {
        if self.engine.is_running() {
            self.listeners.notify(&mut HostEvent::Exit);
            self.engine.shutdown();
        }
    }

    /// Execute `script` with output captured and flushed as one block per
    /// stream.
    ///
    /// Ensures initialization first. DOS carriage returns are stripped
    /// because embedded parsers cannot handle them. After execution, each
    /// non-empty buffer is displayed and delivered as exactly one
    /// `Error`/`Output` event, then cleared. Returns the engine's raw
    /// status code (0 = success by convention).
    pub fn run_simple_string(&mut self, script: &str) -> i32 {
        self.initialize(true);
        self.bridge.set_buffering(true);

        let cleaned: String = script.chars().filter(|&ch| ch != '\r').collect();
        let status = self.engine.run_simple_string(&cleaned);

        self.bridge.set_buffering(false);
        let (stdout, stderr) = self.bridge.take_buffers();
        if !stderr.is_empty() {
            self.bridge.display().display_error(&stderr);
            self.listeners.notify(&mut HostEvent::Error(stderr));
        }
        if !stdout.is_empty() {
            self.bridge.display().display_text(&stdout);
            self.listeners.notify(&mut HostEvent::Output(stdout));
        }
        status
    }

    /// Record the program name the engine should report.
    ///
    /// Call before [`initialize`](Self::initialize), if at all. The name
    /// is interned in the string pool because engines may retain the
    /// buffer for the rest of the process. A name that cannot be decoded
    /// is replaced by an empty one after a fatal log line.
    pub fn set_program_name(&mut self, name: &OsStr) {
        let text = match name.to_str() {
            Some(text) => text,
            None => {
                eprintln!("fatal host error: {}", HostError::UndecodableProgramName);
                ""
            }
        };
        let pooled = self.pool.intern(text);
        self.engine.set_program_name(pooled);
    }

    /// Register `dir` as a module search path.
    ///
    /// Separators are normalized for the platform. The registration is
    /// remembered for replay at first-time initialization; when the
    /// engine is already running the path is also applied immediately,
    /// landing at the front of the live search path (most recently added
    /// is searched first).
    pub fn prepend_search_path(&mut self, dir: &str) {
        let dir = PathBuf::from(normalize_separators(dir));
        self.search_paths.push(dir.clone());

        if self.engine.is_running() {
            debug!("adding module search path {}", dir.display());
            self.engine.prepend_search_path(&dir);
        }
    }

    /// Every registered search path, in registration order. The registry
    /// grows monotonically for the life of the process.
    pub fn registered_search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Forward `args` to the engine's own argv processing.
    pub fn run_main(&mut self, args: &[String]) -> i32 {
        self.engine.run_main(args)
    }
}

fn normalize_separators(dir: &str) -> String {
    if cfg!(windows) {
        dir.replace('/', "\\")
    } else {
        dir.to_string()
    }
}

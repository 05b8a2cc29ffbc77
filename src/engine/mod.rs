//! Runtime engine seam.
//!
//! The lifecycle manager drives the embedded runtime only through
//! [`RuntimeEngine`], so nothing above this module knows which engine is
//! plugged in: a real in-process runtime, an external interpreter process
//! ([`ProcessEngine`]), or the in-memory [`MockEngine`].

mod mock;
mod process;

pub use mock::{MockEngine, MockHandle};
pub use process::ProcessEngine;

use std::path::Path;
use std::sync::Arc;

use crate::interpreter::streams::StreamBridge;

/// Surface of an embedded scripting runtime, mirroring the embedding APIs
/// such runtimes expose.
///
/// # Contract
///
/// - Engines carry process-wide state. `start` after `shutdown` is
///   implementation-defined; the lifecycle layer documents it as
///   unsupported and never relies on it.
/// - Engines that have a global execution lock take it themselves inside
///   every method that touches runtime-owned objects (search path, stream
///   objects); callers never hold it.
/// - Buffers received through [`set_program_name`](Self::set_program_name)
///   are pool-owned and stay valid for the rest of the process; engines
///   may retain them indefinitely.
pub trait RuntimeEngine: Send {
    /// Whether the runtime is currently initialized.
    fn is_running(&self) -> bool;

    /// Start the runtime, optionally letting it install its own signal
    /// handlers.
    fn start(&mut self, install_signal_handlers: bool);

    /// Prepare whatever thread-state subsystem the runtime needs for
    /// multi-threaded hosts. Called once, right after the first start.
    fn init_thread_support(&mut self) {}

    /// Tear the runtime down.
    fn shutdown(&mut self);

    /// Execute a chunk of script text and return the raw status code
    /// (0 means success by convention).
    fn run_simple_string(&mut self, script: &str) -> i32;

    /// Set the program name the runtime uses as its filesystem anchor.
    fn set_program_name(&mut self, name: Arc<str>);

    /// Current program name, if one has been set.
    fn program_name(&self) -> Option<Arc<str>>;

    /// Insert a directory at the front of the runtime's live module
    /// search path.
    fn prepend_search_path(&mut self, dir: &Path);

    /// Install the host's stream bridge as the runtime's
    /// stdout/stderr/stdin.
    fn install_streams(&mut self, bridge: Arc<StreamBridge>);

    /// Hand the full argument vector to the runtime's own argv processing
    /// and return its exit status.
    fn run_main(&mut self, args: &[String]) -> i32;
}

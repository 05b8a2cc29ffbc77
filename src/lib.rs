//! LuBan Embedded Scripting Runtime Host
//!
//! Bootstraps and manages a single embedded scripting runtime inside a host
//! process: one-time initialization with idempotent re-entry guarding,
//! module-search-path discovery and registration, redirection of the
//! runtime's standard streams into host-visible buffers, lifecycle
//! notifications, and teardown.
//!
//! The runtime's own execution semantics are never reimplemented here; they
//! are reached through the [`engine::RuntimeEngine`] seam, so the same
//! lifecycle logic drives a real in-process runtime, an external
//! interpreter process, or the in-memory engine used by the test suite.
//!
//! # Example
//!
//! ```
//! use luban::engine::MockEngine;
//! use luban::ScriptHost;
//!
//! let (engine, _handle) = MockEngine::new();
//! let mut host = ScriptHost::new(Box::new(engine));
//!
//! assert!(host.initialize(true));
//! assert!(!host.initialize(true)); // first-time setup runs exactly once
//!
//! let status = host.run_simple_string("print('hello')\n");
//! assert_eq!(status, 0);
//! ```

#![doc(html_root_url = "https://docs.rs/luban")]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod platform;
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use config::HostConfig;
pub use error::HostError;
pub use interpreter::ScriptHost;

use std::fs;
use std::path::Path;

/// Host version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host name
pub const NAME: &str = "LuBan (鲁班)";

/// Execute a script file through `host`.
///
/// Returns the engine's raw status code; reading the file is the only
/// operation that can fail here.
pub fn run_file(host: &mut ScriptHost, path: &Path) -> Result<i32> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(host.run_simple_string(&source))
}

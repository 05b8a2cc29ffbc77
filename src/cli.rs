//! Command-line entry point.
//!
//! A thin driver: a few reserved flags are recognized here, everything
//! else is forwarded verbatim to the engine's own argument processing.
//!
//! Reserved flags:
//! - `-v` verbosity 1 (unless already higher), `-vv` verbosity 2;
//!   both are recorded first and still forwarded
//! - `--enable-bt` enables stack traces on error; consumed
//! - `-V` prints the host's version, then forwards so the engine prints
//!   its own and exits

use std::ffi::OsString;

use tracing::debug;

use crate::error::HostError;
use crate::interpreter::ScriptHost;
use crate::{NAME, VERSION};

/// Run the driver over `args` (program name excluded).
///
/// Verbosity flags are recorded in host state before anything else runs;
/// initialization happens with signal-handler installation enabled. A
/// single argument that cannot be decoded to the engine's text encoding
/// is fatal: the failure names the argument's 1-based position, the
/// driver returns 1, and nothing is forwarded. Otherwise the return
/// value is whatever the engine's argument processing returns.
pub fn script_main(host: &mut ScriptHost, args: &[OsString]) -> i32 {
    let mut verbosity = host.verbosity();
    for arg in args {
        match arg.to_str() {
            Some("-v") if verbosity < 1 => verbosity = 1,
            Some("-vv") => verbosity = 2,
            _ => {}
        }
    }
    host.set_verbosity(verbosity);

    host.initialize(true);

    let mut forwarded = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        let text = arg.to_str();
        if text == Some("--enable-bt") {
            debug!("stack trace on error enabled");
            host.set_stack_trace_on_error(true);
            continue;
        }
        if text == Some("-V") {
            // The engine prints its own version and exits once it sees
            // the flag; print ours first and let it through.
            println!("{NAME} {VERSION}");
        }
        match text {
            Some(text) => forwarded.push(text.to_string()),
            None => {
                let err = HostError::UndecodableArgument {
                    position: index + 1,
                };
                eprintln!("fatal host error: {err}");
                return 1;
            }
        }
    }

    host.run_main(&forwarded)
}

/// Map an engine status to a process exit code.
///
/// Statuses outside 0..=255 (engines report hard failures as negative
/// values) become 1 so a failure never collapses into a success exit.
pub fn exit_code_for_status(status: i32) -> u8 {
    u8::try_from(status).unwrap_or(1)
}

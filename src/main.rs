//! LuBan command-line driver.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use luban::cli::{exit_code_for_status, script_main};
use luban::engine::ProcessEngine;
use luban::util::logger;
use luban::{HostConfig, ScriptHost};

/// Interpreter executable used when `LUBAN_INTERPRETER` does not name one.
const DEFAULT_INTERPRETER: &str = "python3";

fn main() -> ExitCode {
    let args: Vec<OsString> = env::args_os().skip(1).collect();

    // Verbosity has to be known before the subscriber is installed, so
    // the flags are scanned here as well as in the driver.
    let mut verbosity = 0u8;
    for arg in &args {
        match arg.to_str() {
            Some("-v") if verbosity < 1 => verbosity = 1,
            Some("-vv") => verbosity = 2,
            _ => {}
        }
    }
    logger::init_with_level(logger::level_for_verbosity(verbosity));

    let config = HostConfig::default();
    let interpreter = env::var_os("LUBAN_INTERPRETER")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INTERPRETER));
    let engine = ProcessEngine::new(interpreter, config.path_list_env_var.clone());
    let mut host = ScriptHost::with_config(Box::new(engine), config);

    let status = script_main(&mut host, &args);
    ExitCode::from(exit_code_for_status(status))
}

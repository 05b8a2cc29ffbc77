//! Engine backed by an external interpreter process.
//!
//! Hosts without an in-process runtime linked in still need something to
//! execute scripts, so this engine shells out to an interpreter
//! executable: `-c <script>` for simple strings, the raw argument vector
//! for main processing. Captured output is routed through the installed
//! stream bridge, so buffering and events behave exactly as with an
//! in-process engine. Registered search paths are exported through a
//! path-list environment variable the interpreter is expected to honor.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::{debug, error};

use super::RuntimeEngine;
use crate::interpreter::streams::StreamBridge;

pub struct ProcessEngine {
    interpreter: PathBuf,
    path_env_var: String,
    running: bool,
    program_name: Option<Arc<str>>,
    search_paths: Vec<PathBuf>,
    bridge: Option<Arc<StreamBridge>>,
}

impl ProcessEngine {
    /// `interpreter` is the executable to spawn; `path_env_var` names the
    /// environment variable carrying the module search path.
    pub fn new(interpreter: impl Into<PathBuf>, path_env_var: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            path_env_var: path_env_var.into(),
            running: false,
            program_name: None,
            search_paths: Vec::new(),
            bridge: None,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        if !self.search_paths.is_empty() {
            let sep = if cfg!(windows) { ";" } else { ":" };
            let joined = self
                .search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(sep);
            cmd.env(&self.path_env_var, joined);
        }
        cmd
    }
}

impl RuntimeEngine for ProcessEngine {
    fn is_running(&self) -> bool {
        self.running
    }

    fn start(&mut self, _install_signal_handlers: bool) {
        debug!("using external interpreter {}", self.interpreter.display());
        self.running = true;
    }

    fn shutdown(&mut self) {
        self.running = false;
    }

    fn run_simple_string(&mut self, script: &str) -> i32 {
        let output = match self.command().arg("-c").arg(script).output() {
            Ok(output) => output,
            Err(err) => {
                error!(
                    "failed to launch {}: {err}",
                    self.interpreter.display()
                );
                return 1;
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        match &self.bridge {
            Some(bridge) => {
                if !stdout.is_empty() {
                    bridge.write_stdout(&stdout);
                }
                if !stderr.is_empty() {
                    bridge.write_stderr(&stderr);
                }
            }
            None => {
                // No bridge installed yet; fall through to our own streams.
                print!("{stdout}");
                eprint!("{stderr}");
            }
        }
        output.status.code().unwrap_or(1)
    }

    fn set_program_name(&mut self, name: Arc<str>) {
        self.program_name = Some(name);
    }

    fn program_name(&self) -> Option<Arc<str>> {
        self.program_name.clone()
    }

    fn prepend_search_path(&mut self, dir: &Path) {
        self.search_paths.insert(0, dir.to_path_buf());
    }

    fn install_streams(&mut self, bridge: Arc<StreamBridge>) {
        self.bridge = Some(bridge);
    }

    fn run_main(&mut self, args: &[String]) -> i32 {
        // Inherit stdio so interactive sessions work.
        match self.command().args(args).status() {
            Ok(status) => status.code().unwrap_or(1),
            Err(err) => {
                error!(
                    "failed to launch {}: {err}",
                    self.interpreter.display()
                );
                1
            }
        }
    }
}

//! Runtime prefix and host module-path discovery.
//!
//! Nothing here is ever fatal: every miss is logged at debug/trace level
//! and execution proceeds on the assumption that an external override
//! (the home environment variable, a preconfigured search path) will
//! compensate.

use std::env;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use tracing::{debug, trace};

use super::ScriptHost;

impl ScriptHost {
    /// Guide the engine toward its standard library before startup.
    ///
    /// Honors an existing home override without inspecting it, detects
    /// statically linked engines, and otherwise anchors the engine with a
    /// synthetic program name placed next to the engine's dynamic
    /// library, from which the standard library is findable by relative
    /// layout convention.
    pub(crate) fn setup_prefix(&mut self) {
        if env::var_os(&self.config.home_env_var).is_some() {
            debug!(
                "`{}` already set. Leaving unchanged.",
                self.config.home_env_var
            );
            return;
        }

        let library = match self
            .locator
            .library_for_symbol(&self.config.program_name_symbol)
        {
            Some(library) => library,
            None => {
                debug!(
                    "static runtime build or `{}` library couldn't be found. \
                     Set `{}` if the standard library fails to load.",
                    self.config.program_name_symbol, self.config.home_env_var
                );
                return;
            }
        };

        if let Some(current) = self.engine.program_name() {
            if *current != *self.config.default_program_name {
                debug!("program name has been changed. Leaving unchanged.");
                return;
            }
        }

        let library_dir = library
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .display()
            .to_string();
        let synthetic = format!(
            "{}{}{}",
            library_dir, MAIN_SEPARATOR_STR, self.config.host_name
        );
        debug!("setting program name to {synthetic} to aid in prefix setup");
        let pooled = self.pool.intern(&synthetic);
        self.engine.set_program_name(pooled);
    }

    /// Find the directory holding the host's own installed script modules
    /// and register it as a search path.
    ///
    /// The starting prefix is the host library's directory when the host
    /// is a shared library, or the configured program name's path for
    /// static builds. From there, walk ancestors toward the filesystem
    /// root; the first level whose site-packages subdirectory contains
    /// the landmark file wins. No match means the host's modules must be
    /// locatable by other means.
    pub(crate) fn setup_host_module_paths(&mut self) {
        let start = match self.locator.library_for_symbol(&self.config.host_symbol) {
            Some(library) => {
                debug!("shared host build detected");
                library.parent().map(Path::to_path_buf)
            }
            None => {
                debug!(
                    "`{}` library couldn't be found. Using the program name \
                     to locate host modules.",
                    self.config.host_symbol
                );
                self.engine
                    .program_name()
                    .map(|name| collapse_full_path(Path::new(&*name)))
            }
        };

        let Some(start) = start else {
            debug!("no prefix candidate; host modules must already be on the search path");
            return;
        };

        let suffix = self.config.site_packages_suffix.clone();
        let landmark = self.config.landmark.clone();
        for dir in start.ancestors() {
            let candidate = dir.join(&suffix);
            let marker = candidate.join(&landmark);
            if marker.is_file() {
                trace!("trying landmark file {} -- success!", marker.display());
                self.safe_prepend_search_path(&candidate);
                return;
            }
            trace!("trying landmark file {} -- failed!", marker.display());
        }
    }

    /// Register `dir` only if it exists as a directory.
    fn safe_prepend_search_path(&mut self, dir: &Path) {
        trace!("trying {}", dir.display());
        if dir.is_dir() {
            if let Some(text) = dir.to_str() {
                self.prepend_search_path(text);
            }
        }
    }
}

/// Make `path` absolute against the current directory, without touching
/// the filesystem.
fn collapse_full_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

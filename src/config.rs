//! Host constants, consumed as opaque strings.
//!
//! The site-packages suffix and the landmark file describe the install
//! layout of the host's own script modules; they come from the surrounding
//! build and are only carried here, never interpreted.

use std::path::MAIN_SEPARATOR_STR;

/// Build- and install-layout constants for one embedded runtime.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Environment variable overriding the runtime's home directory. When
    /// set, prefix auto-detection is skipped entirely; the value is passed
    /// through, never inspected.
    pub home_env_var: String,
    /// Exported symbol resolved to locate the runtime's dynamic library.
    pub program_name_symbol: String,
    /// Exported symbol resolved to locate the host's own dynamic library.
    pub host_symbol: String,
    /// Program name the engine reports before anyone customizes it.
    pub default_program_name: String,
    /// Name joined to the runtime library's directory to form the
    /// synthetic program name.
    pub host_name: String,
    /// Site-packages-like subdirectory checked under each candidate
    /// prefix, relative.
    pub site_packages_suffix: String,
    /// Marker file proving the host's modules are installed, relative to
    /// the site-packages directory.
    pub landmark: String,
    /// Environment variable through which the process engine exports
    /// registered search paths.
    pub path_list_env_var: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            home_env_var: "LUBAN_RUNTIME_HOME".into(),
            program_name_symbol: "luban_rt_set_program_name".into(),
            host_symbol: "luban_host_version".into(),
            default_program_name: "script".into(),
            host_name: "luban".into(),
            site_packages_suffix: join(&["lib", "site-packages"]),
            landmark: join(&["luban", "__init__.py"]),
            path_list_env_var: "LUBAN_MODULE_PATH".into(),
        }
    }
}

fn join(parts: &[&str]) -> String {
    parts.join(MAIN_SEPARATOR_STR)
}

//! Platform seams: dynamic-loader introspection and signal restoration.

use std::path::PathBuf;

/// Resolves the on-disk library that exports a given symbol.
///
/// One implementation per target platform; the lifecycle logic depends
/// only on this interface. Tests substitute fixed-path locators.
pub trait LibraryLocator: Send {
    /// File path of the loaded module exporting `symbol`, or `None` when
    /// no such module exists (a statically linked runtime, typically).
    fn library_for_symbol(&self, symbol: &str) -> Option<PathBuf>;
}

/// Locator backed by the platform dynamic loader.
#[derive(Debug, Default)]
pub struct SystemLocator;

#[cfg(unix)]
impl LibraryLocator for SystemLocator {
    fn library_for_symbol(&self, symbol: &str) -> Option<PathBuf> {
        use std::ffi::{CStr, CString};
        use std::os::unix::ffi::OsStringExt;

        let symbol = CString::new(symbol).ok()?;
        // SAFETY: dlsym/dladdr with a valid NUL-terminated name;
        // dli_fname points at loader-owned storage that stays valid for
        // the life of the mapping, and is copied out before returning.
        unsafe {
            let address = libc::dlsym(libc::RTLD_DEFAULT, symbol.as_ptr());
            if address.is_null() {
                return None;
            }
            let mut info: libc::Dl_info = std::mem::zeroed();
            if libc::dladdr(address, &mut info) == 0
                || info.dli_saddr.is_null()
                || info.dli_fname.is_null()
            {
                return None;
            }
            let bytes = CStr::from_ptr(info.dli_fname).to_bytes().to_vec();
            Some(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
        }
    }
}

#[cfg(windows)]
impl LibraryLocator for SystemLocator {
    // No portable symbol-to-module lookup through the loader here; the
    // running executable's own path is a workable prefix anchor.
    fn library_for_symbol(&self, _symbol: &str) -> Option<PathBuf> {
        std::env::current_exe().ok()
    }
}

/// Put SIGINT back to default host behavior.
///
/// Embedded runtimes commonly install their own handler during startup;
/// the lifecycle manager calls this right after.
pub fn restore_default_sigint() {
    #[cfg(unix)]
    // SAFETY: installing SIG_DFL for SIGINT is always valid.
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
}

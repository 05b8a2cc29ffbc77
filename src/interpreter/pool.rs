//! Stable storage for strings handed across the engine seam.

use std::sync::Arc;

/// Append-only pool of shared string buffers.
///
/// Embedded runtimes may retain a program name for the rest of the
/// process, so every buffer handed to an engine is interned here first.
/// The pool never frees an entry before it is dropped itself, which for
/// the documented one-host-per-process lifetime means process exit.
#[derive(Debug, Default)]
pub struct StringPool {
    strings: Vec<Arc<str>>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `text` into the pool and return a handle to the pooled buffer.
    pub fn intern(&mut self, text: &str) -> Arc<str> {
        let entry: Arc<str> = Arc::from(text);
        self.strings.push(entry.clone());
        entry
    }

    /// Number of pooled buffers.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

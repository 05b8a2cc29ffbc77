//! Lifecycle and I/O notification fan-out.
//!
//! Interested host objects register as observers and receive named events
//! with optional payloads. Membership is purely observational: the
//! registry holds weak references, so an observer dropped while registered
//! is simply skipped at notification time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::Mutex;

/// Stable handle returned by observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Events delivered to host observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// First-time initialization completed.
    Enter,
    /// The runtime is about to shut down.
    Exit,
    /// Stdout text, either one immediate write or a whole buffered window.
    Output(String),
    /// Stderr text, either one immediate write or a whole buffered window.
    Error(String),
    /// Captured stdin request. The payload is mutable: an observer fills
    /// it synchronously and the stream bridge hands it back as input.
    ReadInput(String),
}

/// Host-side observer of runtime lifecycle and I/O events.
pub trait HostObserver: Send + Sync {
    /// Handle one event. `ReadInput` expects the payload to be filled
    /// before returning.
    fn on_event(&self, event: &mut HostEvent);
}

/// Registry of weakly held observers.
///
/// Registration order is preserved. Duplicate registration of the same
/// observer is tolerated (it will be notified once per handle).
/// Deregistration is explicit and idempotent; unknown handles are ignored.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    entries: Mutex<IndexMap<ListenerId, Weak<dyn HostObserver>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer and return its handle.
    pub fn register<T>(&self, observer: &Arc<T>) -> ListenerId
    where
        T: HostObserver + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let weak = Arc::downgrade(observer);
        let weak: Weak<dyn HostObserver> = weak;
        self.entries.lock().insert(id, weak);
        id
    }

    /// Remove an observer by handle. Unknown handles are ignored.
    pub fn unregister(&self, id: ListenerId) {
        self.entries.lock().shift_remove(&id);
    }

    /// Deliver `event` to every observer still alive, in registration
    /// order.
    ///
    /// Dead entries are pruned as they are found. Observers run outside
    /// the registry lock, so they may register or unregister re-entrantly.
    pub fn notify(&self, event: &mut HostEvent) {
        let live: Vec<Arc<dyn HostObserver>> = {
            let mut entries = self.entries.lock();
            entries.retain(|_, weak| weak.strong_count() > 0);
            entries.values().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.on_event(event);
        }
    }

    /// Number of registered entries (dead entries count until the next
    /// notification prunes them).
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

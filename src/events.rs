//! Change notifications
//!
//! A minimal observer registry. Subscribing returns a [`Subscription`]
//! handle; dropping the handle unregisters the listener. Listeners may be
//! invoked from any thread (the settings file watcher runs on its own), so
//! they are `Send + Sync` and should do nothing heavier than raising a flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

trait Unregister: Send + Sync {
    fn unregister(&self, id: u64);
}

impl<E: 'static> Unregister for Mutex<Registry<E>> {
    fn unregister(&self, id: u64) {
        if let Ok(mut registry) = self.lock() {
            registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        }
    }
}

/// Broadcasts events of type `E` to every live subscription
pub struct Notifier<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E: 'static> Notifier<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener; it stays registered until the handle is dropped
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Arc::new(listener)));
            id
        };
        let registry: Arc<dyn Unregister> = self.registry.clone();
        Subscription {
            id,
            registry: Arc::downgrade(&registry),
        }
    }

    /// Deliver `event` to all current listeners
    pub fn notify(&self, event: &E) {
        // Listeners run outside the lock so they may subscribe or drop handles.
        let listeners: Vec<Listener<E>> = {
            let registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
            registry.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry
            .lock()
            .map(|r| r.listeners.len())
            .unwrap_or_default()
    }
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`Notifier::subscribe`]
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Unregister>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Idempotent dirty flag raised by listeners and consumed by caches
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns whether the flag was raised, clearing it
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Subscribe this flag to a notifier
    pub fn subscribe_to<E: 'static>(&self, notifier: &Notifier<E>) -> Subscription {
        let flag = self.clone();
        notifier.subscribe(move |_| flag.raise())
    }
}

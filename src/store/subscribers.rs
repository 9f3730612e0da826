//! Ordered subscriber registry.

use super::lock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Listener called with `(next, previous)` after every commit.
pub(crate) type Listener<S> = Arc<dyn Fn(&S, &S) + Send + Sync>;

struct Entry<S> {
    id: u64,
    listener: Listener<S>,
}

/// Registration-ordered list of listeners.
///
/// Every registration gets its own id, so subscribing the same closure twice
/// produces two independent entries.
pub(crate) struct Subscribers<S> {
    entries: Mutex<Vec<Entry<S>>>,
    next_id: AtomicU64,
}

impl<S> Subscribers<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Append a listener, returning its registration id.
    pub(crate) fn add(&self, listener: Listener<S>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.entries).push(Entry { id, listener });
        id
    }

    /// Remove the registration with this id. Returns whether one was found.
    pub(crate) fn remove(&self, id: u64) -> bool {
        let mut entries = lock(&self.entries);
        match entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copy of the current listeners, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<Listener<S>> {
        lock(&self.entries)
            .iter()
            .map(|entry| Arc::clone(&entry.listener))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.entries).len()
    }
}

/// Type-erased removal so [`Unsubscribe`] does not carry the state type.
trait Detach: Send + Sync {
    fn detach(&self, id: u64) -> bool;
}

impl<S: 'static> Detach for Subscribers<S> {
    fn detach(&self, id: u64) -> bool {
        self.remove(id)
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Calling [`unsubscribe`](Unsubscribe::unsubscribe) removes exactly the
/// registration that produced this handle. Further calls are no-ops.
/// Dropping the handle leaves the subscription in place. The handle does not
/// keep the store alive.
pub struct Unsubscribe {
    id: u64,
    subscribers: Weak<dyn Detach>,
}

impl Unsubscribe {
    pub(crate) fn new<S: 'static>(id: u64, subscribers: &Arc<Subscribers<S>>) -> Self {
        let subscribers: Arc<dyn Detach> = subscribers.clone();
        Self {
            id,
            subscribers: Arc::downgrade(&subscribers),
        }
    }

    /// Remove this subscription.
    ///
    /// Returns `true` if the subscription was still registered. Returns
    /// `false` if it was already removed or the store is gone.
    pub fn unsubscribe(&self) -> bool {
        let removed = self
            .subscribers
            .upgrade()
            .is_some_and(|subscribers| subscribers.detach(self.id));
        log::trace!("unsubscribe #{} (removed: {})", self.id, removed);
        removed
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}

//! The store: state cell, dispatch, and subscriber notification.
//!
//! A [`Store`] pairs one current state with a closed action table. Actions
//! produce a [`Transition`](crate::core::Transition); the store commits the
//! resulting state and notifies subscribers in registration order.

mod config;
mod dispatch;
mod store;
mod subscribers;

pub use config::{NotifyPolicy, StoreConfig};
pub use dispatch::{Dispatch, Pending};
pub use store::Store;
pub use subscribers::Unsubscribe;

pub(crate) use subscribers::Listener;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering from poisoning.
///
/// Only fully computed values are ever written into the store's cells, so a
/// panic while a lock was held cannot leave a half-updated value behind.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

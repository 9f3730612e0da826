use super::config::{NotifyPolicy, StoreConfig};
use super::dispatch::{Dispatch, Pending};
use super::lock;
use super::subscribers::{Listener, Subscribers, Unsubscribe};
use crate::core::{Action, Transition, Updater};
use crate::error::DispatchError;
use serde_json::Value;
use std::convert::Infallible;
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// An observable state container driven by a closed table of actions.
///
/// The store owns exactly one current state. It changes only through
/// [`dispatch`](Store::dispatch), [`dispatch_named`](Store::dispatch_named)
/// or [`set`](Store::set), and every change is announced to subscribers as
/// `(next, previous)` in registration order.
///
/// `Store` is a cheap handle: clones share the same state and subscribers.
///
/// # Example
///
/// ```rust
/// use tinstore::{actions, Store};
/// use tinstore::core::{Action, Transition};
/// use std::convert::Infallible;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Counter {
///     count: i64,
/// }
///
/// actions! {
///     enum CounterAction {
///         Increment(i64) = "increment",
///     }
/// }
///
/// impl Action<Counter> for CounterAction {
///     type Error = Infallible;
///
///     fn apply(self, state: &Counter) -> Transition<Counter, Infallible> {
///         match self {
///             Self::Increment(amount) => Transition::ready(Counter {
///                 count: state.count + amount,
///             }),
///         }
///     }
/// }
///
/// let store: Store<Counter, CounterAction> = Store::new(Counter { count: 0 });
/// let committed = store.dispatch(CounterAction::Increment(5)).unwrap();
///
/// assert_eq!(committed.committed(), Some(Counter { count: 5 }));
/// assert_eq!(store.get_state(), Counter { count: 5 });
/// ```
pub struct Store<S, A = Infallible> {
    inner: Arc<Inner<S>>,
    _actions: PhantomData<fn(A)>,
}

struct Inner<S> {
    state: Mutex<S>,
    subscribers: Arc<Subscribers<S>>,
    config: StoreConfig,
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + 'static,
    A: Action<S>,
{
    /// Create a store holding `initial`, with the default configuration.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, StoreConfig::default())
    }

    /// Create a store holding `initial`.
    pub fn with_config(initial: S, config: StoreConfig) -> Self {
        log::debug!(
            "[{}] created with actions [{}]",
            config.label,
            A::NAMES.join(", ")
        );
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(initial),
                subscribers: Arc::new(Subscribers::new()),
                config,
            }),
            _actions: PhantomData,
        }
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> S {
        lock(&self.inner.state).clone()
    }

    /// Dispatch an action.
    ///
    /// A synchronous transition is committed and announced before this
    /// returns, and comes back as [`Dispatch::Committed`]. A pending
    /// transition comes back as [`Dispatch::Pending`] and is committed when
    /// that future completes. Pending dispatches are not queued: each commits
    /// when its own future resolves, against whatever state is current then.
    ///
    /// The returned [`Dispatch::Pending`] does nothing until polled. There is
    /// no way to cancel an action once its future is running, but a pending
    /// dispatch that is dropped before completion never commits; spawn it on
    /// an executor to run it without waiting for the result.
    ///
    /// # Errors
    ///
    /// Returns the action's own error when its transition fails
    /// synchronously; nothing is committed and no subscriber runs.
    pub fn dispatch(&self, action: A) -> Result<Dispatch<S, A::Error>, A::Error> {
        let name = action.name();
        let label = &self.inner.config.label;
        log::debug!("[{}] dispatching '{}'", label, name);

        let mut state = lock(&self.inner.state);
        match action.apply(&state) {
            Transition::Ready(Ok(update)) => {
                let (next, previous) = swap(&mut *state, update);
                drop(state);
                self.inner.publish(name, &next, &previous);
                Ok(Dispatch::Committed(next))
            }
            Transition::Ready(Err(error)) => {
                drop(state);
                log::warn!("[{}] action '{}' failed: {}", label, name, error);
                Err(error)
            }
            Transition::Pending(future) => {
                drop(state);
                let inner = Arc::clone(&self.inner);
                Ok(Dispatch::Pending(Pending::new(async move {
                    match future.await {
                        Ok(update) => {
                            log::debug!("[{}] '{}' resolved", inner.config.label, name);
                            Ok(inner.commit(name, update))
                        }
                        Err(error) => {
                            log::warn!(
                                "[{}] action '{}' rejected: {}",
                                inner.config.label,
                                name,
                                error
                            );
                            Err(error)
                        }
                    }
                })))
            }
        }
    }

    /// Dispatch an action identified by name, with a JSON payload.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Lookup`] when `name` is not in the action table or
    /// the payload does not fit the action; the state is left untouched.
    /// [`DispatchError::Action`] when the action fails synchronously.
    pub fn dispatch_named(
        &self,
        name: &str,
        payload: Value,
    ) -> Result<Dispatch<S, A::Error>, DispatchError<A::Error>> {
        let action = A::from_named(name, payload).map_err(|error| {
            log::warn!("[{}] {}", self.inner.config.label, error);
            error
        })?;
        self.dispatch(action).map_err(DispatchError::Action)
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + 'static,
{
    /// Commit an updater directly, bypassing the action table.
    ///
    /// Subscribers are notified exactly as for a dispatched action. Returns
    /// the committed state.
    pub fn set<U>(&self, update: U) -> S
    where
        U: Into<Updater<S>>,
    {
        self.inner.commit("set", update.into())
    }

    /// Run `f` against the current state without cloning it.
    ///
    /// `f` runs while the state cell is held and must not call back into the
    /// store.
    pub fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        f(&*lock(&self.inner.state))
    }

    /// Register a listener called with `(next, previous)` after every commit.
    ///
    /// Listeners run in registration order, outside of any store lock, so a
    /// listener may read the store or dispatch. The subscriber list is
    /// copied before a notification pass starts: a listener removed during
    /// the pass still hears that pass, and a listener added during the pass
    /// first hears the next commit.
    ///
    /// Commits are ordered by the state cell, notification passes are not.
    /// A listener that dispatches sees its own commit announced before the
    /// pass that triggered it finishes, and commits made concurrently from
    /// different threads may reach listeners in a different order than they
    /// were committed. `previous` is always the state the commit replaced.
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn(&S, &S) + Send + Sync + 'static,
    {
        let subscribers = &self.inner.subscribers;
        let id = subscribers.add(Arc::new(listener));
        log::trace!("[{}] subscribe #{}", self.inner.config.label, id);
        Unsubscribe::new(id, subscribers)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// Configuration the store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    pub(crate) fn add_listener(&self, listener: Listener<S>) {
        self.inner.subscribers.add(listener);
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _actions: PhantomData,
        }
    }
}

impl<S: std::fmt::Debug, A> std::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("label", &self.inner.config.label)
            .field("state", &*lock(&self.inner.state))
            .field("subscribers", &self.inner.subscribers.len())
            .finish()
    }
}

/// Replace the state in place, returning `(next, previous)`.
fn swap<S: Clone>(state: &mut S, update: Updater<S>) -> (S, S) {
    let next = update.resolve(state);
    let previous = std::mem::replace(state, next.clone());
    (next, previous)
}

impl<S: Clone> Inner<S> {
    fn commit(&self, origin: &str, update: Updater<S>) -> S {
        let (next, previous) = swap(&mut *lock(&self.state), update);
        self.publish(origin, &next, &previous);
        next
    }

    /// Announce a commit to a snapshot of the current subscribers.
    fn publish(&self, origin: &str, next: &S, previous: &S) {
        let listeners = self.subscribers.snapshot();
        log::trace!(
            "[{}] committed '{}', notifying {} subscribers",
            self.config.label,
            origin,
            listeners.len()
        );

        match self.config.notify {
            NotifyPolicy::Propagate => {
                for listener in &listeners {
                    listener(next, previous);
                }
            }
            NotifyPolicy::Isolate => {
                for (position, listener) in listeners.iter().enumerate() {
                    let outcome = catch_unwind(AssertUnwindSafe(|| listener(next, previous)));
                    if outcome.is_err() {
                        log::error!(
                            "[{}] subscriber {} panicked after '{}'",
                            self.config.label,
                            position,
                            origin
                        );
                    }
                }
            }
        }
    }
}

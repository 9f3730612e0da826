//! Next-state descriptions.
//!
//! An [`Updater`] is either a finished state value or a pure function that
//! derives the next state from whatever state is current when it is applied.

use std::fmt;

/// Boxed state transform used by [`Updater::Apply`].
pub type UpdateFn<S> = Box<dyn FnOnce(&S) -> S + Send>;

/// A value or a pure function of the current state describing the next state.
///
/// Function updaters are resolved against the state current at commit time,
/// not at dispatch time. For a pending action this means the function sees
/// every commit that landed while the action was in flight.
///
/// # Example
///
/// ```rust
/// use tinstore::core::Updater;
///
/// let replace = Updater::value(10);
/// assert_eq!(replace.resolve(&1), 10);
///
/// let add_one = Updater::with(|n: &i32| n + 1);
/// assert_eq!(add_one.resolve(&1), 2);
/// ```
pub enum Updater<S> {
    /// Replace the state with this value
    Replace(S),
    /// Compute the next state from the current one
    Apply(UpdateFn<S>),
}

impl<S> Updater<S> {
    /// Updater that replaces the state outright.
    pub fn value(state: S) -> Self {
        Self::Replace(state)
    }

    /// Updater that derives the next state from the current one.
    ///
    /// The function must be pure: it runs while the store's state cell is
    /// held, so it must not call back into the store.
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(&S) -> S + Send + 'static,
    {
        Self::Apply(Box::new(f))
    }

    /// Produce the next state given the current one (pure).
    pub fn resolve(self, current: &S) -> S {
        match self {
            Self::Replace(state) => state,
            Self::Apply(f) => f(current),
        }
    }

    /// Whether this updater depends on the current state.
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Apply(_))
    }
}

impl<S> From<S> for Updater<S> {
    fn from(state: S) -> Self {
        Self::Replace(state)
    }
}

impl<S: fmt::Debug> fmt::Debug for Updater<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(state) => f.debug_tuple("Replace").field(state).finish(),
            Self::Apply(_) => f.write_str("Apply(<fn>)"),
        }
    }
}

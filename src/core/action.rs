//! Action tables and the transitions they produce.
//!
//! An action table is a closed enum: each variant is one named action and
//! carries that action's payload. [`ActionSet`] gives the variants their
//! names, [`Action`] turns a variant plus the current state into a
//! [`Transition`].

use super::updater::Updater;
use crate::error::LookupError;
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed, sendable future used for asynchronous transitions.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of applying an action to the current state.
///
/// Whether an action is synchronous is decided per invocation: the same
/// action table may answer some variants with [`Transition::Ready`] and
/// others with [`Transition::Pending`].
pub enum Transition<S, E> {
    /// The next state (or the failure) is already known
    Ready(Result<Updater<S>, E>),

    /// The next state is produced by a future
    Pending(BoxFuture<'static, Result<Updater<S>, E>>),
}

impl<S, E> Transition<S, E> {
    /// Synchronous transition to `next`.
    pub fn ready<U>(next: U) -> Self
    where
        U: Into<Updater<S>>,
    {
        Self::Ready(Ok(next.into()))
    }

    /// Synchronous transition computed from the state current at commit.
    pub fn update<F>(f: F) -> Self
    where
        F: FnOnce(&S) -> S + Send + 'static,
    {
        Self::Ready(Ok(Updater::with(f)))
    }

    /// Synchronous failure. Nothing is committed.
    pub fn fail(error: E) -> Self {
        Self::Ready(Err(error))
    }

    /// Asynchronous transition resolving to a state or an [`Updater`].
    pub fn pending<F, U>(future: F) -> Self
    where
        F: Future<Output = Result<U, E>> + Send + 'static,
        U: Into<Updater<S>>,
        S: 'static,
        E: 'static,
    {
        Self::Pending(Box::pin(async move {
            future.await.map(Into::<Updater<S>>::into)
        }))
    }

    /// Whether committing this transition has to wait for a future.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl<S: fmt::Debug, E: fmt::Debug> fmt::Debug for Transition<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(<future>)"),
        }
    }
}

/// A closed set of named actions.
///
/// Implemented by the [`actions!`](crate::actions) macro; a hand-written
/// implementation must keep `name` and `from_named` consistent with `NAMES`.
pub trait ActionSet: Sized {
    /// Every action name in the table, in declaration order
    const NAMES: &'static [&'static str];

    /// Name of this action.
    fn name(&self) -> &'static str;

    /// Build an action from its name and a JSON payload.
    ///
    /// Fails with [`LookupError::UnknownAction`] when `name` is not in
    /// [`ActionSet::NAMES`], or [`LookupError::InvalidPayload`] when the
    /// payload does not decode into that action's payload type.
    fn from_named(name: &str, payload: Value) -> Result<Self, LookupError>;
}

/// Whether every name in `names` is distinct. Used by [`actions!`](crate::actions)
/// to reject duplicate action names at compile time.
#[doc(hidden)]
pub const fn names_are_unique(names: &[&str]) -> bool {
    let mut i = 0;
    while i < names.len() {
        let mut j = i + 1;
        while j < names.len() {
            if same_name(names[i], names[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut k = 0;
    while k < a.len() {
        if a[k] != b[k] {
            return false;
        }
        k += 1;
    }
    true
}

/// The transition functions of an action table over state `S`.
///
/// # Example
///
/// ```rust
/// use tinstore::actions;
/// use tinstore::core::{Action, Transition};
/// use std::convert::Infallible;
///
/// actions! {
///     #[derive(Debug)]
///     pub enum CounterAction {
///         Increment(i64) = "increment",
///         Reset(()) = "reset",
///     }
/// }
///
/// impl Action<i64> for CounterAction {
///     type Error = Infallible;
///
///     fn apply(self, count: &i64) -> Transition<i64, Infallible> {
///         match self {
///             Self::Increment(amount) => Transition::ready(count + amount),
///             Self::Reset(()) => Transition::ready(0_i64),
///         }
///     }
/// }
/// ```
pub trait Action<S>: ActionSet + Send + 'static {
    /// Failure type of the transition functions
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compute the transition for this action from the current state.
    ///
    /// Runs while the store's state cell is held, so it must not call back
    /// into the store. Pending transitions must own everything they need
    /// from `state`.
    fn apply(self, state: &S) -> Transition<S, Self::Error>;
}

/// The empty action table. A store over it can only be read or `set`.
impl ActionSet for Infallible {
    const NAMES: &'static [&'static str] = &[];

    fn name(&self) -> &'static str {
        match *self {}
    }

    fn from_named(name: &str, _payload: Value) -> Result<Self, LookupError> {
        Err(LookupError::unknown(name, Self::NAMES))
    }
}

impl<S> Action<S> for Infallible {
    type Error = Infallible;

    fn apply(self, _state: &S) -> Transition<S, Infallible> {
        match self {}
    }
}

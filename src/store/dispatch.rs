//! Return types of [`Store::dispatch`](crate::Store::dispatch).

use crate::core::BoxFuture;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Outcome of a successful dispatch call.
///
/// A synchronous action has already been committed when `dispatch` returns.
/// An asynchronous action hands back a [`Pending`] future that commits when
/// it completes. Either way, `.await` yields the committed state:
///
/// ```rust
/// # use tinstore::{actions, Store};
/// # use tinstore::core::{Action, Transition};
/// # use std::convert::Infallible;
/// # actions! { enum Add { Now(i64), Later(i64) } }
/// # impl Action<i64> for Add {
/// #     type Error = Infallible;
/// #     fn apply(self, n: &i64) -> Transition<i64, Infallible> {
/// #         let n = *n;
/// #         match self {
/// #             Self::Now(k) => Transition::ready(n + k),
/// #             Self::Later(k) => Transition::pending(async move { Ok(n + k) }),
/// #         }
/// #     }
/// # }
/// # async fn run() -> Result<(), Infallible> {
/// let store: Store<i64, Add> = Store::new(0);
/// assert_eq!(store.dispatch(Add::Now(2))?.await?, 2);
/// assert_eq!(store.dispatch(Add::Later(3))?.await?, 5);
/// # Ok(())
/// # }
/// ```
///
/// A pending dispatch is a lazy future: the action's work runs, and the
/// commit happens, only while it is polled. Await it, or hand it to an
/// executor (`tokio::spawn(dispatch.into_future())`) to let it finish in the
/// background. Dropping it unpolled abandons the action.
#[must_use = "a pending dispatch commits only when awaited"]
pub enum Dispatch<S, E> {
    /// Synchronous action, already committed
    Committed(S),
    /// Asynchronous action, commits when the future completes
    Pending(Pending<S, E>),
}

impl<S, E> Dispatch<S, E> {
    /// The committed state of a synchronous action.
    pub fn committed(self) -> Option<S> {
        match self {
            Self::Committed(state) => Some(state),
            Self::Pending(_) => None,
        }
    }

    /// Whether the action is still in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl<S, E> IntoFuture for Dispatch<S, E>
where
    S: Send + 'static,
    E: Send + 'static,
{
    type Output = Result<S, E>;
    type IntoFuture = Pending<S, E>;

    fn into_future(self) -> Pending<S, E> {
        match self {
            Self::Committed(state) => Pending::new(std::future::ready(Ok(state))),
            Self::Pending(pending) => pending,
        }
    }
}

impl<S: fmt::Debug, E> fmt::Debug for Dispatch<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Committed(state) => f.debug_tuple("Committed").field(state).finish(),
            Self::Pending(pending) => f.debug_tuple("Pending").field(pending).finish(),
        }
    }
}

/// An in-flight asynchronous dispatch.
///
/// Resolves to the committed state, or to the action's error with nothing
/// committed. Like any future it does nothing until polled; dropping it
/// abandons the action.
#[must_use = "a pending dispatch commits only when awaited"]
pub struct Pending<S, E> {
    future: BoxFuture<'static, Result<S, E>>,
}

impl<S, E> Pending<S, E> {
    pub(crate) fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<S, E>> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }
}

impl<S, E> Future for Pending<S, E> {
    type Output = Result<S, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

impl<S, E> fmt::Debug for Pending<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pending(<future>)")
    }
}

//! Tinstore: a minimal observable state container
//!
//! A [`Store`] holds one authoritative state value. The state changes only
//! through actions from a closed, statically typed action table, and every
//! committed change is announced to subscribers with the next and previous
//! state.
//!
//! # Core Concepts
//!
//! - **Actions**: an enum implementing [`ActionSet`] and [`Action`]; each
//!   variant is a named transition carrying its payload
//! - **Transitions**: actions answer synchronously or with a future; the
//!   store commits either way
//! - **Updaters**: a next-state value or a pure function of the current
//!   state, such as the shallow-merge [`patch`](core::patch)
//! - **Subscribers**: listeners called in registration order after each
//!   commit
//!
//! # Example
//!
//! ```rust
//! use tinstore::{actions, Store};
//! use tinstore::core::{Action, Transition};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("count would go negative")]
//! struct Underflow;
//!
//! actions! {
//!     enum CounterAction {
//!         Increment(i64) = "increment",
//!         Decrement(i64) = "decrement",
//!     }
//! }
//!
//! impl Action<Counter> for CounterAction {
//!     type Error = Underflow;
//!
//!     fn apply(self, state: &Counter) -> Transition<Counter, Underflow> {
//!         match self {
//!             Self::Increment(n) => Transition::ready(Counter { count: state.count + n }),
//!             Self::Decrement(n) if n > state.count => Transition::fail(Underflow),
//!             Self::Decrement(n) => Transition::ready(Counter { count: state.count - n }),
//!         }
//!     }
//! }
//!
//! let store: Store<Counter, CounterAction> = Store::new(Counter { count: 0 });
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let unsubscribe = store.subscribe(move |next: &Counter, previous: &Counter| {
//!     sink.lock().unwrap().push((previous.count, next.count));
//! });
//!
//! let _ = store.dispatch(CounterAction::Increment(5)).unwrap();
//! assert!(store.dispatch(CounterAction::Decrement(9)).is_err());
//! assert_eq!(store.get_state(), Counter { count: 5 });
//!
//! unsubscribe.unsubscribe();
//! let _ = store.dispatch_named("decrement", serde_json::json!(2)).unwrap();
//!
//! assert_eq!(store.get_state(), Counter { count: 3 });
//! assert_eq!(*seen.lock().unwrap(), vec![(0, 5)]);
//! ```

pub mod builder;
pub mod core;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use self::builder::{BuildError, StoreBuilder};
pub use self::core::{patch, Action, ActionSet, Partial, Transition, Updater};
pub use self::error::{DispatchError, LookupError};
pub use self::store::{Dispatch, NotifyPolicy, Pending, Store, StoreConfig, Unsubscribe};

#[doc(hidden)]
pub mod __private {
    pub use crate::core::names_are_unique;
    pub use serde_json::{from_value, Value};
}

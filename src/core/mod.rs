//! Core types for actions and state updates.
//!
//! This module contains the pure pieces of the store:
//! - Action tables via the `ActionSet` and `Action` traits
//! - `Transition`, the synchronous or asynchronous result of an action
//! - `Updater`, a next-state value or a function of the current state
//! - `Partial` and `patch` for shallow-merge updates
//!
//! Nothing here touches a store; the store module commits what these produce.

mod action;
mod partial;
mod updater;

pub use action::{Action, ActionSet, BoxFuture, Transition};
#[doc(hidden)]
pub use action::names_are_unique;
pub use partial::{patch, Partial};
pub use updater::{UpdateFn, Updater};

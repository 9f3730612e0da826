//! Builder API for ergonomic store construction.
//!
//! This module provides a fluent builder and the declarative macros for
//! action tables (`actions!`) and mergeable state (`mergeable!`).

pub mod error;
pub mod macros;
pub mod store;

pub use error::BuildError;
pub use store::StoreBuilder;

//! Error types surfaced by the store.
//!
//! Action failures are never wrapped by [`Store::dispatch`](crate::Store::dispatch):
//! the action's own error type comes back unchanged. The types here only cover
//! failures the store itself can detect.

use thiserror::Error;

/// Failure to resolve an action from a name and a loosely typed payload.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No action in the table carries this name
    #[error("Unknown action '{name}', expected one of: [{expected}]")]
    UnknownAction { name: String, expected: String },

    /// The action exists but the payload does not decode into its payload type
    #[error("Invalid payload for action '{name}': {source}")]
    InvalidPayload {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LookupError {
    /// Build an [`LookupError::UnknownAction`] listing the names that were available.
    pub fn unknown(name: &str, expected: &[&str]) -> Self {
        Self::UnknownAction {
            name: name.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Errors returned by [`Store::dispatch_named`](crate::Store::dispatch_named).
#[derive(Debug, Error)]
pub enum DispatchError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The action's transition function failed
    #[error(transparent)]
    Action(E),
}

impl<E> DispatchError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the action's own error, if that is what failed.
    pub fn into_action_error(self) -> Option<E> {
        match self {
            Self::Action(error) => Some(error),
            Self::Lookup(_) => None,
        }
    }
}

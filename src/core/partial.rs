//! Shallow merging of partial state.

use serde_json::Value;

/// A partial description of some state type.
///
/// Merging is shallow: every field present in the partial overwrites the
/// corresponding field of the state, nested values are replaced rather than
/// merged, and fields absent from the partial keep their value.
///
/// Partial structs are usually generated by the [`mergeable!`](crate::mergeable) macro.
pub trait Partial {
    /// The full state this partial applies to
    type State;

    /// Return a new state with `self` laid over `state` (pure).
    fn merge_into(&self, state: &Self::State) -> Self::State;
}

/// Create an updater function that shallow-merges `partial` into the state.
///
/// The returned function performs no store interaction; pass it to
/// [`Updater::with`](crate::core::Updater::with), return it from an action via
/// [`Transition::update`](crate::core::Transition::update), or hand it to
/// [`Store::set`](crate::Store::set).
///
/// # Example
///
/// ```rust
/// use tinstore::core::patch;
/// use serde_json::json;
///
/// let set_b = patch(json!({ "b": 2 }));
/// assert_eq!(set_b(&json!({ "a": 1, "b": 1 })), json!({ "a": 1, "b": 2 }));
/// ```
pub fn patch<P: Partial>(partial: P) -> impl Fn(&P::State) -> P::State {
    move |state: &P::State| partial.merge_into(state)
}

/// JSON objects merge key by key.
///
/// A non-object partial contributes no fields, so the state comes back
/// unchanged. An object partial applied to a non-object state starts from an
/// empty object.
impl Partial for Value {
    type State = Value;

    fn merge_into(&self, state: &Value) -> Value {
        let Value::Object(fields) = self else {
            return state.clone();
        };

        let mut merged = match state {
            Value::Object(current) => current.clone(),
            _ => serde_json::Map::new(),
        };
        for (key, value) in fields {
            merged.insert(key.clone(), value.clone());
        }
        Value::Object(merged)
    }
}

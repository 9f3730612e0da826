//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::core::Action;
use crate::store::{Listener, NotifyPolicy, Store, StoreConfig};
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for constructing stores with a fluent API.
///
/// # Example
///
/// ```rust
/// use tinstore::builder::StoreBuilder;
/// use tinstore::store::NotifyPolicy;
/// use std::convert::Infallible;
///
/// let store = StoreBuilder::<u32, Infallible>::new()
///     .initial(1)
///     .label("settings")
///     .notify_policy(NotifyPolicy::Isolate)
///     .subscriber(|next: &u32, previous: &u32| println!("{previous} -> {next}"))
///     .build()
///     .unwrap();
///
/// assert_eq!(store.get_state(), 1);
/// assert_eq!(store.config().label, "settings");
/// assert_eq!(store.subscriber_count(), 1);
/// ```
pub struct StoreBuilder<S, A> {
    initial: Option<S>,
    config: StoreConfig,
    subscribers: Vec<Listener<S>>,
    _actions: PhantomData<fn(A)>,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Clone + Send + 'static,
    A: Action<S>,
{
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            initial: None,
            config: StoreConfig::default(),
            subscribers: Vec::new(),
            _actions: PhantomData,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the label used in log records.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Set how subscriber panics are handled.
    pub fn notify_policy(mut self, policy: NotifyPolicy) -> Self {
        self.config.notify = policy;
        self
    }

    /// Register a permanent subscriber, notified before any subscriber added
    /// after the store is built.
    pub fn subscriber<F>(mut self, listener: F) -> Self
    where
        F: Fn(&S, &S) + Send + Sync + 'static,
    {
        self.subscribers.push(Arc::new(listener));
        self
    }

    /// Build the store.
    /// Returns an error if the initial state is missing or the label is empty.
    pub fn build(self) -> Result<Store<S, A>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.config.label.trim().is_empty() {
            return Err(BuildError::EmptyLabel);
        }

        let store = Store::with_config(initial, self.config);
        for listener in self.subscribers {
            store.add_listener(listener);
        }

        Ok(store)
    }
}

impl<S, A> Default for StoreBuilder<S, A>
where
    S: Clone + Send + 'static,
    A: Action<S>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;
    use std::convert::Infallible;
    use std::sync::Mutex;

    crate::actions! {
        enum Toggle {
            Flip(()) = "flip",
        }
    }

    impl Action<bool> for Toggle {
        type Error = Infallible;

        fn apply(self, state: &bool) -> Transition<bool, Infallible> {
            match self {
                Self::Flip(()) => Transition::ready(!*state),
            }
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StoreBuilder::<bool, Toggle>::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_rejects_blank_label() {
        let result = StoreBuilder::<bool, Toggle>::new()
            .initial(false)
            .label("  ")
            .build();

        assert!(matches!(result, Err(BuildError::EmptyLabel)));
    }

    #[test]
    fn fluent_api_builds_store() {
        let store = StoreBuilder::<bool, Toggle>::new()
            .initial(false)
            .label("toggle")
            .notify_policy(NotifyPolicy::Isolate)
            .build()
            .unwrap();

        assert!(!store.get_state());
        assert_eq!(store.config().label, "toggle");
        assert_eq!(store.config().notify, NotifyPolicy::Isolate);
    }

    #[test]
    fn config_can_be_supplied_whole() {
        let config: StoreConfig = serde_json::from_str(r#"{ "label": "from-json" }"#).unwrap();
        let store = StoreBuilder::<bool, Toggle>::default()
            .initial(true)
            .config(config)
            .build()
            .unwrap();

        assert_eq!(store.config().label, "from-json");
        assert_eq!(store.config().notify, NotifyPolicy::Propagate);
    }

    #[test]
    fn builder_subscribers_run_first_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (first, second, late) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));

        let store = StoreBuilder::<bool, Toggle>::new()
            .initial(false)
            .subscriber(move |_, _| first.lock().unwrap().push("first"))
            .subscriber(move |_, _| second.lock().unwrap().push("second"))
            .build()
            .unwrap();
        store.subscribe(move |_, _| late.lock().unwrap().push("late"));

        let _ = store.dispatch(Toggle::Flip(())).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "late"]);
        assert!(store.get_state());
    }
}

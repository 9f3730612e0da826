//! Store configuration.

use serde::{Deserialize, Serialize};

/// How a commit treats a subscriber that panics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// The panic unwinds out of the commit. State is already committed and
    /// the remaining subscribers of that pass are skipped.
    #[default]
    Propagate,

    /// Each subscriber runs in isolation. A panic is logged and the pass
    /// continues with the next subscriber.
    Isolate,
}

/// Settings fixed at store construction.
///
/// Deserializes with defaults for missing fields, so an empty object is a
/// valid configuration.
///
/// # Example
///
/// ```rust
/// use tinstore::store::{NotifyPolicy, StoreConfig};
///
/// let config: StoreConfig = serde_json::from_str(r#"{ "notify": "isolate" }"#).unwrap();
/// assert_eq!(config.label, "store");
/// assert_eq!(config.notify, NotifyPolicy::Isolate);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name used to tag this store's log records
    pub label: String,

    /// Subscriber failure handling
    pub notify: NotifyPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            label: "store".to_string(),
            notify: NotifyPolicy::default(),
        }
    }
}

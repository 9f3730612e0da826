//! Async Profile Store
//!
//! This example demonstrates asynchronous actions and patch updates.
//!
//! Key concepts:
//! - Actions that resolve through a future
//! - `mergeable!` state with a generated patch struct
//! - Function updaters applied at commit time
//! - Isolating subscriber panics via configuration
//!
//! Run with: RUST_LOG=trace cargo run --example async_profile

use std::time::Duration;
use tinstore::builder::StoreBuilder;
use tinstore::core::{patch, Action, Transition, Updater};
use tinstore::store::NotifyPolicy;
use tinstore::{actions, mergeable};

mergeable! {
    #[derive(Clone, Debug, PartialEq)]
    struct Profile {
        name: String,
        email: String,
        visits: u32,
    }
    patch: #[derive(Debug, serde::Deserialize)] ProfilePatch
}

#[derive(Debug, thiserror::Error)]
enum ProfileError {
    #[error("user '{0}' not found")]
    NotFound(String),
}

actions! {
    #[derive(Debug)]
    enum ProfileAction {
        Load(String) = "load",
        Visit(()) = "visit",
    }
}

impl Action<Profile> for ProfileAction {
    type Error = ProfileError;

    fn apply(self, _state: &Profile) -> Transition<Profile, ProfileError> {
        match self {
            Self::Load(user) => Transition::pending(async move {
                // Stand-in for a network call.
                tokio::time::sleep(Duration::from_millis(50)).await;
                if user != "ada" {
                    return Err(ProfileError::NotFound(user));
                }
                Ok(Updater::with(patch(ProfilePatch {
                    name: Some("Ada Lovelace".to_string()),
                    email: Some("ada@example.com".to_string()),
                    ..Default::default()
                })))
            }),
            Self::Visit(()) => Transition::update(|profile: &Profile| Profile {
                visits: profile.visits + 1,
                ..profile.clone()
            }),
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("=== Async Profile Example ===\n");

    let store = StoreBuilder::<Profile, ProfileAction>::new()
        .initial(Profile {
            name: String::new(),
            email: String::new(),
            visits: 0,
        })
        .label("profile")
        .notify_policy(NotifyPolicy::Isolate)
        .subscriber(|next: &Profile, _: &Profile| println!("  now: {next:?}"))
        .subscriber(|_: &Profile, _: &Profile| panic!("a broken subscriber"))
        .build()
        .unwrap();

    println!("Loading 'ada' while a visit lands:");
    let loading = store.dispatch(ProfileAction::Load("ada".to_string())).unwrap();
    let _ = store.dispatch(ProfileAction::Visit(())).unwrap();
    let loaded = loading.await.unwrap();
    println!("Loaded: {loaded:?} (visit kept: {})", loaded.visits == 1);

    println!("\nLoading 'bob':");
    let loading = store.dispatch(ProfileAction::Load("bob".to_string())).unwrap();
    if let Err(error) = loading.await {
        println!("  failed: {error}");
    }

    println!("\nApplying a patch from JSON:");
    let partial: ProfilePatch = serde_json::from_str(r#"{ "visits": 10 }"#).unwrap();
    store.set(Updater::with(patch(partial)));

    println!("\nFinal state: {:?}", store.get_state());
    println!("\n=== Example Complete ===");
}

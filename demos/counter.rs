//! Counter Store
//!
//! This example demonstrates synchronous actions on a small store.
//!
//! Key concepts:
//! - Declaring an action table with `actions!`
//! - Subscribing and unsubscribing
//! - Dispatching by value and by name
//! - Failed actions leave the state untouched
//!
//! Run with: RUST_LOG=debug cargo run --example counter

use serde_json::json;
use tinstore::core::{Action, Transition};
use tinstore::{actions, Store};

#[derive(Clone, Debug, PartialEq)]
struct Counter {
    count: i64,
}

#[derive(Debug, thiserror::Error)]
#[error("cannot decrement {count} by {amount}")]
struct Underflow {
    count: i64,
    amount: i64,
}

actions! {
    #[derive(Debug)]
    enum CounterAction {
        Increment(i64) = "increment",
        Decrement(i64) = "decrement",
        Reset(()) = "reset",
    }
}

impl Action<Counter> for CounterAction {
    type Error = Underflow;

    fn apply(self, state: &Counter) -> Transition<Counter, Underflow> {
        match self {
            Self::Increment(amount) => Transition::ready(Counter {
                count: state.count + amount,
            }),
            Self::Decrement(amount) if amount > state.count => Transition::fail(Underflow {
                count: state.count,
                amount,
            }),
            Self::Decrement(amount) => Transition::ready(Counter {
                count: state.count - amount,
            }),
            Self::Reset(()) => Transition::ready(Counter { count: 0 }),
        }
    }
}

fn main() {
    env_logger::init();

    println!("=== Counter Store Example ===\n");

    let store: Store<Counter, CounterAction> = Store::new(Counter { count: 0 });

    let unsubscribe = store.subscribe(|next: &Counter, previous: &Counter| {
        println!("  {} -> {}", previous.count, next.count);
    });

    println!("Dispatching increment(5):");
    let _ = store.dispatch(CounterAction::Increment(5)).unwrap();

    println!("Dispatching decrement(2) by name:");
    let _ = store.dispatch_named("decrement", json!(2)).unwrap();

    println!("Dispatching decrement(10):");
    match store.dispatch(CounterAction::Decrement(10)) {
        Ok(_) => println!("  unexpected success"),
        Err(error) => println!("  rejected: {error}"),
    }

    println!("Dispatching unknown action 'multiply':");
    if let Err(error) = store.dispatch_named("multiply", json!(3)) {
        println!("  rejected: {error}");
    }

    unsubscribe.unsubscribe();
    let _ = store.dispatch(CounterAction::Reset(())).unwrap();

    println!("\nFinal state: {:?}", store.get_state());
    println!("\n=== Example Complete ===");
}

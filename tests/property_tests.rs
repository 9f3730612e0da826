//! Property-based tests for store commits and patching.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tinstore::core::{patch, Action, Transition};
use tinstore::{actions, Store};

actions! {
    #[derive(Clone, Debug)]
    enum Op {
        Add(i64) = "add",
        Mul(i64) = "mul",
        Set(i64) = "set",
        Double(()) = "double",
    }
}

impl Action<i64> for Op {
    type Error = Infallible;

    fn apply(self, state: &i64) -> Transition<i64, Infallible> {
        match self {
            Self::Add(n) => Transition::ready(state.wrapping_add(n)),
            Self::Mul(n) => Transition::ready(state.wrapping_mul(n)),
            Self::Set(n) => Transition::ready(n),
            Self::Double(()) => Transition::update(|s: &i64| s.wrapping_mul(2)),
        }
    }
}

/// Reference model of the action table.
fn model(op: &Op, state: i64) -> i64 {
    match *op {
        Op::Add(n) => state.wrapping_add(n),
        Op::Mul(n) => state.wrapping_mul(n),
        Op::Set(n) => n,
        Op::Double(()) => state.wrapping_mul(2),
    }
}

prop_compose! {
    fn arbitrary_op()(variant in 0..4u8, n in -1000i64..1000) -> Op {
        match variant {
            0 => Op::Add(n),
            1 => Op::Mul(n),
            2 => Op::Set(n),
            _ => Op::Double(()),
        }
    }
}

fn arbitrary_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-e]", any::<i32>(), 0..5).prop_map(|fields| {
        fields
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    })
}

proptest! {
    #[test]
    fn sync_dispatch_matches_model(
        initial in -1000i64..1000,
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let store: Store<i64, Op> = Store::new(initial);
        let mut expected = initial;

        for op in ops {
            expected = model(&op, expected);
            let committed = store.dispatch(op).unwrap().committed();
            prop_assert_eq!(committed, Some(expected));
            prop_assert_eq!(store.get_state(), expected);
        }
    }

    #[test]
    fn every_commit_reaches_every_subscriber_in_order(
        listeners in 1usize..5,
        ops in prop::collection::vec(arbitrary_op(), 1..10)
    ) {
        let store: Store<i64, Op> = Store::new(0);
        let calls = Arc::new(Mutex::new(Vec::new()));

        for index in 0..listeners {
            let calls = Arc::clone(&calls);
            store.subscribe(move |next: &i64, previous: &i64| {
                calls.lock().unwrap().push((index, *next, *previous));
            });
        }

        let mut expected = Vec::new();
        let mut state = 0;
        for op in &ops {
            let next = model(op, state);
            for index in 0..listeners {
                expected.push((index, next, state));
            }
            state = next;
            let _ = store.dispatch(op.clone()).unwrap();
        }

        prop_assert_eq!(&*calls.lock().unwrap(), &expected);
    }

    #[test]
    fn unsubscribed_listeners_stop_hearing_commits(
        listeners in 1usize..6,
        removed in prop::collection::vec(any::<bool>(), 6)
    ) {
        let store: Store<i64, Op> = Store::new(0);
        let calls = Arc::new(Mutex::new(vec![0usize; listeners]));

        let handles: Vec<_> = (0..listeners)
            .map(|index| {
                let calls = Arc::clone(&calls);
                store.subscribe(move |_: &i64, _: &i64| calls.lock().unwrap()[index] += 1)
            })
            .collect();

        for (index, handle) in handles.iter().enumerate() {
            if removed[index] {
                // Second call must be a harmless no-op.
                prop_assert!(handle.unsubscribe());
                prop_assert!(!handle.unsubscribe());
            }
        }

        let _ = store.dispatch(Op::Add(1)).unwrap();

        let calls = calls.lock().unwrap();
        for index in 0..listeners {
            prop_assert_eq!(calls[index], usize::from(!removed[index]));
        }
        let live = (0..listeners).filter(|index| !removed[*index]).count();
        prop_assert_eq!(store.subscriber_count(), live);
    }

    #[test]
    fn patch_is_a_shallow_overlay(state in arbitrary_object(), partial in arbitrary_object()) {
        let merged = patch(Value::Object(partial.clone()))(&Value::Object(state.clone()));
        let merged = merged.as_object().unwrap();

        for (key, value) in &partial {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &state {
            if !partial.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        prop_assert!(merged.keys().all(|key| state.contains_key(key) || partial.contains_key(key)));
    }

    #[test]
    fn patch_is_idempotent(state in arbitrary_object(), partial in arbitrary_object()) {
        let apply = patch(Value::Object(partial));
        let once = apply(&Value::Object(state));
        let twice = apply(&once);
        prop_assert_eq!(once, twice);
    }
}

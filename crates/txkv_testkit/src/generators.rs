//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so random operation sequences hit
//! the same keys often enough to exercise shadowing and overwrites.

use crate::ops::Op;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use txkv_core::Value;

/// Strategy for keys from a deliberately small key space.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,2}").expect("Invalid regex")
}

/// Strategy for arbitrary keys, including empty and non-ASCII ones.
pub fn any_key_strategy() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Strategy for values.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => -100i64..100,
        1 => any::<i64>(),
    ]
}

/// Strategy for a single operation.
///
/// Puts and gets dominate; begin/commit/rollback appear often enough to
/// cross state boundaries several times per sequence.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => key_strategy().prop_map(Op::Get),
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => Just(Op::Begin),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
    ]
}

/// Strategy for a sequence of operations.
pub fn op_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..max_len)
}

/// Strategy for committed key-value pairs to seed a store with.
pub fn committed_pairs_strategy(max_len: usize) -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..max_len)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::populated_store;
    use crate::model::ModelStore;
    use crate::ops::Outcome;
    use txkv_core::{StoreState, TransactionalStore};

    proptest! {
        #![proptest_config(PropTestConfig::default().to_proptest_config())]

        #[test]
        fn store_matches_model(ops in op_sequence_strategy(64)) {
            let mut store = TransactionalStore::new();
            let mut model = ModelStore::new();

            for op in &ops {
                let expected = model.apply(op);
                let actual = op.apply(&mut store);
                prop_assert_eq!(actual, expected, "diverged on {}", op);
                prop_assert_eq!(store.in_transaction(), model.in_transaction());
            }
        }

        #[test]
        fn failed_ops_change_nothing(
            seed in committed_pairs_strategy(8),
            ops in op_sequence_strategy(32),
        ) {
            let mut store = populated_store(&seed);

            for op in &ops {
                let snapshot = store.committed_snapshot();
                let state = store.state();
                let pending = store.pending_len();

                if let Outcome::Failed(_) = op.apply(&mut store) {
                    prop_assert_eq!(store.committed_snapshot(), snapshot);
                    prop_assert_eq!(store.state(), state);
                    prop_assert_eq!(store.pending_len(), pending);
                }
            }
        }

        #[test]
        fn arbitrary_keys_round_trip(key in any_key_strategy(), value in value_strategy()) {
            let mut store = TransactionalStore::new();
            store.begin_transaction().unwrap();
            store.put(key.as_str(), value).unwrap();
            store.commit().unwrap();
            prop_assert_eq!(store.get(&key), Some(value));
            prop_assert_eq!(store.state(), StoreState::Idle);
        }
    }

    #[test]
    fn config_presets_scale_up() {
        let quick = PropTestConfig::quick().to_proptest_config();
        let default = PropTestConfig::default().to_proptest_config();
        let thorough = PropTestConfig::thorough().to_proptest_config();

        assert!(quick.cases < default.cases && default.cases < thorough.cases);
        assert!(quick.max_shrink_iters < thorough.max_shrink_iters);
    }

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn key_strategy_stays_small(key in key_strategy()) {
            prop_assert!(!key.is_empty() && key.len() <= 2);
        }
    }
}

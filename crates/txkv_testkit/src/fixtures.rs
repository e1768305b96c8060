//! Test fixtures.

use crate::ops::{Op, Outcome};
use txkv_core::{StoreError, TransactionalStore, Value};

/// Creates a store whose committed state holds `pairs`.
///
/// Later pairs overwrite earlier ones with the same key.
pub fn populated_store(pairs: &[(String, Value)]) -> TransactionalStore {
    let mut store = TransactionalStore::new();
    store
        .transaction(|s| {
            for (key, value) in pairs {
                s.put(key.as_str(), *value)?;
            }
            Ok::<_, StoreError>(())
        })
        .expect("fresh store accepts a transaction");
    store
}

/// The reference walk-through, step by step, with the expected outcome of
/// each call.
pub fn reference_scenario() -> Vec<(Op, Outcome)> {
    use Outcome::{Done, Failed, Read};
    let no_txn = Failed(StoreError::NoActiveTransaction);

    vec![
        (Op::get("A"), Read(None)),
        (Op::put("A", 5), no_txn),
        (Op::Begin, Done),
        (Op::put("A", 5), Done),
        (Op::get("A"), Read(Some(5))),
        (Op::put("A", 6), Done),
        (Op::Commit, Done),
        (Op::get("A"), Read(Some(6))),
        (Op::Commit, no_txn),
        (Op::Rollback, no_txn),
        (Op::get("B"), Read(None)),
        (Op::Begin, Done),
        (Op::put("B", 10), Done),
        (Op::Rollback, Done),
        (Op::get("B"), Read(None)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelStore;
    use crate::ops::replay;

    #[test]
    fn store_follows_reference_scenario() {
        let mut store = TransactionalStore::new();
        for (op, expected) in reference_scenario() {
            assert_eq!(op.apply(&mut store), expected, "step {op}");
        }
    }

    #[test]
    fn replay_collects_reference_outcomes() {
        let (ops, expected): (Vec<Op>, Vec<Outcome>) = reference_scenario().into_iter().unzip();
        let mut store = TransactionalStore::new();
        assert_eq!(replay(&mut store, &ops), expected);
    }

    #[test]
    fn model_follows_reference_scenario() {
        let mut model = ModelStore::new();
        for (op, expected) in reference_scenario() {
            assert_eq!(model.apply(&op), expected, "step {op}");
        }
    }

    #[test]
    fn populated_store_is_idle() {
        let store = populated_store(&[("a".into(), 1), ("a".into(), 2), ("b".into(), 3)]);
        assert!(!store.in_transaction());
        assert_eq!(store.get("a"), Some(2));
        assert_eq!(store.committed_len(), 2);
    }
}

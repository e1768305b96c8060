//! Property tests over the read-resolution and state-machine rules.

use proptest::prelude::*;
use txkv_core::{StoreError, StoreState, TransactionalStore};

fn key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,2}").expect("valid regex")
}

fn committed(pairs: &[(String, i64)]) -> TransactionalStore {
    let mut store = TransactionalStore::new();
    store.begin_transaction().unwrap();
    for (k, v) in pairs {
        store.put(k.as_str(), *v).unwrap();
    }
    store.commit().unwrap();
    store
}

proptest! {
    #[test]
    fn unwritten_keys_are_absent(
        pairs in prop::collection::vec((key(), any::<i64>()), 0..8),
        probe in "[x-z]{1,3}",
        open in any::<bool>(),
    ) {
        let mut store = committed(&pairs);
        if open {
            store.begin_transaction().unwrap();
        }
        prop_assert_eq!(store.get(&probe), None);
    }

    #[test]
    fn pending_write_is_visible_but_not_committed(
        pairs in prop::collection::vec((key(), any::<i64>()), 0..8),
        k in key(),
        v in any::<i64>(),
    ) {
        let mut store = committed(&pairs);
        let before = store.get_committed(&k);

        store.begin_transaction().unwrap();
        store.put(k.as_str(), v).unwrap();

        prop_assert_eq!(store.get(&k), Some(v));
        prop_assert_eq!(store.get_committed(&k), before);
    }

    #[test]
    fn commit_persists_and_rollback_restores(
        pairs in prop::collection::vec((key(), any::<i64>()), 0..8),
        k in key(),
        v in any::<i64>(),
        keep in any::<bool>(),
    ) {
        let mut store = committed(&pairs);
        let before = store.get(&k);

        store.begin_transaction().unwrap();
        store.put(k.as_str(), v).unwrap();
        if keep {
            store.commit().unwrap();
            prop_assert_eq!(store.get(&k), Some(v));
        } else {
            store.rollback().unwrap();
            prop_assert_eq!(store.get(&k), before);
        }
        prop_assert_eq!(store.state(), StoreState::Idle);
    }

    #[test]
    fn idle_rejections_leave_state_untouched(
        pairs in prop::collection::vec((key(), any::<i64>()), 0..8),
        k in key(),
        v in any::<i64>(),
    ) {
        let mut store = committed(&pairs);
        let before = store.committed_snapshot();

        prop_assert_eq!(store.put(k.as_str(), v), Err(StoreError::NoActiveTransaction));
        prop_assert_eq!(store.commit(), Err(StoreError::NoActiveTransaction));
        prop_assert_eq!(store.rollback(), Err(StoreError::NoActiveTransaction));

        prop_assert_eq!(store.committed_snapshot(), before);
        prop_assert_eq!(store.state(), StoreState::Idle);
    }
}

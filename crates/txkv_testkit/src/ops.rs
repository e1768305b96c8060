//! Replayable store operations.

use std::fmt;
use txkv_core::{StoreError, TransactionalStore, Value};

/// A single call against the store contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `get(key)`
    Get(String),
    /// `put(key, value)`
    Put(String, Value),
    /// `begin_transaction()`
    Begin,
    /// `commit()`
    Commit,
    /// `rollback()`
    Rollback,
}

/// What a call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Result of a `get`.
    Read(Option<Value>),
    /// A mutating call succeeded.
    Done,
    /// The call was rejected.
    Failed(StoreError),
}

impl From<Result<(), StoreError>> for Outcome {
    fn from(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self::Done,
            Err(err) => Self::Failed(err),
        }
    }
}

impl Op {
    /// Shorthand for [`Op::Get`].
    pub fn get(key: &str) -> Self {
        Self::Get(key.to_string())
    }

    /// Shorthand for [`Op::Put`].
    pub fn put(key: &str, value: Value) -> Self {
        Self::Put(key.to_string(), value)
    }

    /// Runs the operation against a store.
    pub fn apply(&self, store: &mut TransactionalStore) -> Outcome {
        match self {
            Self::Get(key) => Outcome::Read(store.get(key)),
            Self::Put(key, value) => store.put(key.as_str(), *value).into(),
            Self::Begin => store.begin_transaction().into(),
            Self::Commit => store.commit().into(),
            Self::Rollback => store.rollback().into(),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get(key) => write!(f, "GET {key}"),
            Self::Put(key, value) => write!(f, "PUT {key} {value}"),
            Self::Begin => f.write_str("BEGIN"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
        }
    }
}

/// Replays `ops` against `store`, collecting every outcome.
pub fn replay(store: &mut TransactionalStore, ops: &[Op]) -> Vec<Outcome> {
    ops.iter().map(|op| op.apply(store)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_maps_results() {
        let mut store = TransactionalStore::new();
        assert_eq!(
            Op::put("a", 1).apply(&mut store),
            Outcome::Failed(StoreError::NoActiveTransaction)
        );
        assert_eq!(Op::Begin.apply(&mut store), Outcome::Done);
        assert_eq!(Op::put("a", 1).apply(&mut store), Outcome::Done);
        assert_eq!(Op::get("a").apply(&mut store), Outcome::Read(Some(1)));
    }

    #[test]
    fn display_uses_script_syntax() {
        assert_eq!(Op::put("a", -3).to_string(), "PUT a -3");
        assert_eq!(Op::Rollback.to_string(), "ROLLBACK");
    }
}

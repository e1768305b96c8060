//! Reference model for differential testing.
//!
//! `ModelStore` keeps every write in an append-only log and resolves reads
//! by scanning it backwards. It shares no code with the real store, so
//! agreement between the two on random operation sequences is meaningful.

use crate::ops::{Op, Outcome};
use txkv_core::{StoreError, Value};

/// Log-based model of the store contract.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    committed: Vec<(String, Value)>,
    pending: Option<Vec<(String, Value)>>,
}

fn last_write(log: &[(String, Value)], key: &str) -> Option<Value> {
    log.iter().rev().find(|(k, _)| k == key).map(|(_, v)| *v)
}

impl ModelStore {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs an operation against the model.
    pub fn apply(&mut self, op: &Op) -> Outcome {
        match op {
            Op::Get(key) => Outcome::Read(self.get(key)),
            Op::Put(key, value) => match self.pending.as_mut() {
                Some(log) => {
                    log.push((key.clone(), *value));
                    Outcome::Done
                }
                None => Outcome::Failed(StoreError::NoActiveTransaction),
            },
            Op::Begin => {
                if self.pending.is_some() {
                    return Outcome::Failed(StoreError::TransactionAlreadyActive);
                }
                self.pending = Some(Vec::new());
                Outcome::Done
            }
            Op::Commit => match self.pending.take() {
                Some(log) => {
                    self.committed.extend(log);
                    Outcome::Done
                }
                None => Outcome::Failed(StoreError::NoActiveTransaction),
            },
            Op::Rollback => match self.pending.take() {
                Some(_) => Outcome::Done,
                None => Outcome::Failed(StoreError::NoActiveTransaction),
            },
        }
    }

    /// Resolves a read: pending writes first, then committed ones.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.pending
            .as_deref()
            .and_then(|log| last_write(log, key))
            .or_else(|| last_write(&self.committed, key))
    }

    /// Resolves a read against committed writes only.
    pub fn get_committed(&self, key: &str) -> Option<Value> {
        last_write(&self.committed, key)
    }

    /// Returns `true` while a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_writes_shadow_earlier_ones() {
        let mut model = ModelStore::new();
        model.apply(&Op::Begin);
        model.apply(&Op::put("a", 1));
        model.apply(&Op::Commit);
        model.apply(&Op::Begin);
        model.apply(&Op::put("a", 2));

        assert_eq!(model.get("a"), Some(2));
        assert_eq!(model.get_committed("a"), Some(1));
    }

    #[test]
    fn rollback_drops_pending_log() {
        let mut model = ModelStore::new();
        model.apply(&Op::Begin);
        model.apply(&Op::put("a", 1));
        assert_eq!(model.apply(&Op::Rollback), Outcome::Done);
        assert_eq!(model.get("a"), None);
        assert!(!model.in_transaction());
    }
}

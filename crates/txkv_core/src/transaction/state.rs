//! Transaction state.

use crate::types::{Key, StoreState, TransactionId, Value};
use std::collections::HashMap;

/// The uncommitted write set of the active transaction.
///
/// Writes to the same key overwrite each other; only the last value is
/// merged into committed state on commit.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Transaction ID.
    id: TransactionId,
    /// Pending writes: key -> value.
    writes: HashMap<Key, Value>,
}

impl Transaction {
    /// Creates an empty transaction.
    pub(crate) fn new(id: TransactionId, capacity: usize) -> Self {
        Self {
            id,
            writes: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the transaction ID.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Records a write, replacing any earlier value for the key.
    pub(crate) fn put(&mut self, key: Key, value: Value) {
        self.writes.insert(key, value);
    }

    /// Gets the pending value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.writes.get(key).copied()
    }

    /// Returns the number of distinct keys written.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Returns all pending writes.
    pub fn pending_writes(&self) -> impl Iterator<Item = (&str, Value)> {
        self.writes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Consumes the transaction, yielding its writes.
    pub(crate) fn into_writes(self) -> HashMap<Key, Value> {
        self.writes
    }
}

/// Internal store state. The overlay exists exactly while a transaction is
/// active.
#[derive(Debug, Default)]
pub(crate) enum TxnState {
    #[default]
    Idle,
    InTransaction(Transaction),
}

impl TxnState {
    pub(crate) fn public(&self) -> StoreState {
        match self {
            Self::Idle => StoreState::Idle,
            Self::InTransaction(_) => StoreState::InTransaction,
        }
    }

    pub(crate) fn active(&self) -> Option<&Transaction> {
        match self {
            Self::Idle => None,
            Self::InTransaction(txn) => Some(txn),
        }
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut Transaction> {
        match self {
            Self::Idle => None,
            Self::InTransaction(txn) => Some(txn),
        }
    }

    /// Ends the active transaction, returning it.
    pub(crate) fn take(&mut self) -> Option<Transaction> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::InTransaction(txn) => Some(txn),
        }
    }
}

//! Core type definitions for TxKV.

use std::fmt;

/// Key type of the store.
pub type Key = String;

/// Value type of the store.
pub type Value = i64;

/// Identifier assigned to each transaction when it begins.
///
/// IDs are monotonically increasing per store and never reused. They exist
/// for diagnostics only and play no part in read resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub u64);

impl TransactionId {
    /// Creates a new transaction ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next transaction ID.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn:{}", self.0)
    }
}

/// Externally visible state of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreState {
    /// No transaction is active. Only `get` and `begin_transaction` succeed.
    Idle,
    /// A transaction is active and its overlay shadows committed values.
    InTransaction,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::InTransaction => f.write_str("in-transaction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_id_ordering() {
        let a = TransactionId::new(1);
        assert!(a < a.next());
        assert_eq!(a.next().as_u64(), 2);
    }

    #[test]
    fn display() {
        assert_eq!(TransactionId::new(7).to_string(), "txn:7");
        assert_eq!(StoreState::Idle.to_string(), "idle");
        assert_eq!(StoreState::InTransaction.to_string(), "in-transaction");
    }
}

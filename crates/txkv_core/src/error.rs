//! Error types for TxKV core.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by [`TransactionalStore`](crate::TransactionalStore).
///
/// Both variants are precondition violations. The store is left exactly as
/// it was before the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `put`, `commit` or `rollback` was called while no transaction is active.
    #[error("no transaction in progress")]
    NoActiveTransaction,

    /// `begin_transaction` was called while a transaction is already active.
    #[error("a transaction is already in progress")]
    TransactionAlreadyActive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            StoreError::NoActiveTransaction.to_string(),
            "no transaction in progress"
        );
        assert_eq!(
            StoreError::TransactionAlreadyActive.to_string(),
            "a transaction is already in progress"
        );
    }

    #[test]
    fn variants_are_distinguishable() {
        assert_ne!(
            StoreError::NoActiveTransaction,
            StoreError::TransactionAlreadyActive
        );
    }
}

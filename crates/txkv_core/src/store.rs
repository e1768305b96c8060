//! The transactional store.

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::stats::StoreStats;
use crate::transaction::{Transaction, TxnState};
use crate::types::{Key, StoreState, TransactionId, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// In-memory key-value store with at most one pending transaction.
///
/// The store holds committed state and, while a transaction is active, an
/// overlay of uncommitted writes. Reads consult the overlay first and fall
/// back to committed state. Writes are only accepted inside a transaction.
///
/// ```text
/// Idle --begin_transaction--> InTransaction
/// InTransaction --commit--> Idle      (overlay merged into committed state)
/// InTransaction --rollback--> Idle    (overlay discarded)
/// ```
///
/// A rejected call returns a [`StoreError`] and leaves the store untouched.
///
/// For multi-threaded use wrap the store in a [`SharedStore`](crate::SharedStore).
#[derive(Debug)]
pub struct TransactionalStore {
    /// Configuration.
    config: Config,
    /// Committed state.
    base: HashMap<Key, Value>,
    /// Pending transaction, if any.
    state: TxnState,
    /// ID handed to the next transaction.
    next_txid: TransactionId,
    /// Operation counters.
    stats: StoreStats,
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            base: HashMap::with_capacity(config.initial_capacity),
            config,
            state: TxnState::Idle,
            next_txid: TransactionId::new(1),
            stats: StoreStats::new(),
        }
    }

    /// Reads a key.
    ///
    /// An uncommitted value written by the active transaction wins over the
    /// committed value. Returns `None` if neither layer holds the key.
    pub fn get(&self, key: &str) -> Option<Value> {
        let pending = self.state.active().and_then(|txn| txn.get(key));
        let value = pending.or_else(|| self.base.get(key).copied());
        self.stats.record_read(pending.is_some());
        trace!(store = self.config.label(), key, ?value, "get");
        value
    }

    /// Reads a key from committed state only, ignoring any pending writes.
    pub fn get_committed(&self, key: &str) -> Option<Value> {
        self.base.get(key).copied()
    }

    /// Writes a key in the active transaction.
    ///
    /// Overwrites any earlier uncommitted value for the key. Committed state
    /// is not touched until [`commit`](Self::commit).
    ///
    /// # Errors
    ///
    /// [`StoreError::NoActiveTransaction`] if no transaction is active.
    pub fn put(&mut self, key: impl Into<Key>, value: Value) -> StoreResult<()> {
        let Some(txn) = self.state.active_mut() else {
            return Err(self.reject("put", StoreError::NoActiveTransaction));
        };
        let key = key.into();
        trace!(store = self.config.label(), txn = %txn.id(), key = %key, value, "put");
        txn.put(key, value);
        self.stats.record_write();
        Ok(())
    }

    /// Starts a transaction with an empty overlay.
    ///
    /// # Errors
    ///
    /// [`StoreError::TransactionAlreadyActive`] if a transaction is active.
    /// The active transaction is kept as is.
    pub fn begin_transaction(&mut self) -> StoreResult<()> {
        if self.in_transaction() {
            return Err(self.reject("begin", StoreError::TransactionAlreadyActive));
        }

        let id = self.next_txid;
        self.next_txid = id.next();
        self.state =
            TxnState::InTransaction(Transaction::new(id, self.config.overlay_capacity));
        self.stats.record_begin();
        debug!(store = self.config.label(), txn = %id, "transaction started");
        Ok(())
    }

    /// Merges the active transaction into committed state and ends it.
    ///
    /// Every pending key overwrites its committed value. Committed keys the
    /// transaction did not write are left alone.
    ///
    /// # Errors
    ///
    /// [`StoreError::NoActiveTransaction`] if no transaction is active.
    pub fn commit(&mut self) -> StoreResult<()> {
        let Some(txn) = self.state.take() else {
            return Err(self.reject("commit", StoreError::NoActiveTransaction));
        };

        let id = txn.id();
        let writes = txn.into_writes();
        let count = writes.len();
        self.base.extend(writes);
        self.stats.record_commit(count);
        debug!(
            store = self.config.label(),
            txn = %id,
            writes = count,
            committed = self.base.len(),
            "transaction committed"
        );
        Ok(())
    }

    /// Discards the active transaction. Committed state is unchanged.
    ///
    /// # Errors
    ///
    /// [`StoreError::NoActiveTransaction`] if no transaction is active.
    pub fn rollback(&mut self) -> StoreResult<()> {
        let Some(txn) = self.state.take() else {
            return Err(self.reject("rollback", StoreError::NoActiveTransaction));
        };

        self.stats.record_rollback();
        debug!(
            store = self.config.label(),
            txn = %txn.id(),
            discarded = txn.write_count(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Runs `f` inside a new transaction.
    ///
    /// If `f` returns `Ok`, the transaction is committed; if it returns
    /// `Err`, the transaction is rolled back. When `f` has already ended the
    /// transaction itself, nothing further is done. If `f` panics, the
    /// transaction is rolled back before the panic propagates.
    ///
    /// # Errors
    ///
    /// [`StoreError::TransactionAlreadyActive`] (converted into `E`) without
    /// running `f` if a transaction is already active, or whatever `f`
    /// returns.
    pub fn transaction<F, T, E>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.begin_transaction()?;
        let mut guard = RollbackOnUnwind {
            id: self.current_transaction_id(),
            store: self,
        };

        let result = f(&mut *guard.store);
        if guard.still_active() {
            match result {
                Ok(_) => guard.store.commit()?,
                Err(_) => guard.store.rollback()?,
            }
        }
        result
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> StoreState {
        self.state.public()
    }

    /// Returns `true` while a transaction is active.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.state() == StoreState::InTransaction
    }

    /// Returns the ID of the active transaction.
    #[must_use]
    pub fn current_transaction_id(&self) -> Option<TransactionId> {
        self.state.active().map(Transaction::id)
    }

    /// Returns the active transaction's overlay.
    #[must_use]
    pub fn current_transaction(&self) -> Option<&Transaction> {
        self.state.active()
    }

    /// Number of keys written by the active transaction (0 when idle).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.state.active().map_or(0, Transaction::write_count)
    }

    /// Number of committed keys.
    #[must_use]
    pub fn committed_len(&self) -> usize {
        self.base.len()
    }

    /// Returns a sorted copy of committed state.
    #[must_use]
    pub fn committed_snapshot(&self) -> BTreeMap<Key, Value> {
        self.base
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn reject(&self, op: &'static str, err: StoreError) -> StoreError {
        self.stats.record_error();
        debug!(store = self.config.label(), op, state = %self.state(), error = %err, "operation rejected");
        err
    }
}

/// Rolls back the scoped transaction if its closure panics, so a panic
/// never leaves a half-written overlay behind.
struct RollbackOnUnwind<'a> {
    store: &'a mut TransactionalStore,
    id: Option<TransactionId>,
}

impl RollbackOnUnwind<'_> {
    fn still_active(&self) -> bool {
        self.store.current_transaction_id() == self.id
    }
}

impl Drop for RollbackOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() && self.still_active() {
            debug!(
                store = self.store.config.label(),
                "closure panicked; rolling back scoped transaction"
            );
            let _ = self.store.rollback();
        }
    }
}

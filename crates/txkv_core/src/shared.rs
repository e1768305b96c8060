//! Thread-safe store handle.

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::stats::StatsSnapshot;
use crate::store::TransactionalStore;
use crate::types::{Key, StoreState, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle to a [`TransactionalStore`] shared across threads.
///
/// Every call takes the store-wide lock for its whole duration, so each
/// operation is applied atomically. All handles share the one transaction
/// slot: a transaction begun through one handle is visible to, and can be
/// committed by, any other handle.
///
/// Use [`transaction`](Self::transaction) when a begin/put/commit sequence
/// must not interleave with other callers.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<TransactionalStore>>,
}

impl SharedStore {
    /// Creates a handle to a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(TransactionalStore::new())
    }

    /// Creates a handle to a new store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::from_store(TransactionalStore::with_config(config))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: TransactionalStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`TransactionalStore::get`].
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.lock().get(key)
    }

    /// See [`TransactionalStore::get_committed`].
    pub fn get_committed(&self, key: &str) -> Option<Value> {
        self.inner.lock().get_committed(key)
    }

    /// See [`TransactionalStore::put`].
    pub fn put(&self, key: impl Into<Key>, value: Value) -> StoreResult<()> {
        self.inner.lock().put(key, value)
    }

    /// See [`TransactionalStore::begin_transaction`].
    pub fn begin_transaction(&self) -> StoreResult<()> {
        self.inner.lock().begin_transaction()
    }

    /// See [`TransactionalStore::commit`].
    pub fn commit(&self) -> StoreResult<()> {
        self.inner.lock().commit()
    }

    /// See [`TransactionalStore::rollback`].
    pub fn rollback(&self) -> StoreResult<()> {
        self.inner.lock().rollback()
    }

    /// Runs a whole transaction under a single lock acquisition.
    ///
    /// See [`TransactionalStore::transaction`].
    pub fn transaction<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut TransactionalStore) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.inner.lock().transaction(f)
    }

    /// Returns the current state.
    pub fn state(&self) -> StoreState {
        self.inner.lock().state()
    }

    /// Returns a copy of the store's counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Runs `f` with shared access to the store while holding the lock.
    pub fn with_store<R>(&self, f: impl FnOnce(&TransactionalStore) -> R) -> R {
        f(&self.inner.lock())
    }
}

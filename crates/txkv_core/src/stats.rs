//! Store statistics.
//!
//! Counters are updated by the store as operations complete and can be read
//! at any time through [`TransactionalStore::stats`](crate::TransactionalStore::stats).
//!
//! ```rust
//! use txkv_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.begin_transaction().unwrap();
//! store.put("a", 1).unwrap();
//! store.rollback().unwrap();
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.transactions_rolled_back, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics and counters.
///
/// All counters are atomic and monotonically increasing. A rejected
/// operation only bumps `errors`.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Total number of `get` calls.
    reads: AtomicU64,
    /// Reads answered from the active overlay.
    overlay_hits: AtomicU64,
    /// Total number of accepted `put` calls.
    writes: AtomicU64,
    /// Total number of transactions started.
    transactions_started: AtomicU64,
    /// Total number of transactions committed.
    transactions_committed: AtomicU64,
    /// Total number of transactions rolled back.
    transactions_rolled_back: AtomicU64,
    /// Total number of entries merged into committed state.
    entries_committed: AtomicU64,
    /// Total number of rejected operations.
    errors: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self, from_overlay: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if from_overlay {
            self.overlay_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self, entries: usize) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
        self.entries_committed
            .fetch_add(entries as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of reads.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of reads served by the overlay.
    pub fn overlay_hits(&self) -> u64 {
        self.overlay_hits.load(Ordering::Relaxed)
    }

    /// Returns the number of accepted writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions started.
    pub fn transactions_started(&self) -> u64 {
        self.transactions_started.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions committed.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the number of entries merged into committed state.
    pub fn entries_committed(&self) -> u64 {
        self.entries_committed.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected operations.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Takes a point-in-time copy of every counter.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            overlay_hits: self.overlay_hits(),
            writes: self.writes(),
            transactions_started: self.transactions_started(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            entries_committed: self.entries_committed(),
            errors: self.errors(),
        }
    }
}

/// Plain copy of [`StoreStats`] counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Total number of reads.
    pub reads: u64,
    /// Reads served by the overlay.
    pub overlay_hits: u64,
    /// Accepted writes.
    pub writes: u64,
    /// Transactions started.
    pub transactions_started: u64,
    /// Transactions committed.
    pub transactions_committed: u64,
    /// Transactions rolled back.
    pub transactions_rolled_back: u64,
    /// Entries merged into committed state.
    pub entries_committed: u64,
    /// Rejected operations.
    pub errors: u64,
}

impl StatsSnapshot {
    /// Number of transactions currently open (0 or 1).
    #[must_use]
    pub fn open_transactions(&self) -> u64 {
        self.transactions_started
            - self.transactions_committed
            - self.transactions_rolled_back
    }
}

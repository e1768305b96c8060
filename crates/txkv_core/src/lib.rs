//! # TxKV Core
//!
//! In-memory key-value store with a single pending transaction overlaid on
//! committed state.
//!
//! This crate provides:
//! - [`TransactionalStore`] - the committed base map plus an optional overlay
//! - [`SharedStore`] - a mutex-guarded handle for multi-threaded callers
//! - [`Config`] - construction options
//! - [`StoreStats`] - operation counters
//!
//! ## Example
//!
//! ```rust
//! use txkv_core::{StoreError, TransactionalStore};
//!
//! let mut store = TransactionalStore::new();
//! assert_eq!(store.get("A"), None);
//! assert_eq!(store.put("A", 5), Err(StoreError::NoActiveTransaction));
//!
//! store.begin_transaction().unwrap();
//! store.put("A", 5).unwrap();
//! assert_eq!(store.get("A"), Some(5));
//! assert_eq!(store.get_committed("A"), None);
//!
//! store.commit().unwrap();
//! assert_eq!(store.get("A"), Some(5));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod shared;
mod stats;
mod store;
mod transaction;
mod types;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::TransactionalStore;
pub use transaction::Transaction;
pub use types::{Key, StoreState, TransactionId, Value};

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

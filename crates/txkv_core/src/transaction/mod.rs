//! Transaction overlay.
//!
//! A transaction buffers writes in an overlay map that shadows the store's
//! committed state until it is committed or rolled back.

mod state;

pub use state::Transaction;
pub(crate) use state::TxnState;

//! # TxKV Testkit
//!
//! Test utilities for TxKV.
//!
//! This crate provides:
//! - Operation scripts that can be replayed against a store
//! - A reference model for differential testing
//! - Property-based test generators using proptest
//! - Fixtures, including the reference scenario
//! - Stress testing utilities
//!
//! ## Usage
//!
//! ```rust
//! use txkv_testkit::prelude::*;
//!
//! let mut store = TransactionalStore::new();
//! for (op, expected) in reference_scenario() {
//!     assert_eq!(op.apply(&mut store), expected);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod ops;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::ops::*;
    pub use crate::stress::*;
    pub use txkv_core::{StoreError, StoreState, TransactionalStore};
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use ops::*;
pub use stress::*;

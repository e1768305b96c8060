//! Stress tests for TxKV.
//!
//! These runs verify behavior under heavy load and concurrent access
//! through [`SharedStore`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use txkv_core::{SharedStore, StoreError, TransactionalStore, Value};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of transactions to run.
    pub operations: usize,
    /// Number of concurrent threads (for concurrent tests).
    pub threads: usize,
    /// Writes per transaction.
    pub writes_per_txn: usize,
    /// Number of distinct keys.
    pub key_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 10_000,
            threads: 4,
            writes_per_txn: 4,
            key_count: 1_000,
        }
    }
}

fn stress_key(i: usize, config: &StressConfig) -> String {
    format!("key-{}", i % config.key_count.max(1))
}

/// Runs committed transactions back to back on a single store.
pub fn stress_sequential_transactions(
    store: &mut TransactionalStore,
    config: &StressConfig,
) -> StressTestResult {
    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for i in 0..config.operations {
        let result = store.transaction(|s| {
            for w in 0..config.writes_per_txn {
                s.put(stress_key(i + w, config), i as Value)?;
            }
            Ok::<_, StoreError>(())
        });

        match result {
            Ok(()) => successful += 1,
            Err(_) => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Alternates committed and rolled-back transactions, with reads between.
pub fn stress_mixed_operations(
    store: &mut TransactionalStore,
    config: &StressConfig,
) -> StressTestResult {
    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for i in 0..config.operations {
        let key = stress_key(i, config);
        let result = match i % 3 {
            0 => store.transaction(|s| s.put(key, i as Value)),
            1 => {
                store.get(&key);
                Ok(())
            }
            _ => store
                .begin_transaction()
                .and_then(|()| store.put(key, -1))
                .and_then(|()| store.rollback()),
        };

        match result {
            Ok(()) => successful += 1,
            Err(_) => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Runs scoped transactions from several threads against one store.
///
/// Each transaction runs under the store lock, so none should fail.
pub fn stress_concurrent_transactions(
    store: &SharedStore,
    config: &StressConfig,
) -> StressTestResult {
    let successful = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let ops_per_thread = config.operations / config.threads.max(1);

    let start = Instant::now();

    thread::scope(|scope| {
        for t in 0..config.threads {
            let store = store.clone();
            let successful = &successful;
            let failed = &failed;

            scope.spawn(move || {
                for i in 0..ops_per_thread {
                    let result = store.transaction(|s| {
                        for w in 0..config.writes_per_txn {
                            s.put(stress_key(t * ops_per_thread + i + w, config), t as Value)?;
                        }
                        Ok::<_, StoreError>(())
                    });

                    match result {
                        Ok(()) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            });
        }
    });

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Races bare `begin_transaction`/`commit` calls from several threads.
///
/// Threads share the single transaction slot, so some calls are expected
/// to fail; the store must still end up consistent.
pub fn stress_contended_begin(store: &SharedStore, config: &StressConfig) -> StressTestResult {
    let successful = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let ops_per_thread = config.operations / config.threads.max(1);

    let start = Instant::now();

    thread::scope(|scope| {
        for _ in 0..config.threads {
            let store = store.clone();
            let successful = &successful;
            let failed = &failed;

            scope.spawn(move || {
                for i in 0..ops_per_thread {
                    let result = if i % 2 == 0 {
                        store.begin_transaction()
                    } else {
                        store.commit()
                    };

                    match result {
                        Ok(()) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            });
        }
    });

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

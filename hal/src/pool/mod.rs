//! External allocator pool statistics
//!
//! Aggregate total/used/free/block-count accounting for a secondary
//! allocator pool. The live smalloc-backed adapter for the Teensy 4.1
//! PSRAM pool only exists on that platform; on boards without external RAM
//! the operations are absent from the compiled surface entirely, so callers
//! feature-detect at build time rather than branching on runtime zeros.

#[cfg(feature = "platform-teensy41")]
mod smalloc;
#[cfg(feature = "platform-teensy41")]
pub use smalloc::*;

/// Aggregate pool accounting, snapshotted at call time.
///
/// Never cached: the underlying pool changes continuously as the allocator
/// runs, so every query takes a fresh snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total pool capacity in bytes.
    pub total: usize,
    /// Bytes currently allocated.
    pub used: usize,
    /// Bytes currently free.
    pub free: usize,
    /// Number of allocated blocks.
    pub blocks: usize,
}

/// A queryable allocator pool.
///
/// Implementations may walk the pool's internal free list, which makes
/// [`stats`](PoolSource::stats) potentially expensive; avoid calling it on
/// a hot path.
pub trait PoolSource {
    /// Take a fresh snapshot of the pool's accounting.
    fn stats(&self) -> PoolStats;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Fake pool whose occupancy shifts on every query, the way a live
    /// allocator's would.
    struct FakePool {
        total: usize,
        used: Cell<usize>,
    }

    impl PoolSource for FakePool {
        fn stats(&self) -> PoolStats {
            let used = self.used.get();
            self.used.set(used + 4096);
            PoolStats {
                total: self.total,
                used,
                free: self.total - used,
                blocks: used / 4096,
            }
        }
    }

    #[test]
    fn bookkeeping_never_exceeds_capacity() {
        let pool = FakePool {
            total: 8 << 20,
            used: Cell::new(64 << 10),
        };
        for _ in 0..16 {
            let stats = pool.stats();
            assert!(stats.used + stats.free <= stats.total);
        }
    }

    #[test]
    fn every_query_is_a_fresh_snapshot() {
        let pool = FakePool {
            total: 8 << 20,
            used: Cell::new(0),
        };
        let first = pool.stats();
        let second = pool.stats();
        assert_ne!(first, second);
        assert_eq!(second.used, first.used + 4096);
    }

    #[test]
    fn uninitialized_pool_reports_all_zeros() {
        let stats = PoolStats::default();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.used + stats.free, 0);
        assert_eq!(stats.blocks, 0);
    }
}

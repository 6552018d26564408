//! smalloc-backed PSRAM pool adapter (Teensy 4.1)
//!
//! Wraps the Teensy core's smalloc pool that manages dynamic EXTMEM
//! allocations. `sm_malloc_stats_pool` walks the pool's free list, so these
//! queries are expensive; keep them off hot paths. A query against a pool
//! that was never initialized (no PSRAM fitted) yields all-zero statistics.

use core::ffi::c_int;

use super::{PoolSource, PoolStats};

/// Opaque smalloc pool descriptor owned by the Teensy core.
#[repr(C)]
pub struct SmallocPool {
    _opaque: [u8; 0],
}

extern "C" {
    static mut extmem_smalloc_pool: SmallocPool;
    fn sm_malloc_stats_pool(
        pool: *mut SmallocPool,
        total: *mut usize,
        used: *mut usize,
        free: *mut usize,
        blocks: *mut c_int,
    );
}

/// The dynamic EXTMEM pool on the fitted PSRAM chip.
pub struct ExtMemPool;

impl PoolSource for ExtMemPool {
    fn stats(&self) -> PoolStats {
        psram_pool_stats()
    }
}

/// Fresh snapshot of the dynamic PSRAM pool. Expensive; walks the free list.
pub fn psram_pool_stats() -> PoolStats {
    let mut total = 0usize;
    let mut used = 0usize;
    let mut free = 0usize;
    let mut blocks: c_int = 0;
    unsafe {
        sm_malloc_stats_pool(
            core::ptr::addr_of_mut!(extmem_smalloc_pool),
            &mut total,
            &mut used,
            &mut free,
            &mut blocks,
        );
    }
    PoolStats {
        total,
        used,
        free,
        blocks: blocks as usize,
    }
}

pub fn psram_pool_total() -> usize {
    psram_pool_stats().total
}

pub fn psram_pool_used() -> usize {
    psram_pool_stats().used
}

pub fn psram_pool_free() -> usize {
    psram_pool_stats().free
}

pub fn psram_pool_block_count() -> usize {
    psram_pool_stats().blocks
}

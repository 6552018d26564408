//! Live pointer sampler
//!
//! Reads the current stack pointer and the heap allocator's break pointer
//! at the instant of query and derives used/available byte counts against
//! the resolved region bounds. Each sample couples one raw pointer with its
//! derived metrics; stack and heap samples taken back to back are not
//! guaranteed mutually consistent, since interrupt handlers or nested calls
//! can move either pointer between the two reads.

// Platform-specific implementations

#[cfg(any(feature = "platform-teensy40", feature = "platform-teensy41"))]
mod teensy;
#[cfg(any(feature = "platform-teensy40", feature = "platform-teensy41"))]
pub use teensy::*;

#[cfg(feature = "platform-host")]
mod host;
#[cfg(feature = "platform-host")]
pub use host::*;

// Fallback stub for other platforms
#[cfg(not(any(
    feature = "platform-host",
    feature = "platform-teensy40",
    feature = "platform-teensy41"
)))]
mod none;
#[cfg(not(any(
    feature = "platform-host",
    feature = "platform-teensy40",
    feature = "platform-teensy41"
)))]
pub use none::*;

use crate::layout::MemoryMap;

/// One stack observation: the raw pointer plus its derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSample {
    /// Stack pointer at the instant of the sample.
    pub pointer: usize,
    /// Bytes between the stack top and the pointer.
    pub used: usize,
    /// Bytes the stack can still grow before reaching the end of bss.
    pub available: usize,
}

impl StackSample {
    /// Derive the metrics for a given pointer. Pure; pointers outside the
    /// stack extent clamp to zero rather than underflowing.
    pub fn compute(map: &MemoryMap, pointer: usize) -> Self {
        StackSample {
            pointer,
            used: map.stack_top.saturating_sub(pointer),
            available: pointer.saturating_sub(map.bss_end),
        }
    }

    /// Sample the live stack pointer.
    pub fn take(map: &MemoryMap) -> Self {
        Self::compute(map, stack_pointer())
    }
}

/// One heap observation: the raw break pointer plus its derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapSample {
    /// Allocator break pointer at the instant of the sample.
    pub pointer: usize,
    /// Bytes between the heap start and the break.
    pub used: usize,
    /// Bytes between the break and the end of the heap arena.
    pub available: usize,
}

impl HeapSample {
    /// Derive the metrics for a given break pointer. Pure.
    pub fn compute(map: &MemoryMap, pointer: usize) -> Self {
        HeapSample {
            pointer,
            used: pointer.saturating_sub(map.heap_start),
            available: map.heap_end.saturating_sub(pointer),
        }
    }

    /// Sample the live break pointer.
    pub fn take(map: &MemoryMap) -> Self {
        Self::compute(map, heap_break())
    }
}

pub fn used_stack_bytes() -> usize {
    StackSample::take(&MemoryMap::current()).used
}

pub fn available_stack_bytes() -> usize {
    StackSample::take(&MemoryMap::current()).available
}

pub fn used_heap_bytes() -> usize {
    HeapSample::take(&MemoryMap::current()).used
}

pub fn available_heap_bytes() -> usize {
    HeapSample::take(&MemoryMap::current()).available
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{test_constants, test_markers};

    fn map() -> MemoryMap {
        MemoryMap::from_parts(&test_constants(), &test_markers())
    }

    #[test]
    fn stack_metrics_partition_the_stack_extent() {
        let map = map();
        let sample = StackSample::compute(&map, 0x2007_0000);
        assert_eq!(sample.used, 0x2008_0000 - 0x2007_0000);
        assert_eq!(sample.available, 0x2007_0000 - 0x2001_0000);
        // used + available always spans end-of-bss to stack top
        assert_eq!(sample.used + sample.available, map.stack_bytes());
    }

    #[test]
    fn heap_metrics_partition_the_heap_arena() {
        let map = map();
        let sample = HeapSample::compute(&map, 0x2022_0000);
        assert_eq!(sample.used, 0x2022_0000 - 0x2020_4000);
        assert_eq!(sample.available, 0x2028_0000 - 0x2022_0000);
        assert_eq!(sample.used + sample.available, map.heap_bytes());
    }

    #[test]
    fn out_of_extent_pointers_clamp_instead_of_underflowing() {
        let map = map();
        let above_top = StackSample::compute(&map, map.stack_top + 0x100);
        assert_eq!(above_top.used, 0);
        let below_arena = HeapSample::compute(&map, map.heap_start - 0x100);
        assert_eq!(below_arena.used, 0);
    }

    #[cfg(feature = "platform-host")]
    #[test]
    fn live_pointers_are_nonzero_on_the_host() {
        assert_ne!(stack_pointer(), 0);
        assert_ne!(heap_break(), 0);
    }

    #[cfg(feature = "platform-host")]
    #[test]
    fn live_samples_stay_within_the_resolved_map() {
        let map = MemoryMap::current();
        let stack = StackSample::take(&map);
        let heap = HeapSample::take(&map);
        assert!(stack.pointer != 0);
        assert!(heap.pointer >= map.heap_start);
        assert!(heap.used + heap.available == map.heap_bytes());
    }
}

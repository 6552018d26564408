//! Diagnostic reporting over the `log` facade
//!
//! Formats the resolved region table and live utilization figures to
//! whatever log sink the application installed. The sink is a pure output
//! side channel; nothing here reads back or retries.

use crate::layout::MemoryMap;
use crate::sample::{HeapSample, StackSample};

/// Log one row per present region.
pub fn log_memory_map(map: &MemoryMap) {
    for region in map.regions() {
        log::info!(
            "{:<20} 0x{:08x}..0x{:08x}  {:>12} bytes",
            region.label,
            region.start,
            region.end,
            region.bytes
        );
    }
}

/// Log the current stack and heap utilization.
pub fn log_live_usage(map: &MemoryMap) {
    let stack = StackSample::take(map);
    log::info!(
        "stack: used {} bytes, available {} bytes (sp=0x{:08x})",
        stack.used,
        stack.available,
        stack.pointer
    );
    let heap = HeapSample::take(map);
    log::info!(
        "heap:  used {} bytes, available {} bytes (brk=0x{:08x})",
        heap.used,
        heap.available,
        heap.pointer
    );
}

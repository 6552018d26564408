//! Memory-layout introspection HAL
//!
//! Discovers the address ranges occupied by the program's code, data
//! segments, stack, heap and (on capable boards) external PSRAM, reports
//! live stack/heap utilization, and classifies a named variable, array or
//! function into the region it physically resides in.
//!
//! Platform-specific implementations are selected at compile time via Cargo
//! features (platform-host, platform-teensy40, platform-teensy41). This
//! subsystem only observes memory; it never allocates or manages it.

pub mod layout;
pub mod pool;
pub mod query;
pub mod report;
pub mod sample;

pub use layout::{LinkerMap, MemoryMap, PlatformConstants, Region};
pub use pool::{PoolSource, PoolStats};
pub use query::{
    array_info, classify, element_info, function_info, variable_info, ElementInfo, Location,
    Subject,
};
pub use sample::{
    available_heap_bytes, available_stack_bytes, heap_break, stack_pointer, used_heap_bytes,
    used_stack_bytes, HeapSample, StackSample,
};

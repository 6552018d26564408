//! Sampler stub for unsupported platforms

/// Address of the current top of the call stack (stub: returns 0)
pub fn stack_pointer() -> usize {
    0
}

/// Current heap break pointer (stub: returns 0)
pub fn heap_break() -> usize {
    0
}

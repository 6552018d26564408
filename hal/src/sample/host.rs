//! Host (Linux/glibc) live pointer reads
//!
//! The stack pointer is approximated by the address of a local in the
//! current frame; the heap break comes from `sbrk(0)`.

/// Address of the current top of the call stack.
#[inline(never)]
pub fn stack_pointer() -> usize {
    let marker = 0u8;
    std::hint::black_box(core::ptr::addr_of!(marker)) as usize
}

/// Current heap break pointer.
pub fn heap_break() -> usize {
    unsafe { libc::sbrk(0) as usize }
}

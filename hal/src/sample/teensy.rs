//! Teensy 4.x live pointer reads
//!
//! The stack pointer comes straight from the `sp` register of the current
//! execution frame; the heap break is the Teensy core's `__brkval`, which
//! tracks the end of the space claimed by `malloc`.

use core::arch::asm;

extern "C" {
    static mut __brkval: *mut u8;
}

/// Address of the current top of the call stack.
#[inline(always)]
pub fn stack_pointer() -> usize {
    let sp: usize;
    unsafe {
        asm!("mov {}, sp", out(reg) sp, options(nomem, nostack, preserves_flags));
    }
    sp
}

/// Current heap break pointer.
pub fn heap_break() -> usize {
    unsafe { __brkval as usize }
}

//! Host (Linux/glibc) boundary markers, for development and tests
//!
//! The host has no fixed RAM/flash apertures, so those constants resolve to
//! empty regions at the top of the address space. Segment boundaries come
//! from the classic libc symbols (`etext`, `edata`, `end` and friends), the
//! heap extent from `end` plus the process data rlimit, and the stack top
//! from the first stack-pointer observation. Classification fidelity is
//! only guaranteed for the Teensy address map; the host analog exists so
//! the sampler and query paths can run and be exercised natively.

use std::sync::OnceLock;

use super::{LinkerMap, PlatformConstants};
use crate::sample;

#[allow(non_upper_case_globals)]
extern "C" {
    static __executable_start: libc::c_char;
    static etext: libc::c_char;
    static __data_start: libc::c_char;
    static edata: libc::c_char;
    static __bss_start: libc::c_char;
    static end: libc::c_char;
}

pub fn platform_constants() -> PlatformConstants {
    PlatformConstants {
        ram_start: usize::MAX,
        ram_size: 0,
        flash_start: usize::MAX,
        flash_size: 0,
    }
}

/// The first stack-pointer observation becomes the recorded stack top;
/// samples taken above it clamp to zero used bytes.
fn stack_top() -> usize {
    static TOP: OnceLock<usize> = OnceLock::new();
    *TOP.get_or_init(sample::stack_pointer)
}

fn data_limit() -> usize {
    let mut lim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    let rc = unsafe { libc::getrlimit(libc::RLIMIT_DATA, &mut lim) };
    if rc != 0 || lim.rlim_cur == libc::RLIM_INFINITY {
        usize::MAX
    } else {
        lim.rlim_cur as usize
    }
}

pub fn linker_map() -> LinkerMap {
    let heap_start = unsafe { core::ptr::addr_of!(end) as usize };
    unsafe {
        LinkerMap {
            stext: core::ptr::addr_of!(__executable_start) as usize,
            etext: core::ptr::addr_of!(etext) as usize,
            sdata: core::ptr::addr_of!(__data_start) as usize,
            edata: core::ptr::addr_of!(edata) as usize,
            sbss: core::ptr::addr_of!(__bss_start) as usize,
            ebss: heap_start,
            estack: stack_top(),
            heap_start,
            heap_end: heap_start.saturating_add(data_limit()),
            itcm_blocks: 0,
            extram: None,
        }
    }
}

//! Teensy 4.0 (i.MX RT1062, 2 MiB flash) boundary markers
//!
//! The linker script defines these symbols at segment boundaries; they are
//! zero-length, so only their addresses are meaningful. `_itcm_block_count`
//! encodes the number of 32 KiB FlexRAM blocks given to ITCM in its address.

use super::{LinkerMap, PlatformConstants};

extern "C" {
    static _stext: u8;
    static _etext: u8;
    static _sdata: u8;
    static _edata: u8;
    static _sbss: u8;
    static _ebss: u8;
    static _estack: u8;
    static _heap_start: u8;
    static _heap_end: u8;
    static _itcm_block_count: u8;
}

pub fn platform_constants() -> PlatformConstants {
    PlatformConstants {
        ram_start: 0x2020_0000,
        ram_size: 512 << 10,
        flash_start: 0x6000_0000,
        flash_size: 2 << 20,
    }
}

pub fn linker_map() -> LinkerMap {
    unsafe {
        LinkerMap {
            stext: core::ptr::addr_of!(_stext) as usize,
            etext: core::ptr::addr_of!(_etext) as usize,
            sdata: core::ptr::addr_of!(_sdata) as usize,
            edata: core::ptr::addr_of!(_edata) as usize,
            sbss: core::ptr::addr_of!(_sbss) as usize,
            ebss: core::ptr::addr_of!(_ebss) as usize,
            estack: core::ptr::addr_of!(_estack) as usize,
            heap_start: core::ptr::addr_of!(_heap_start) as usize,
            heap_end: core::ptr::addr_of!(_heap_end) as usize,
            itcm_blocks: core::ptr::addr_of!(_itcm_block_count) as usize,
            extram: None,
        }
    }
}

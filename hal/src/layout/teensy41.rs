//! Teensy 4.1 (i.MX RT1062, 8 MiB flash) boundary markers
//!
//! Same marker set as the 4.0 plus the external PSRAM aperture:
//! `_extram_start`/`_extram_end` bound the statically placed EXTMEM data and
//! `external_psram_size` holds the fitted chip size in MiB, probed by the
//! startup code (zero when no chip is soldered on).

use super::{ExtRamMarkers, LinkerMap, MemoryMap, PlatformConstants};

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
    static _extram_start: u8;
    static _extram_end: u8;
    static external_psram_size: u8;
}

pub fn platform_constants() -> PlatformConstants {
    PlatformConstants {
        ram_start: 0x2020_0000,
        ram_size: 512 << 10,
        flash_start: 0x6000_0000,
        flash_size: 8 << 20,
    }
}

/// Bytes claimed by statically placed EXTMEM variables. Zero when no
/// PSRAM chip is fitted.
pub fn static_psram_used() -> usize {
    MemoryMap::current()
        .extram
        .map(|r| r.static_used())
        .unwrap_or(0)
}

/// Bytes of fitted PSRAM above the statically placed data. Zero when no
/// PSRAM chip is fitted.
pub fn static_psram_available() -> usize {
    MemoryMap::current()
        .extram
        .map(|r| r.static_available())
        .unwrap_or(0)
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
            extram: Some(ExtRamMarkers {
                start: core::ptr::addr_of!(_extram_start) as usize,
                static_top: core::ptr::addr_of!(_extram_end) as usize,
                psram_mib: external_psram_size as usize,
            }),
        }
    }
}

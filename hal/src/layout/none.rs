//! Layout stub for unsupported platforms

use super::{LinkerMap, PlatformConstants};

pub fn platform_constants() -> PlatformConstants {
    PlatformConstants {
        ram_start: 0,
        ram_size: 0,
        flash_start: 0,
        flash_size: 0,
    }
}

pub fn linker_map() -> LinkerMap {
    LinkerMap {
        stext: 0,
        etext: 0,
        sdata: 0,
        edata: 0,
        sbss: 0,
        ebss: 0,
        estack: 0,
        heap_start: 0,
        heap_end: 0,
        itcm_blocks: 0,
        extram: None,
    }
}

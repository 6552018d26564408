//! Memory region boundary resolver
//!
//! Computes the start/end addresses of every named memory region from two
//! inputs: fixed per-board constants (RAM/flash base and size) and the
//! addresses of the zero-length marker symbols the linker places at segment
//! boundaries. The arithmetic lives in [`MemoryMap::from_parts`], which is a
//! pure function of those inputs; reading the live markers is the only
//! platform-specific part, selected at compile time via Cargo features.

// Platform-specific implementations

#[cfg(feature = "platform-teensy41")]
mod teensy41;
#[cfg(feature = "platform-teensy41")]
pub use teensy41::*;

#[cfg(feature = "platform-teensy40")]
mod teensy40;
#[cfg(feature = "platform-teensy40")]
pub use teensy40::*;

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

/// Fixed per-board memory apertures, known at build time.
#[derive(Debug, Clone, Copy)]
pub struct PlatformConstants {
    /// Base address of general RAM (OCRAM/RAM2 on i.MX RT boards).
    pub ram_start: usize,
    /// Size of general RAM in bytes.
    pub ram_size: usize,
    /// Base address of the flash aperture.
    pub flash_start: usize,
    /// Size of flash in bytes.
    pub flash_size: usize,
}

/// Boundary marker addresses supplied by the link step.
///
/// The markers are zero-length symbols; only their addresses carry meaning.
/// On hardware this struct is filled from the linker script's symbols, on
/// the host from the libc `etext`/`edata`/`end` analogs, and in tests it is
/// constructed literally.
#[derive(Debug, Clone, Copy)]
pub struct LinkerMap {
    /// Start of the code segment.
    pub stext: usize,
    /// End of the code segment.
    pub etext: usize,
    /// Start of the initialized-data segment.
    pub sdata: usize,
    /// End of the initialized-data segment.
    pub edata: usize,
    /// Start of the zero-initialized (bss) segment.
    pub sbss: usize,
    /// End of the zero-initialized (bss) segment.
    pub ebss: usize,
    /// Top of the call stack (the stack grows down from here).
    pub estack: usize,
    /// Start of the heap arena.
    pub heap_start: usize,
    /// End of the heap arena.
    pub heap_end: usize,
    /// Number of 32 KiB FlexRAM blocks assigned to ITCM. The linker encodes
    /// the count in a symbol's address; zero means no ITCM on this platform.
    pub itcm_blocks: usize,
    /// External RAM markers, when the board has the aperture at all.
    pub extram: Option<ExtRamMarkers>,
}

/// Raw external RAM markers (Teensy 4.1 PSRAM aperture).
#[derive(Debug, Clone, Copy)]
pub struct ExtRamMarkers {
    /// Base of the external RAM aperture.
    pub start: usize,
    /// End of the statically placed external-RAM data; doubles as the
    /// current static allocation pointer.
    pub static_top: usize,
    /// Fitted PSRAM in MiB, probed at startup. Zero when no chip is fitted.
    pub psram_mib: usize,
}

/// A resolved external RAM region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtRamRegion {
    /// Base of the aperture.
    pub start: usize,
    /// One past the last byte of fitted PSRAM.
    pub end: usize,
    /// One past the last statically placed byte.
    pub static_top: usize,
}

impl ExtRamRegion {
    /// Capacity of the fitted PSRAM in bytes.
    pub fn capacity(&self) -> usize {
        self.end - self.start
    }

    /// Bytes claimed by statically placed external-RAM variables.
    pub fn static_used(&self) -> usize {
        self.static_top - self.start
    }

    /// Bytes left above the statically placed data.
    pub fn static_available(&self) -> usize {
        self.end.saturating_sub(self.static_top)
    }
}

/// One row of the resolved region table.
///
/// Ranges are half-open: `end` is one past the last byte, so `bytes` is
/// always `end - start` and an empty region has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub label: &'static str,
    pub start: usize,
    pub end: usize,
    pub bytes: usize,
}

/// The resolved address map, recomputed from current machine state on every
/// call. All ranges are half-open.
#[derive(Debug, Clone, Copy)]
pub struct MemoryMap {
    pub ram_start: usize,
    pub ram_end: usize,
    pub flash_start: usize,
    pub flash_end: usize,
    pub text_start: usize,
    pub text_end: usize,
    pub data_start: usize,
    pub data_end: usize,
    pub bss_start: usize,
    pub bss_end: usize,
    /// Top of the stack region; the stack grows down from here.
    pub stack_top: usize,
    pub heap_start: usize,
    pub heap_end: usize,
    pub itcm_start: usize,
    pub itcm_end: usize,
    pub dtcm_start: usize,
    pub dtcm_end: usize,
    /// Present only when the board has an external RAM aperture and a chip
    /// is actually fitted.
    pub extram: Option<ExtRamRegion>,
}

impl MemoryMap {
    /// Derive the full region set from platform constants and the linker's
    /// boundary markers. Pure; the sole arithmetic is address subtraction
    /// and the fixed ITCM/PSRAM size shifts.
    pub fn from_parts(consts: &PlatformConstants, markers: &LinkerMap) -> Self {
        let extram = markers.extram.and_then(|m| {
            // An aperture with no chip fitted reports a defined empty
            // state, never garbage bounds.
            if m.psram_mib == 0 {
                None
            } else {
                Some(ExtRamRegion {
                    start: m.start,
                    end: m.start + (m.psram_mib << 20),
                    static_top: m.static_top,
                })
            }
        });

        MemoryMap {
            ram_start: consts.ram_start,
            ram_end: consts.ram_start + consts.ram_size,
            flash_start: consts.flash_start,
            flash_end: consts.flash_start + consts.flash_size,
            text_start: markers.stext,
            text_end: markers.etext,
            data_start: markers.sdata,
            data_end: markers.edata,
            bss_start: markers.sbss,
            bss_end: markers.ebss,
            stack_top: markers.estack,
            heap_start: markers.heap_start,
            heap_end: markers.heap_end,
            // ITCM shares the FlexRAM banks with code; 32 KiB per block.
            itcm_start: markers.stext,
            itcm_end: markers.stext + (markers.itcm_blocks << 15),
            dtcm_start: markers.sdata,
            dtcm_end: markers.estack,
            extram,
        }
    }

    /// Resolve the map from the live platform markers.
    pub fn current() -> Self {
        Self::from_parts(&platform_constants(), &linker_map())
    }

    pub fn ram_bytes(&self) -> usize {
        self.ram_end - self.ram_start
    }

    pub fn flash_bytes(&self) -> usize {
        self.flash_end - self.flash_start
    }

    pub fn code_bytes(&self) -> usize {
        self.text_end - self.text_start
    }

    pub fn data_bytes(&self) -> usize {
        self.data_end - self.data_start
    }

    pub fn bss_bytes(&self) -> usize {
        self.bss_end - self.bss_start
    }

    /// Full extent the stack may grow into, from the end of bss up to the
    /// stack top.
    pub fn stack_bytes(&self) -> usize {
        self.stack_top - self.bss_end
    }

    pub fn heap_bytes(&self) -> usize {
        self.heap_end - self.heap_start
    }

    pub fn itcm_bytes(&self) -> usize {
        self.itcm_end - self.itcm_start
    }

    pub fn dtcm_bytes(&self) -> usize {
        self.dtcm_end - self.dtcm_start
    }

    /// Snapshot of every present region, for reporting. Regions that
    /// resolve to zero bytes on this platform are omitted.
    pub fn regions(&self) -> Vec<Region> {
        let mut rows = vec![
            Region::new("RAM", self.ram_start, self.ram_end),
            Region::new("FLASH", self.flash_start, self.flash_end),
            Region::new("ITCM", self.itcm_start, self.itcm_end),
            Region::new("DTCM", self.dtcm_start, self.dtcm_end),
            Region::new("CODE", self.text_start, self.text_end),
            Region::new("INITIALIZED DATA", self.data_start, self.data_end),
            Region::new("UNINITIALIZED DATA", self.bss_start, self.bss_end),
            Region::new("STACK", self.bss_end, self.stack_top),
            Region::new("HEAP", self.heap_start, self.heap_end),
        ];
        if let Some(extram) = &self.extram {
            rows.push(Region::new("EXTMEM", extram.start, extram.end));
            rows.push(Region::new(
                "EXTMEM (static)",
                extram.start,
                extram.static_top,
            ));
        }
        rows.retain(|r| r.bytes > 0);
        rows
    }
}

impl Region {
    fn new(label: &'static str, start: usize, end: usize) -> Self {
        Region {
            label,
            start,
            end,
            bytes: end - start,
        }
    }
}

#[cfg(test)]
pub(crate) use tests::{test_constants, test_markers};

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_constants() -> PlatformConstants {
        PlatformConstants {
            ram_start: 0x2020_0000,
            ram_size: 512 << 10,
            flash_start: 0x6000_0000,
            flash_size: 8 << 20,
        }
    }

    pub(crate) fn test_markers() -> LinkerMap {
        LinkerMap {
            stext: 0x0000_0040,
            etext: 0x0002_0000,
            sdata: 0x2000_0000,
            edata: 0x2000_8000,
            sbss: 0x2000_8000,
            ebss: 0x2001_0000,
            estack: 0x2008_0000,
            heap_start: 0x2020_4000,
            heap_end: 0x2028_0000,
            itcm_blocks: 4,
            extram: Some(ExtRamMarkers {
                start: 0x7000_0000,
                static_top: 0x7000_2000,
                psram_mib: 8,
            }),
        }
    }

    #[test]
    fn every_present_region_is_well_formed() {
        let map = MemoryMap::from_parts(&test_constants(), &test_markers());
        for region in map.regions() {
            assert!(
                region.start <= region.end,
                "{} has start 0x{:08x} above end 0x{:08x}",
                region.label,
                region.start,
                region.end
            );
            assert_eq!(region.bytes, region.end - region.start);
        }
    }

    #[test]
    fn byte_counts_are_end_minus_start() {
        let map = MemoryMap::from_parts(&test_constants(), &test_markers());
        assert_eq!(map.code_bytes(), 0x0002_0000 - 0x0000_0040);
        assert_eq!(map.data_bytes(), 0x8000);
        assert_eq!(map.bss_bytes(), 0x8000);
        assert_eq!(map.stack_bytes(), 0x2008_0000 - 0x2001_0000);
        assert_eq!(map.heap_bytes(), 0x2028_0000 - 0x2020_4000);
        assert_eq!(map.ram_bytes(), 512 << 10);
        assert_eq!(map.flash_bytes(), 8 << 20);
        assert_eq!(map.itcm_bytes(), 4 << 15);
    }

    #[test]
    fn fitted_psram_resolves_to_its_aperture() {
        let map = MemoryMap::from_parts(&test_constants(), &test_markers());
        let extram = map.extram.expect("psram fitted");
        assert_eq!(extram.start, 0x7000_0000);
        assert_eq!(extram.end, 0x7000_0000 + (8 << 20));
        assert_eq!(extram.capacity(), 8 << 20);
        assert_eq!(extram.static_used(), 0x2000);
        assert_eq!(extram.static_available(), (8 << 20) - 0x2000);
    }

    #[test]
    fn unfitted_psram_reports_empty_not_garbage() {
        let mut markers = test_markers();
        markers.extram = Some(ExtRamMarkers {
            start: 0x7000_0000,
            static_top: 0x7000_0000,
            psram_mib: 0,
        });
        let map = MemoryMap::from_parts(&test_constants(), &markers);
        assert!(map.extram.is_none());
        assert!(map.regions().iter().all(|r| !r.label.starts_with("EXTMEM")));
    }

    #[test]
    fn map_without_aperture_has_no_extram() {
        let mut markers = test_markers();
        markers.extram = None;
        let map = MemoryMap::from_parts(&test_constants(), &markers);
        assert!(map.extram.is_none());
    }
}

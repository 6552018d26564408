//! Address classifier and element query API
//!
//! Given a name and a reference to a variable, array or function, builds an
//! [`ElementInfo`] describing the region the object physically resides in.
//! Classification is a fixed ordered range test, not a sorted-interval
//! search: on the i.MX RT address map code and RAM interleave, so the
//! precedence list below is the correctness mechanism and its fall-through
//! order must not change.

use core::fmt;
use core::mem;

use crate::layout::MemoryMap;

/// The fixed set of region labels an object can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Dynamically allocated external PSRAM.
    ExtMem,
    /// Flash / program storage.
    Flash,
    /// Heap arena in RAM2.
    Heap,
    /// DMAMEM section in RAM2, not initialized at startup.
    DmaMem,
    /// Call stack in RAM1.
    Stack,
    /// Zero-initialized data in DTCM.
    DtcmZeroed,
    /// Initialized data in DTCM.
    DtcmInit,
    /// Code copied from flash into ITCM.
    Itcm,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::ExtMem => "EXTMEM (PSRAM, not initialized)",
            Location::Flash => "FLASH",
            Location::Heap => "HEAP (RAM2)",
            Location::DmaMem => "DMAMEM (RAM2, not initialized)",
            Location::Stack => "STACK (RAM1)",
            Location::DtcmZeroed => "DTCM (RAM1, zeroed)",
            Location::DtcmInit => "DTCM (RAM1, initialized)",
            Location::Itcm => "ITCM (RAM1, copied code from FLASH)",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of object is being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// A single object of the given size.
    Object { size: usize },
    /// A fixed-length array.
    Array { element_size: usize, count: usize },
    /// A function; body extents are not computed, so the size is zero.
    Function,
}

impl Subject {
    pub fn byte_len(&self) -> usize {
        match self {
            Subject::Object { size } => *size,
            Subject::Array {
                element_size,
                count,
            } => element_size * count,
            Subject::Function => 0,
        }
    }
}

/// Classification result for one queried object. Built fresh per query and
/// owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub name: String,
    pub location: Location,
    pub size: usize,
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for ElementInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: 0x{:08x}..0x{:08x} ({} bytes) in {}",
            self.name, self.start, self.end, self.size, self.location
        )
    }
}

/// Classify an address into the region containing it.
///
/// Ordered range test, most specific and highest address first, first match
/// wins; boundaries are inclusive to the higher-precedence region. The
/// order is specific to the i.MX RT1062 address map.
pub fn classify(map: &MemoryMap, address: usize) -> Location {
    if let Some(extram) = &map.extram {
        if address >= extram.start {
            return Location::ExtMem;
        }
    }
    if address >= map.flash_start {
        Location::Flash
    } else if address >= map.heap_start {
        Location::Heap
    } else if address >= map.ram_start {
        Location::DmaMem
    } else if address >= map.stack_top {
        Location::Stack
    } else if address >= map.bss_start {
        Location::DtcmZeroed
    } else if address >= map.data_start {
        Location::DtcmInit
    } else {
        Location::Itcm
    }
}

/// Build the descriptor for an object at `start`. Zero-size subjects
/// classify by start address alone and report `end == start`.
pub fn element_info(map: &MemoryMap, name: &str, start: usize, subject: Subject) -> ElementInfo {
    let size = subject.byte_len();
    let end = if size == 0 { start } else { start + size - 1 };
    ElementInfo {
        name: name.to_string(),
        location: classify(map, start),
        size,
        start,
        end,
    }
}

/// Describe a single variable; the size is the size of its type.
pub fn variable_info<T>(map: &MemoryMap, name: &str, variable: &T) -> ElementInfo {
    element_info(
        map,
        name,
        variable as *const T as usize,
        Subject::Object {
            size: mem::size_of::<T>(),
        },
    )
}

/// Describe a fixed-length array; the size is element size times count.
pub fn array_info<T, const N: usize>(map: &MemoryMap, name: &str, array: &[T; N]) -> ElementInfo {
    element_info(
        map,
        name,
        array.as_ptr() as usize,
        Subject::Array {
            element_size: mem::size_of::<T>(),
            count: N,
        },
    )
}

/// Describe a function by its code address (cast the function to `usize`).
pub fn function_info(map: &MemoryMap, name: &str, address: usize) -> ElementInfo {
    element_info(map, name, address, Subject::Function)
}

/// Describe a variable or array, using the expression itself as the name.
#[macro_export]
macro_rules! probe {
    ($map:expr, $var:expr) => {
        $crate::query::variable_info($map, stringify!($var), &$var)
    };
}

/// Describe a function, using the expression itself as the name.
#[macro_export]
macro_rules! probe_fn {
    ($map:expr, $f:expr) => {
        $crate::query::function_info($map, stringify!($f), $f as usize)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{test_constants, test_markers, MemoryMap};

    fn map() -> MemoryMap {
        MemoryMap::from_parts(&test_constants(), &test_markers())
    }

    #[test]
    fn precedence_order_resolves_each_region() {
        let map = map();
        assert_eq!(classify(&map, 0x9000_0000), Location::ExtMem);
        assert_eq!(classify(&map, 0x6010_0000), Location::Flash);
        assert_eq!(classify(&map, 0x2021_0000), Location::Heap);
        assert_eq!(classify(&map, 0x2020_1000), Location::DmaMem);
        assert_eq!(classify(&map, 0x2010_0000), Location::Stack);
        assert_eq!(classify(&map, 0x2000_9000), Location::DtcmZeroed);
        assert_eq!(classify(&map, 0x2000_0100), Location::DtcmInit);
        assert_eq!(classify(&map, 0x0000_1000), Location::Itcm);
    }

    #[test]
    fn region_start_boundaries_are_inclusive() {
        let map = map();
        assert_eq!(classify(&map, 0x7000_0000), Location::ExtMem);
        assert_eq!(classify(&map, 0x6000_0000), Location::Flash);
        assert_eq!(classify(&map, 0x2020_4000), Location::Heap);
        assert_eq!(classify(&map, 0x2020_0000), Location::DmaMem);
        assert_eq!(classify(&map, 0x2008_0000), Location::Stack);
        assert_eq!(classify(&map, 0x2000_8000), Location::DtcmZeroed);
        assert_eq!(classify(&map, 0x2000_0000), Location::DtcmInit);
    }

    #[test]
    fn absent_external_ram_never_classifies_as_extmem() {
        let mut markers = test_markers();
        markers.extram = None;
        let map = MemoryMap::from_parts(&test_constants(), &markers);
        // The aperture addresses fall through to the flash rule instead.
        assert_eq!(classify(&map, 0x7000_0000), Location::Flash);
        assert_eq!(classify(&map, 0x9000_0000), Location::Flash);
    }

    #[test]
    fn zero_size_subjects_classify_by_start_address_alone() {
        let map = map();
        let info = element_info(&map, "isr", 0x0000_0100, Subject::Function);
        assert_eq!(info.location, Location::Itcm);
        assert_eq!(info.size, 0);
        assert_eq!(info.end, info.start);
    }

    #[test]
    fn array_size_is_element_size_times_count() {
        let map = map();
        let info = element_info(
            &map,
            "samples",
            0x2000_9000,
            Subject::Array {
                element_size: 4,
                count: 25,
            },
        );
        assert_eq!(info.size, 100);
        assert_eq!(info.start, 0x2000_9000);
        assert_eq!(info.end, 0x2000_9000 + 99);
        assert_eq!(info.location, Location::DtcmZeroed);
    }

    #[test]
    fn queries_are_pure_functions_of_address_and_size() {
        let map = map();
        let subject = Subject::Object { size: 8 };
        let first = element_info(&map, "counter", 0x2000_0200, subject);
        let second = element_info(&map, "counter", 0x2000_0200, subject);
        assert_eq!(first, second);
    }

    #[test]
    fn wrappers_report_type_derived_sizes() {
        let map = map();
        let value: u64 = 42;
        let array = [0u32; 25];

        let var = variable_info(&map, "value", &value);
        assert_eq!(var.size, 8);
        assert_eq!(var.start, &value as *const u64 as usize);

        let arr = array_info(&map, "array", &array);
        assert_eq!(arr.size, 100);
        assert_eq!(arr.end, arr.start + 99);

        fn handler() {}
        let func = probe_fn!(&map, handler);
        assert_eq!(func.size, 0);
        assert_eq!(func.name, "handler");
    }
}

//! memprobe - interactive memory layout explorer
//!
//! Resolves the board's memory map, reports live stack/heap utilization,
//! and classifies a handful of demo objects (globals, an array, a heap
//! allocation, a stack local, a function) into the regions they reside in.
//! Portable across the Teensy 4.x targets and native Linux/POSIX hosts;
//! platform selection follows the HAL's Cargo features.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicU32, Ordering};

use hal::layout::MemoryMap;
use hal::query::array_info;
use hal::report;
use hal::sample::{HeapSample, StackSample};
use hal::{probe, probe_fn};

/// Lives in initialized data: carries a nonzero value at startup.
static BOOT_COUNT: AtomicU32 = AtomicU32::new(0x5EED);

/// Lives in zero-initialized data.
static TELEMETRY_RING: [AtomicU32; 64] = {
    const ZERO: AtomicU32 = AtomicU32::new(0);
    [ZERO; 64]
};

/// Run the explorer - portable entry point
pub fn run() -> i32 {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    BOOT_COUNT.fetch_add(1, Ordering::Relaxed);

    let map = MemoryMap::current();
    log::info!("resolved {} memory regions", map.regions().len());

    println!("=== memprobe: memory layout explorer ===");
    print_usage(&map);
    println!("Commands: m=map, u=usage, v=classify demo elements, p=psram pool, q=quit\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut input = String::new();
        if stdin.lock().read_line(&mut input).is_err() {
            break;
        }

        // The map is cheap to recompute, so every command works from a
        // fresh resolution of the current machine state.
        let map = MemoryMap::current();

        match input.trim() {
            "m" => {
                report::log_memory_map(&map);
                print_usage(&map);
            }

            "u" => {
                let stack = StackSample::take(&map);
                let heap = HeapSample::take(&map);
                println!("Stack:");
                println!("  pointer:    0x{:08x}", stack.pointer);
                println!("  used:       {} bytes", stack.used);
                println!("  available:  {} bytes", stack.available);
                println!("Heap:");
                println!("  break:      0x{:08x}", heap.pointer);
                println!("  used:       {} bytes", heap.used);
                println!("  available:  {} bytes", heap.available);
            }

            "v" => {
                classify_demo_elements(&map);
                print_usage(&map);
            }

            #[cfg(feature = "platform-teensy41")]
            "p" => {
                // Walks the pool free list; fine here, but not something
                // to poll from a tight loop.
                let stats = hal::pool::psram_pool_stats();
                println!("PSRAM pool:");
                println!("  total:  {} bytes", stats.total);
                println!("  used:   {} bytes", stats.used);
                println!("  free:   {} bytes", stats.free);
                println!("  blocks: {}", stats.blocks);
            }

            "q" => break,

            "" => {}
            _ => println!("Unknown command. Use 'm', 'u', 'v', 'p', or 'q'"),
        }
    }

    println!("Goodbye!");
    0
}

fn print_usage(map: &MemoryMap) {
    let stack = StackSample::take(map);
    let heap = HeapSample::take(map);
    println!(
        "used stack: {} bytes, used heap: {} bytes",
        stack.used, heap.used
    );
}

fn classify_demo_elements(map: &MemoryMap) {
    let stack_marker: u32 = BOOT_COUNT.load(Ordering::Relaxed);
    let heap_block: Box<[u8; 512]> = Box::new([0u8; 512]);

    println!("{}", probe!(map, BOOT_COUNT));
    println!("{}", array_info(map, "TELEMETRY_RING", &TELEMETRY_RING));
    println!("{}", probe!(map, stack_marker));
    println!("{}", probe!(map, *heap_block));
    println!("{}", probe_fn!(map, run));
}

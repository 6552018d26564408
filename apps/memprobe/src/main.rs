//! memprobe entry point
//!
//! For the host: standard main() function
//! For the MCU toolchain: link against the staticlib and call run()

fn main() {
    std::process::exit(memprobe::run());
}

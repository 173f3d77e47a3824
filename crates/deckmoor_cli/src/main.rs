//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `deckmoor_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("deckmoor_core ping={}", deckmoor_core::ping());
    println!("deckmoor_core version={}", deckmoor_core::core_version());
}

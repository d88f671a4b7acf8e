//! Fuzz target for Wad::from_bytes with arbitrary byte input.
//!
//! This target exercises header and directory parsing with malformed or
//! adversarial input, then writes any accepted archive back out.
//!
//! Run with: cargo +nightly fuzz run wad_open

#![no_main]

use libfuzzer_sys::fuzz_target;
use wadlump::{Wad, WriteOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(mut wad) = Wad::from_bytes(data.to_vec()) else {
        return;
    };

    // Every source byte belongs to at least one region.
    let total: u64 = wad.regions().iter().map(|r| r.size).sum();
    assert!(total >= wad.source_len());

    let _ = wad.resolve_namespaces();
    let mut out = Vec::new();
    let _ = wad.write_to(&mut out, &WriteOptions::new());
});

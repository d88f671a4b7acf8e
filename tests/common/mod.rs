//! Shared test utilities for integration tests.
//!
//! This module provides WAD builders used across multiple test files.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// One piece of a test archive body.
pub enum Part<'a> {
    /// A lump listed in the directory.
    Lump(&'a str, &'a [u8]),
    /// Bytes no directory entry covers.
    Gap(&'a [u8]),
}

/// Builds a WAD whose body holds `parts` in order, followed by the directory.
///
/// Every lump, markers included, gets its real offset, so writing the
/// archive back unchanged reproduces these bytes exactly.
pub fn build_wad_with_parts(magic: &[u8; 4], parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    let mut entries = Vec::new();
    for part in parts {
        match part {
            Part::Lump(name, data) => {
                entries.push((12 + body.len() as i32, data.len() as i32, *name));
                body.extend_from_slice(data);
            }
            Part::Gap(data) => body.extend_from_slice(data),
        }
    }

    let mut wad = magic.to_vec();
    wad.extend_from_slice(&(entries.len() as i32).to_le_bytes());
    wad.extend_from_slice(&(12 + body.len() as i32).to_le_bytes());
    wad.extend_from_slice(&body);
    for (offset, size, name) in entries {
        wad.extend_from_slice(&offset.to_le_bytes());
        wad.extend_from_slice(&size.to_le_bytes());
        let mut raw = [0u8; 8];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        wad.extend_from_slice(&raw);
    }
    wad
}

/// Builds a PWAD holding `lumps` in order.
pub fn build_wad(lumps: &[(&str, &[u8])]) -> Vec<u8> {
    let parts: Vec<_> = lumps.iter().map(|(n, d)| Part::Lump(n, d)).collect();
    build_wad_with_parts(b"PWAD", &parts)
}

/// A small level: marker, map lumps and node-builder output.
pub fn sample_level() -> Vec<u8> {
    build_wad(&[
        ("MAP01", b""),
        ("THINGS", b"things--"),
        ("LINEDEFS", b"linedefs"),
        ("SIDEDEFS", b"sides"),
        ("VERTEXES", b"vx"),
        ("SEGS", b"segs"),
        ("SSECTORS", b"ss"),
        ("NODES", b"nodes"),
        ("SECTORS", b"sectors"),
        ("REJECT", b"r"),
        ("BLOCKMAP", b"bm"),
        ("ENDOOM", b"end"),
    ])
}

/// Writes `data` to a fresh temporary directory and returns the file path.
pub fn write_temp(name: &str, data: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, data).expect("Failed to write archive");
    (temp_dir, path)
}

/// Returns the lump names of `wad` in order.
pub fn lump_names<R>(wad: &wadlump::Wad<R>) -> Vec<String> {
    wad.lumps().map(|r| r.name.clone()).collect()
}

//! Tests for malformed archive and region directory handling.
//!
//! These tests verify that wadlump detects and reports damaged input
//! before building a region model.

mod common;

use std::fs;

use common::build_wad;
use tempfile::TempDir;
use wadlump::{Error, Wad};

fn with_header(count: i32, dir_offset: i32, body: &[u8]) -> Vec<u8> {
    let mut data = b"PWAD".to_vec();
    data.extend_from_slice(&count.to_le_bytes());
    data.extend_from_slice(&dir_offset.to_le_bytes());
    data.extend_from_slice(body);
    data
}

// =============================================================================
// Archive Headers
// =============================================================================

#[test]
fn test_truncated_header() {
    let err = Wad::from_bytes(b"PWAD\x01\x00".to_vec()).unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));
    assert!(err.is_format_error());
}

#[test]
fn test_empty_input() {
    assert!(matches!(
        Wad::from_bytes(Vec::new()),
        Err(Error::MalformedHeader { .. })
    ));
}

#[test]
fn test_unknown_magic() {
    let mut data = build_wad(&[("A", b"a")]);
    data[0..4].copy_from_slice(b"WAD2");
    match Wad::from_bytes(data) {
        Err(Error::UnknownMagic { magic }) => assert_eq!(&magic, b"WAD2"),
        other => panic!("unexpected result: {:?}", other.map(|w| w.len())),
    }
}

#[test]
fn test_negative_count() {
    let err = Wad::from_bytes(with_header(-1, 12, b"")).unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));
}

#[test]
fn test_negative_directory_offset() {
    let err = Wad::from_bytes(with_header(0, -12, b"")).unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));
}

#[test]
fn test_directory_past_end() {
    // One entry claimed, but only 8 bytes follow the header.
    let err = Wad::from_bytes(with_header(1, 12, &[0; 8])).unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));
}

// =============================================================================
// Directory Entries
// =============================================================================

#[test]
fn test_lump_past_end() {
    let mut entry = Vec::new();
    entry.extend_from_slice(&100i32.to_le_bytes());
    entry.extend_from_slice(&50i32.to_le_bytes());
    entry.extend_from_slice(b"BIG\0\0\0\0\0");
    let err = Wad::from_bytes(with_header(1, 12, &entry)).unwrap_err();
    match err {
        Error::OffsetOutOfRange {
            index, name, len, ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(name, "BIG");
            assert_eq!(len, 28);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unnamed_entry_keeps_bytes_as_gap() {
    let mut body = b"data".to_vec();
    body.extend_from_slice(&12i32.to_le_bytes());
    body.extend_from_slice(&4i32.to_le_bytes());
    body.extend_from_slice(&[0; 8]);
    let wad = Wad::from_bytes(with_header(1, 16, &body)).unwrap();
    assert_eq!(wad.lump_count(), 0);
    assert!(wad.regions().iter().any(|r| r.label() == "notindir" && r.size == 4));
}

// =============================================================================
// Region Directories
// =============================================================================

#[test]
fn test_region_directory_with_hole() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("0-header"), b"PWAD\0\0\0\0\0\0\0\0").unwrap();
    fs::write(temp.path().join("2-things"), b"t").unwrap();
    let err = Wad::open_path(temp.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidRegionFile { .. }));
    assert!(err.is_format_error());
}

#[test]
fn test_region_directory_with_foreign_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("0-things"), b"t").unwrap();
    fs::write(temp.path().join("readme.txt"), b"hi").unwrap();
    assert!(matches!(
        Wad::open_path(temp.path()),
        Err(Error::InvalidRegionFile { .. })
    ));
}

#[test]
fn test_region_directory_with_bad_header() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("0-header"), b"ZZZZ\0\0\0\0\0\0\0\0").unwrap();
    assert!(matches!(
        Wad::open_path(temp.path()),
        Err(Error::UnknownMagic { .. })
    ));
}

#[test]
fn test_missing_source_path() {
    let temp = TempDir::new().unwrap();
    let err = Wad::open_path(temp.path().join("absent.wad")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

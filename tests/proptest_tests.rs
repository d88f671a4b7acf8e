//! Property-based tests using proptest.
//!
//! These tests verify round-trip and editing invariants of the wadlump
//! library using randomly generated archives.

mod common;

use common::{Part, build_wad_with_parts};
use proptest::prelude::*;
use tempfile::TempDir;
use wadlump::{EditableWad, Wad, WriteOptions};

/// Labels that a region directory reads back as non-lump regions.
const RESERVED: &[&str] = &["HEADER", "DIR", "NOTINDIR"];

/// Strategy for lump names accepted by the directory: 1-8 upper-case
/// characters, never a reserved region label.
fn lump_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{0,7}".prop_filter("must not be a region label", |name| {
        !RESERVED.contains(&name.as_str())
    })
}

/// Strategy for archive bodies: lumps with the occasional unindexed gap.
fn parts_strategy() -> impl Strategy<Value = Vec<(Option<String>, Vec<u8>)>> {
    proptest::collection::vec(
        (
            proptest::option::weighted(0.85, lump_name_strategy()),
            proptest::collection::vec(any::<u8>(), 0..32),
        ),
        0..12,
    )
    .prop_map(|parts| {
        // Gaps must hold at least one byte to be seen as gaps.
        parts
            .into_iter()
            .filter(|(name, data)| name.is_some() || !data.is_empty())
            .collect()
    })
}

fn build(parts: &[(Option<String>, Vec<u8>)], magic: &[u8; 4]) -> Vec<u8> {
    let parts: Vec<Part<'_>> = parts
        .iter()
        .map(|(name, data)| match name {
            Some(name) => Part::Lump(name, data),
            None => Part::Gap(data),
        })
        .collect();
    build_wad_with_parts(magic, &parts)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Writing an unchanged archive reproduces it.
    #[test]
    fn archive_round_trip(parts in parts_strategy(), iwad in any::<bool>()) {
        let data = build(&parts, if iwad { b"IWAD" } else { b"PWAD" });
        let mut wad = Wad::from_bytes(data.clone()).unwrap();
        let mut out = Vec::new();
        wad.write_to(&mut out, &WriteOptions::new()).unwrap();
        prop_assert_eq!(out, data);
    }

    /// Archive to region directory to archive reproduces the original bytes.
    #[test]
    fn directory_round_trip(parts in parts_strategy()) {
        let data = build(&parts, b"PWAD");
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("regions");

        let mut wad = Wad::from_bytes(data.clone()).unwrap();
        wad.write_dir(&dir, &WriteOptions::new()).unwrap();

        let mut reread = Wad::open_path(&dir).unwrap();
        prop_assert_eq!(reread.len(), wad.len());
        let mut out = Vec::new();
        reread.write_to(&mut out, &WriteOptions::new()).unwrap();
        prop_assert_eq!(out, data);
    }

    /// Deleting a name removes exactly the lumps with that name.
    #[test]
    fn delete_removes_matching_lumps(parts in parts_strategy(), pick in any::<prop::sample::Index>()) {
        let data = build(&parts, b"PWAD");
        let mut wad = Wad::from_bytes(data).unwrap();
        let names: Vec<String> = wad.lumps().map(|r| r.name.clone()).collect();
        prop_assume!(!names.is_empty());
        let target = names[pick.index(names.len())].clone();
        let expected: Vec<_> = names.iter().filter(|n| **n != target).cloned().collect();

        let mut editor = wad.edit();
        editor.delete(&target).unwrap();
        let result = editor.apply().unwrap();

        prop_assert_eq!(result.regions_deleted, names.len() - expected.len());
        prop_assert_eq!(common::lump_names(&wad), expected);
    }

    /// Arbitrary input is rejected with an error, never a panic.
    #[test]
    fn arbitrary_bytes_do_not_panic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = Wad::from_bytes(data);
    }
}

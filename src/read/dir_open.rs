//! Region directory opening.
//!
//! A region directory holds one `NN-label` file per region. Ordinals run
//! from zero without holes and share one zero-padded width; namespace
//! subdirectories are walked recursively and their relative path becomes
//! the namespace of the regions inside.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::format::WadKind;
use crate::{Error, Result};

use super::{Payload, Region, RegionKind, Wad};

/// A region file found while walking the directory.
#[derive(Debug)]
struct RegionFile {
    ordinal: usize,
    digits: usize,
    label: String,
    namespace: Vec<String>,
    path: PathBuf,
    size: u64,
}

impl Wad<BufReader<File>> {
    /// Opens a region directory written by [`Wad::write_dir`](crate::Wad::write_dir).
    ///
    /// Region files stay on disk until their payload is needed.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRegionFile`] if a file name does not follow the
    ///   `NN-label` convention, widths differ, or ordinals are not contiguous
    /// - [`Error::UnknownMagic`] if the header file has an unknown magic
    pub fn open_dir(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref();
        let mut files = collect_region_files(root)?;
        files.sort_by_key(|f| f.ordinal);
        check_ordinals(&files)?;

        let mut kind = None;
        let mut regions = Vec::with_capacity(files.len());
        let mut offset = 0;
        for (index, file) in files.into_iter().enumerate() {
            let region_kind = RegionKind::from_label(&file.label).unwrap_or(RegionKind::Lump);
            if region_kind == RegionKind::Header {
                if kind.is_some() {
                    return Err(Error::invalid_region_file(&file.path, "second header file"));
                }
                kind = Some(read_magic(&file.path)?);
            }

            let name = if region_kind == RegionKind::Lump {
                file.label
            } else {
                String::new()
            };
            regions.push(Region {
                kind: region_kind,
                name,
                offset,
                size: file.size,
                index,
                namespace: file.namespace,
                payload: Payload::File(file.path),
            });
            offset += file.size;
        }

        log::debug!(
            "Read {} region files from {} ({} bytes)",
            regions.len(),
            root.display(),
            offset
        );

        Ok(Self {
            reader: None,
            kind,
            regions,
            source_len: offset,
        })
    }
}

fn collect_region_files(root: &Path) -> Result<Vec<RegionFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if !file_type.is_file() {
            log::warn!("Ignoring non-file '{}'", entry.path().display());
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let (number, label) = split_region_name(&file_name).ok_or_else(|| {
            Error::invalid_region_file(entry.path(), "expected a name of the form NN-label")
        })?;
        let ordinal = number
            .parse::<usize>()
            .map_err(|e| Error::invalid_region_file(entry.path(), format!("bad ordinal: {e}")))?;

        let namespace = entry
            .path()
            .strip_prefix(root)
            .ok()
            .and_then(Path::parent)
            .map(|parent| {
                parent
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        files.push(RegionFile {
            ordinal,
            digits: number.len(),
            label: label.to_string(),
            namespace,
            path: entry.path().to_path_buf(),
            size: entry.metadata().map_err(|e| Error::Io(e.into()))?.len(),
        });
    }
    Ok(files)
}

/// Splits `NN-label` into its ordinal digits and label.
pub(crate) fn split_region_name(file_name: &str) -> Option<(&str, &str)> {
    let (number, label) = file_name.split_once('-')?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) || label.is_empty() {
        return None;
    }
    Some((number, label))
}

/// Checks that ordinals are `0..n` and share one width. `files` must be sorted.
fn check_ordinals(files: &[RegionFile]) -> Result<()> {
    let Some(first) = files.first() else {
        return Ok(());
    };
    for (expected, file) in files.iter().enumerate() {
        if file.digits != first.digits {
            return Err(Error::invalid_region_file(
                &file.path,
                format!("prefix has {} digits instead of {}", file.digits, first.digits),
            ));
        }
        if file.ordinal != expected {
            let reason = if file.ordinal < expected {
                format!("ordinal {} is used twice", file.ordinal)
            } else {
                format!("ordinal {} is missing", expected)
            };
            return Err(Error::invalid_region_file(&file.path, reason));
        }
    }
    Ok(())
}

fn read_magic(path: &Path) -> Result<WadKind> {
    let mut magic = [0u8; 4];
    File::open(path)?
        .read_exact(&mut magic)
        .map_err(|_| Error::invalid_region_file(path, "header file is shorter than the magic"))?;
    WadKind::from_magic(magic).ok_or(Error::UnknownMagic { magic })
}

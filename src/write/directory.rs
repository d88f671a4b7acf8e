//! Region directory output.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::Path;

use walkdir::WalkDir;

use crate::read::split_region_name;
use crate::{Error, Result};

use super::archive::write_slot;
use super::layout::Layout;

/// Writes one file per planned region below `root` and returns the file count.
///
/// An existing `root` must be a directory; its region files are removed
/// first. Other files are left alone.
pub(crate) fn write_dir<R: Read + Seek>(
    layout: &Layout<'_>,
    reader: &mut Option<R>,
    root: &Path,
) -> Result<usize> {
    if root.exists() {
        if !root.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{}' exists and is not a directory", root.display()),
            )));
        }
        remove_region_files(root)?;
    }
    fs::create_dir_all(root)?;

    let mut count = 0;
    for file in layout.files() {
        let path = root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(&path)?);
        write_slot(layout, &file.slot, reader, &mut out)?;
        out.flush()?;
        count += 1;
    }

    log::debug!("Wrote {} region files to {}", count, root.display());
    Ok(count)
}

/// Removes `NN-label` files below `root` and any directory left empty.
fn remove_region_files(root: &Path) -> Result<()> {
    let mut removed = 0;
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_dir() {
            if fs::read_dir(entry.path())?.next().is_none() {
                fs::remove_dir(entry.path())?;
            }
        } else if split_region_name(&entry.file_name().to_string_lossy()).is_some() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    log::debug!("Removed {} stale region files from {}", removed, root.display());
    Ok(())
}

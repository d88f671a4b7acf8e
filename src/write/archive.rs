//! Archive output.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::read::{Payload, read_payload};
use crate::{Error, Result};

use super::layout::{Content, Layout, Slot};

/// Writes one slot of the plan.
pub(crate) fn write_slot<R: Read + Seek, W: Write>(
    layout: &Layout<'_>,
    slot: &Slot<'_>,
    reader: &mut Option<R>,
    out: &mut W,
) -> Result<()> {
    match slot.content {
        Content::Header => out.write_all(layout.header_bytes())?,
        Content::Directory => out.write_all(layout.directory_bytes())?,
        Content::Region(region) => {
            let data = read_payload(reader, region.payload())?;
            if data.len() as u64 != slot.size {
                let reason = format!(
                    "region '{}' is {} bytes, expected {}",
                    region.label(),
                    data.len(),
                    slot.size
                );
                return Err(match region.payload() {
                    Payload::File(path) => Error::invalid_region_file(path, reason),
                    _ => Error::Io(io::Error::new(io::ErrorKind::InvalidData, reason)),
                });
            }
            out.write_all(&data)?;
        }
    }
    Ok(())
}

/// Writes every slot of the plan and returns the number of bytes written.
pub(crate) fn write_slots<R: Read + Seek, W: Write>(
    layout: &Layout<'_>,
    reader: &mut Option<R>,
    out: &mut W,
) -> Result<u64> {
    for slot in layout.slots() {
        write_slot(layout, &slot, reader, out)?;
    }
    Ok(layout.len())
}

/// Writes the archive to a sibling temporary file, then renames it over `path`.
///
/// The temporary file is removed if writing fails.
pub(crate) fn write_archive<R: Read + Seek>(
    layout: &Layout<'_>,
    reader: &mut Option<R>,
    path: &Path,
) -> Result<u64> {
    let temp_path = temp_path(path);
    match write_file(layout, reader, &temp_path) {
        Ok(len) => {
            fs::rename(&temp_path, path).map_err(Error::Io)?;
            log::debug!("Wrote archive {} ({} bytes)", path.display(), len);
            Ok(len)
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                log::debug!("Could not remove {}: {}", temp_path.display(), cleanup);
            }
            Err(e)
        }
    }
}

fn write_file<R: Read + Seek>(layout: &Layout<'_>, reader: &mut Option<R>, path: &Path) -> Result<u64> {
    let file = File::create(path).map_err(Error::Io)?;
    let mut out = BufWriter::new(file);
    let len = write_slots(layout, reader, &mut out)?;
    let file = out.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(len)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("wad"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::WadKind;
    use crate::read::Region;
    use crate::write::WriteOptions;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(temp_path(Path::new("out/doom2.wad")), PathBuf::from("out/doom2.wad.tmp"));
    }

    #[test]
    fn test_write_archive_replaces_atomically() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.wad");
        fs::write(&path, b"old").unwrap();

        let regions = vec![Region::lump("DEMO1", b"abc".to_vec())];
        let layout = Layout::plan(&regions, Some(WadKind::Pwad), WriteOptions::new()).unwrap();
        let mut reader: Option<Cursor<Vec<u8>>> = None;
        let len = write_archive(&layout, &mut reader, &path).unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(len, data.len() as u64);
        assert_eq!(&data[0..4], b"PWAD");
        assert_eq!(&data[12..15], b"abc");
        assert!(!temp_path(&path).exists());
    }
}

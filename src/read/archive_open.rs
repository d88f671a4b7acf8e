//! Archive opening methods.
//!
//! This module parses a WAD byte stream into regions. Lumps keep the order
//! of the directory table; the header, the directory table and every byte
//! range no entry covers are slotted in by offset.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use crate::format::{DirEntry, HEADER_SIZE, Header};
use crate::{Error, Result};

use super::{Region, RegionKind, Wad};

impl Wad<BufReader<File>> {
    /// Opens an archive file or a region directory.
    ///
    /// Directories are read with [`Wad::open_dir`]; anything else is parsed
    /// as an archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be read or does not hold a valid
    /// archive or region directory.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::open_dir(path);
        }

        let file = File::open(path).map_err(Error::Io)?;
        Self::open(BufReader::new(file))
    }
}

impl Wad<Cursor<Vec<u8>>> {
    /// Opens an archive held in memory.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::open(Cursor::new(data.into()))
    }
}

impl<R: Read + Seek> Wad<R> {
    /// Opens an archive from a seekable reader.
    ///
    /// The reader is kept open; lump payloads are read from it on demand.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedHeader`] if the header or directory is inconsistent
    /// - [`Error::UnknownMagic`] if the input is not an IWAD or PWAD
    /// - [`Error::OffsetOutOfRange`] if a lump extends past the end
    pub fn open(mut reader: R) -> Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = Header::parse(&mut reader, len)?;
        let lumps = read_directory(&mut reader, &header, len)?;
        let regions = build_regions(&header, lumps, len);

        log::debug!(
            "Read {} with {} regions ({} directory entries, {} bytes)",
            header.kind,
            regions.len(),
            header.lump_count,
            len
        );

        Ok(Self {
            reader: Some(reader),
            kind: Some(header.kind),
            regions,
            source_len: len,
        })
    }
}

/// Reads the directory table and returns the named entries as lump regions.
fn read_directory<R: Read + Seek>(reader: &mut R, header: &Header, len: u64) -> Result<Vec<Region>> {
    reader.seek(SeekFrom::Start(header.dir_offset))?;
    let mut table = vec![0u8; header.dir_size() as usize];
    reader.read_exact(&mut table)?;
    let mut table = Cursor::new(table);

    let mut lumps = Vec::with_capacity(header.lump_count as usize);
    // Zero-offset entries (usually markers) are placed where the previous entry ends.
    let mut current = HEADER_SIZE;
    for index in 0..header.lump_count as usize {
        let entry = DirEntry::parse(&mut table)?;

        if entry.name.is_empty() {
            if entry.offset != 0 || entry.size != 0 {
                log::warn!(
                    "Directory entry {} has no name but offset {:#x} and size {}; keeping its bytes unindexed",
                    index,
                    entry.offset,
                    entry.size
                );
            }
            continue;
        }

        let offset = if entry.offset == 0 {
            current
        } else {
            entry.offset
        };
        if offset + entry.size > len {
            return Err(Error::OffsetOutOfRange {
                index,
                name: entry.name,
                offset,
                size: entry.size,
                len,
            });
        }

        lumps.push(Region::from_source(RegionKind::Lump, entry.name, offset, entry.size));
        current = offset + entry.size;
    }

    Ok(lumps)
}

/// Interleaves lumps (in directory order) with the header, the directory
/// table and the gap regions (by offset), then numbers them.
fn build_regions(header: &Header, lumps: Vec<Region>, len: u64) -> Vec<Region> {
    let mut fixed = vec![
        Region::from_source(RegionKind::Header, String::new(), 0, HEADER_SIZE),
        Region::from_source(
            RegionKind::Directory,
            String::new(),
            header.dir_offset,
            header.dir_size(),
        ),
    ];
    fixed.extend(find_gaps(&fixed, &lumps, len));
    fixed.sort_by_key(|r| (r.offset, r.kind != RegionKind::Header));

    let mut fixed = fixed.into_iter().peekable();
    let mut regions = Vec::with_capacity(lumps.len() + 3);

    // The header always leads.
    if let Some(first) = fixed.next() {
        regions.push(first);
    }
    for lump in lumps {
        while let Some(next) = fixed.next_if(|r| r.offset < lump.offset) {
            regions.push(next);
        }
        regions.push(lump);
    }
    regions.extend(fixed);

    for (index, region) in regions.iter_mut().enumerate() {
        region.index = index;
    }
    regions
}

/// Returns a gap region for every byte range nothing else covers.
fn find_gaps(fixed: &[Region], lumps: &[Region], len: u64) -> Vec<Region> {
    let mut covered: Vec<(u64, u64)> = fixed
        .iter()
        .chain(lumps)
        .filter(|r| r.size > 0)
        .map(|r| (r.offset, r.offset + r.size))
        .collect();
    covered.sort_unstable();

    let mut gaps = Vec::new();
    let mut cursor = 0;
    for (start, end) in covered {
        if start > cursor {
            gaps.push(Region::from_source(RegionKind::Gap, String::new(), cursor, start - cursor));
        }
        cursor = cursor.max(end);
    }
    if len > cursor {
        gaps.push(Region::from_source(RegionKind::Gap, String::new(), cursor, len - cursor));
    }
    gaps
}

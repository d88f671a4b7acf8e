//! Reading WAD archives and region directories.
//!
//! A [`Wad`] is an ordered list of [`Region`]s: the header, every lump, the
//! directory table, and any unindexed bytes in between. It can be opened
//! from an archive file or from a directory previously written by
//! [`Wad::write_dir`](crate::Wad::write_dir).
//!
//! # Example
//!
//! ```rust,ignore
//! use wadlump::Wad;
//!
//! let mut wad = Wad::open_path("doom2.wad")?;
//! for region in wad.regions() {
//!     println!("{:>10} {:>8} {}", region.offset, region.size, region.label());
//! }
//! let things = wad.read_region(1)?;
//! ```

mod archive_open;
mod dir_open;
mod region;

pub(crate) use dir_open::split_region_name;
pub use region::{DIRECTORY_LABEL, GAP_LABEL, HEADER_LABEL, Payload, Region, RegionKind};

use std::borrow::Cow;
use std::io::{Read, Seek, SeekFrom};

use crate::format::WadKind;
use crate::{Error, Result, namespace};

/// An archive modelled as an ordered sequence of regions.
///
/// Payloads are read lazily from `R` (or from region files) until a region
/// is replaced, added, or written.
#[derive(Debug)]
pub struct Wad<R> {
    pub(crate) reader: Option<R>,
    pub(crate) kind: Option<WadKind>,
    pub(crate) regions: Vec<Region>,
    pub(crate) source_len: u64,
}

impl<R> Wad<R> {
    /// Returns the archive kind, if the source recorded one.
    ///
    /// A region directory without a header file has no kind; writers then
    /// default to [`WadKind::Pwad`].
    pub fn kind(&self) -> Option<WadKind> {
        self.kind
    }

    /// Returns all regions in order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Returns the lump regions in order.
    pub fn lumps(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.is_lump())
    }

    /// Returns the number of lump regions.
    pub fn lump_count(&self) -> usize {
        self.lumps().count()
    }

    /// Returns the number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the total size of the source in bytes.
    pub fn source_len(&self) -> u64 {
        self.source_len
    }

    /// Returns the first lump with the given name (ASCII case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Region> {
        self.lumps().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Annotates every lump with the namespace its markers place it in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnterminatedNamespace`] if the markers do not balance.
    pub fn resolve_namespaces(&mut self) -> Result<()> {
        namespace::resolve(&mut self.regions)
    }
}

impl<R: Read + Seek> Wad<R> {
    /// Reads the payload of the region at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn read_region(&mut self, index: usize) -> Result<Cow<'_, [u8]>> {
        read_payload(&mut self.reader, &self.regions[index].payload)
    }

    /// Loads every payload that lives in a region file into memory.
    ///
    /// This is required before a directory source is rewritten in place.
    pub fn materialize_files(&mut self) -> Result<()> {
        for region in &mut self.regions {
            if let Payload::File(path) = &region.payload {
                let data = std::fs::read(path)?;
                region.set_payload(data);
            }
        }
        Ok(())
    }
}

pub(crate) fn read_payload<'a, R: Read + Seek>(
    reader: &mut Option<R>,
    payload: &'a Payload,
) -> Result<Cow<'a, [u8]>> {
    match payload {
        Payload::Owned(data) => Ok(Cow::Borrowed(data)),
        Payload::File(path) => Ok(Cow::Owned(std::fs::read(path)?)),
        Payload::Source { offset, len } => {
            let reader = reader
                .as_mut()
                .ok_or_else(|| Error::Io(std::io::Error::other("region source is not open")))?;
            let len = usize::try_from(*len)
                .map_err(|_| Error::Io(std::io::Error::other("region too large for memory")))?;
            let mut data = vec![0u8; len];
            reader.seek(SeekFrom::Start(*offset))?;
            reader.read_exact(&mut data)?;
            Ok(Cow::Owned(data))
        }
    }
}

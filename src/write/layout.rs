//! Output layout planning.
//!
//! Both back-ends serialize the same [`Layout`]: a regenerated header, the
//! surviving gap and lump regions, and a regenerated directory table. A
//! region directory is the same byte stream cut at region boundaries, so
//! concatenating its files in ordinal order yields the archive output.

use std::path::PathBuf;

use crate::format::{DirEntry, HEADER_SIZE, Header, WadKind};
use crate::read::{DIRECTORY_LABEL, HEADER_LABEL, Region, RegionKind};
use crate::{Error, Result};

use super::WriteOptions;

/// Characters a region file name cannot hold. Sprite names such as `VILE\1`
/// are valid file names everywhere but Windows.
#[cfg(not(windows))]
const FORBIDDEN_IN_FILE_NAMES: [char; 2] = ['/', '\0'];
#[cfg(windows)]
const FORBIDDEN_IN_FILE_NAMES: [char; 3] = ['/', '\\', '\0'];

/// What a planned slot holds.
#[derive(Debug, Clone, Copy)]
pub enum Content<'a> {
    /// The regenerated header.
    Header,
    /// A gap or lump carried over from the model.
    Region(&'a Region),
    /// The regenerated directory table.
    Directory,
}

/// One contiguous piece of the output.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    /// What the slot holds.
    pub content: Content<'a>,
    /// Byte offset in the output.
    pub offset: u64,
    /// Size in bytes.
    pub size: u64,
}

impl Slot<'_> {
    /// Returns the region kind of the slot.
    pub fn kind(&self) -> RegionKind {
        match self.content {
            Content::Header => RegionKind::Header,
            Content::Region(region) => region.kind,
            Content::Directory => RegionKind::Directory,
        }
    }
}

/// A region file of the output, relative to the destination directory.
#[derive(Debug, Clone)]
pub struct PlannedFile<'a> {
    /// Relative path of the file.
    pub path: PathBuf,
    /// The slot written to it.
    pub slot: Slot<'a>,
}

/// The serialization plan for a region sequence.
#[derive(Debug)]
pub struct Layout<'a> {
    header: Header,
    header_bytes: [u8; 12],
    directory: Vec<u8>,
    body: Vec<(&'a Region, u64)>,
    options: WriteOptions,
}

impl<'a> Layout<'a> {
    /// Plans the output for `regions`.
    ///
    /// Header and directory regions of the model are dropped and rebuilt.
    /// Lumps with an empty name keep their bytes but get no directory entry.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLumpName`] if a lump name does not fit a directory entry
    /// - [`Error::MalformedHeader`] if the output exceeds the 32-bit offsets of the format
    pub fn plan(regions: &'a [Region], kind: Option<WadKind>, options: WriteOptions) -> Result<Self> {
        let mut kept: Vec<&Region> = regions
            .iter()
            .filter(|r| matches!(r.kind, RegionKind::Lump | RegionKind::Gap))
            .collect();
        if options.offset_order {
            kept.sort_by_key(|r| r.offset);
        }

        let mut body = Vec::with_capacity(kept.len());
        let mut entries = Vec::new();
        let mut offset = HEADER_SIZE;
        for region in kept {
            if region.is_lump() && !region.name.is_empty() {
                let name = if options.preserve_case {
                    region.name.clone()
                } else {
                    region.name.to_ascii_uppercase()
                };
                entries.push(DirEntry {
                    offset,
                    size: region.size,
                    name,
                });
            }
            body.push((region, offset));
            offset += region.size;
        }

        let header = Header {
            kind: kind.unwrap_or_default(),
            lump_count: entries.len() as u64,
            dir_offset: offset,
        };
        let header_bytes = header.to_bytes()?;
        let mut directory = Vec::with_capacity(entries.len() * 16);
        for entry in &entries {
            entry.write(&mut directory)?;
        }

        Ok(Self {
            header,
            header_bytes,
            directory,
            body,
            options,
        })
    }

    /// Returns the regenerated header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the serialized header.
    pub fn header_bytes(&self) -> &[u8; 12] {
        &self.header_bytes
    }

    /// Returns the serialized directory table.
    pub fn directory_bytes(&self) -> &[u8] {
        &self.directory
    }

    /// Returns the total output size in bytes.
    pub fn len(&self) -> u64 {
        self.header.dir_offset + self.directory.len() as u64
    }

    /// Returns `true` if the plan holds nothing but a header and an empty
    /// directory.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns every slot of the output in order.
    pub fn slots(&self) -> impl Iterator<Item = Slot<'a>> + '_ {
        let header = Slot {
            content: Content::Header,
            offset: 0,
            size: HEADER_SIZE,
        };
        let directory = Slot {
            content: Content::Directory,
            offset: self.header.dir_offset,
            size: self.directory.len() as u64,
        };
        let body = self.body.iter().map(|&(region, offset)| Slot {
            content: Content::Region(region),
            offset,
            size: region.size,
        });
        std::iter::once(header).chain(body).chain(std::iter::once(directory))
    }

    /// Returns the number of region files a directory output holds.
    pub fn file_count(&self) -> usize {
        if self.options.lumps_only {
            self.body.iter().filter(|(r, _)| r.is_lump()).count()
        } else {
            self.body.len() + 2
        }
    }

    /// Returns the region files of a directory output, in ordinal order.
    ///
    /// The iterator has no side effects and can be restarted by calling
    /// this method again.
    pub fn files(&self) -> impl Iterator<Item = PlannedFile<'a>> + '_ {
        let digits = self.file_count().saturating_sub(1).to_string().len();
        let lumps_only = self.options.lumps_only;
        self.slots()
            .filter(move |slot| !lumps_only || slot.kind() == RegionKind::Lump)
            .enumerate()
            .map(move |(ordinal, slot)| PlannedFile {
                path: self.file_path(ordinal, digits, &slot),
                slot,
            })
    }

    fn file_path(&self, ordinal: usize, digits: usize, slot: &Slot<'_>) -> PathBuf {
        let fold = |s: &str| {
            if self.options.preserve_case {
                s.to_string()
            } else {
                s.to_ascii_lowercase()
            }
        };

        let (label, namespace): (&str, &[String]) = match slot.content {
            Content::Header => (HEADER_LABEL, &[]),
            Content::Directory => (DIRECTORY_LABEL, &[]),
            Content::Region(region) => (region.label(), region.namespace.as_slice()),
        };

        let mut path = PathBuf::new();
        if self.options.namespaces {
            for segment in namespace {
                path.push(fold(segment));
            }
        }
        path.push(format!("{:0width$}-{}", ordinal, fold(label), width = digits));
        path
    }

    /// Checks that every region file name is a single, plain path component.
    pub(crate) fn validate_file_names(&self) -> Result<()> {
        for slot in self.slots() {
            let Content::Region(region) = slot.content else {
                continue;
            };
            let mut parts = vec![region.label()];
            if self.options.namespaces {
                parts.extend(region.namespace.iter().map(String::as_str));
            }
            for part in parts {
                if part.is_empty() || part == "." || part == ".." || part.contains(FORBIDDEN_IN_FILE_NAMES) {
                    return Err(Error::InvalidLumpName {
                        name: part.to_string(),
                        reason: "cannot be used as a region file name".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

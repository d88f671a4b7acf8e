//! Region records.

use std::path::PathBuf;

/// Label of the header region in region-file names.
pub const HEADER_LABEL: &str = "header";
/// Label of the directory-table region in region-file names.
pub const DIRECTORY_LABEL: &str = "dir";
/// Label of unindexed gap regions in region-file names and change targets.
pub const GAP_LABEL: &str = "notindir";

/// What a region holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The 12-byte archive header.
    Header,
    /// The directory table.
    Directory,
    /// Bytes not referenced by any directory entry.
    Gap,
    /// A lump listed in the directory.
    Lump,
}

impl RegionKind {
    /// Returns the fixed label of a non-lump kind, or `None` for lumps.
    pub fn label(self) -> Option<&'static str> {
        match self {
            RegionKind::Header => Some(HEADER_LABEL),
            RegionKind::Directory => Some(DIRECTORY_LABEL),
            RegionKind::Gap => Some(GAP_LABEL),
            RegionKind::Lump => None,
        }
    }

    /// Recovers a non-lump kind from a region-file label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            HEADER_LABEL => Some(RegionKind::Header),
            DIRECTORY_LABEL => Some(RegionKind::Directory),
            GAP_LABEL => Some(RegionKind::Gap),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionKind::Header => write!(f, "header"),
            RegionKind::Directory => write!(f, "directory"),
            RegionKind::Gap => write!(f, "gap"),
            RegionKind::Lump => write!(f, "lump"),
        }
    }
}

/// Where the bytes of a region live.
///
/// Payloads stay references into the source until a region is replaced,
/// added, or explicitly materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A byte range of the open source archive.
    Source {
        /// Offset in the source.
        offset: u64,
        /// Number of bytes.
        len: u64,
    },
    /// A region file of a directory source.
    File(PathBuf),
    /// Bytes owned by the region.
    Owned(Vec<u8>),
}

/// One contiguous byte range of an archive, lump or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// What the region holds.
    pub kind: RegionKind,
    /// Lump name as stored; empty for non-lump regions.
    pub name: String,
    /// Byte offset in the source. Added regions sit at the source length.
    pub offset: u64,
    /// Payload size in bytes.
    pub size: u64,
    /// Position in read order.
    pub index: usize,
    /// Namespace path, outermost first.
    pub namespace: Vec<String>,
    pub(crate) payload: Payload,
}

impl Region {
    /// Creates a lump region that owns its payload.
    pub fn lump(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind: RegionKind::Lump,
            name: name.into(),
            offset: 0,
            size: data.len() as u64,
            index: 0,
            namespace: Vec::new(),
            payload: Payload::Owned(data),
        }
    }

    pub(crate) fn from_source(kind: RegionKind, name: String, offset: u64, size: u64) -> Self {
        Self {
            kind,
            name,
            offset,
            size,
            index: 0,
            namespace: Vec::new(),
            payload: Payload::Source { offset, len: size },
        }
    }

    /// Returns `true` if the region is listed in the directory.
    pub fn is_lump(&self) -> bool {
        self.kind == RegionKind::Lump
    }

    /// Returns the name used for matching and region files.
    ///
    /// This is the lump name for lumps and the fixed label
    /// (`header`, `dir`, `notindir`) for everything else.
    pub fn label(&self) -> &str {
        self.kind.label().unwrap_or(&self.name)
    }

    /// Returns the namespace path joined with `/`, empty if none.
    pub fn namespace_path(&self) -> String {
        self.namespace.join("/")
    }

    /// Returns the payload reference.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Replaces the payload with owned bytes and updates the size.
    pub fn set_payload(&mut self, data: Vec<u8>) {
        self.size = data.len() as u64;
        self.payload = Payload::Owned(data);
    }

    /// Returns `true` if the payload has been materialized.
    pub fn is_materialized(&self) -> bool {
        matches!(self.payload, Payload::Owned(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let lump = Region::lump("THINGS", vec![1, 2, 3]);
        assert_eq!(lump.label(), "THINGS");
        assert!(lump.is_lump());
        assert_eq!(lump.size, 3);

        let gap = Region::from_source(RegionKind::Gap, String::new(), 40, 8);
        assert_eq!(gap.label(), "notindir");
        assert!(!gap.is_lump());
        assert_eq!(gap.payload(), &Payload::Source { offset: 40, len: 8 });
    }

    #[test]
    fn test_kind_from_label() {
        assert_eq!(RegionKind::from_label("header"), Some(RegionKind::Header));
        assert_eq!(RegionKind::from_label("dir"), Some(RegionKind::Directory));
        assert_eq!(RegionKind::from_label("notindir"), Some(RegionKind::Gap));
        assert_eq!(RegionKind::from_label("HEADER"), None);
        assert_eq!(RegionKind::from_label("things"), None);
    }

    #[test]
    fn test_set_payload_updates_size() {
        let mut region = Region::from_source(RegionKind::Lump, "MAP01".into(), 12, 0);
        assert!(!region.is_materialized());
        region.set_payload(b"hello".to_vec());
        assert_eq!(region.size, 5);
        assert!(region.is_materialized());
    }

    #[test]
    fn test_namespace_path() {
        let mut region = Region::lump("FLOOR0_1", Vec::new());
        assert_eq!(region.namespace_path(), "");
        region.namespace = vec!["F".into(), "F1".into()];
        assert_eq!(region.namespace_path(), "F/F1");
    }
}

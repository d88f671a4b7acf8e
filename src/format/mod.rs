//! WAD binary layout.
//!
//! A WAD archive is laid out as follows (all integers little-endian):
//!
//! ```text
//! +--------------------+  offset 0
//! | magic      [u8; 4] |  "IWAD" or "PWAD"
//! | lump count     i32 |
//! | dir offset     i32 |
//! +--------------------+  offset 12
//! | lump payloads      |  any order, gaps allowed
//! +--------------------+  dir offset
//! | directory entries  |  lump count × 16 bytes
//! +--------------------+
//! ```
//!
//! Each directory entry holds an `i32` offset, an `i32` size and an 8-byte
//! NUL-padded name.

pub mod directory;
pub mod header;
pub(crate) mod reader;

pub use directory::DirEntry;
pub use header::Header;

/// Size of the archive header in bytes.
pub const HEADER_SIZE: u64 = 12;

/// Size of one directory entry in bytes.
pub const DIR_ENTRY_SIZE: u64 = 16;

/// Width of the name field of a directory entry.
pub const NAME_LEN: usize = 8;

/// The kind of a WAD archive, identified by its magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WadKind {
    /// Primary archive (`IWAD`) shipped with a game.
    Iwad,
    /// Patch archive (`PWAD`) loaded on top of a primary one.
    #[default]
    Pwad,
}

impl WadKind {
    /// Returns the four magic bytes for this kind.
    pub fn magic(self) -> [u8; 4] {
        match self {
            WadKind::Iwad => *b"IWAD",
            WadKind::Pwad => *b"PWAD",
        }
    }

    /// Identifies a kind from its magic bytes.
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match &magic {
            b"IWAD" => Some(WadKind::Iwad),
            b"PWAD" => Some(WadKind::Pwad),
            _ => None,
        }
    }
}

impl std::fmt::Display for WadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WadKind::Iwad => write!(f, "IWAD"),
            WadKind::Pwad => write!(f, "PWAD"),
        }
    }
}

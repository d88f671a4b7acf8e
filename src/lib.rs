//! # wadlump
//!
//! A pure-Rust library for exploding, editing and rebuilding WAD archives.
//!
//! A WAD archive is read as an ordered list of *regions*: the header, every
//! lump, the directory table, and any bytes the directory does not index.
//! Regions can be edited with change tokens and written back as an archive
//! or as a directory of numbered region files whose concatenation is the
//! archive.
//!
//! ## Quick Start
//!
//! ### Listing an Archive
//!
//! ```rust,no_run
//! use wadlump::{Result, Wad};
//!
//! fn main() -> Result<()> {
//!     let wad = Wad::open_path("doom2.wad")?;
//!     for region in wad.regions() {
//!         println!("{:>10} {:>8} {}", region.offset, region.size, region.label());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Exploding and Rebuilding
//!
//! ```rust,no_run
//! use wadlump::{Result, Wad, WriteOptions};
//!
//! fn main() -> Result<()> {
//!     let mut wad = Wad::open_path("doom2.wad")?;
//!     wad.write_dir("doom2", &WriteOptions::new())?;
//!
//!     // Edit the region files, then rebuild.
//!     let mut wad = Wad::open_path("doom2")?;
//!     let result = wad.write_archive("rebuilt.wad", &WriteOptions::new())?;
//!     println!("Wrote {} lumps", result.lumps_written);
//!     Ok(())
//! }
//! ```
//!
//! ### Applying Changes
//!
//! ```rust,no_run
//! use wadlump::{EditOptions, EditableWad, Result, Wad, WriteOptions};
//!
//! fn main() -> Result<()> {
//!     let mut wad = Wad::open_path("e1m1.wad")?;
//!
//!     let mut editor = wad.edit().with_options(EditOptions::new().once(true));
//!     editor.change("_built_")?;              // drop node-builder output
//!     editor.change("ENDOOM=:endoom.bin")?;   // replace from a file
//!     editor.change("+DEHACKED=:patch.deh")?; // add a lump
//!     let result = editor.apply()?;
//!     println!("Deleted {} regions", result.regions_deleted);
//!
//!     wad.write_archive("e1m1-new.wad", &WriteOptions::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Change Tokens
//!
//! | Token | Effect |
//! |-------|--------|
//! | `NAME` | delete every region named `NAME` |
//! | `NAME=text` | replace the payload with `text` |
//! | `NAME=:path` | replace the payload with the contents of `path` |
//! | `NAME=@` | touch without changing |
//! | `+NAME=text`, `+NAME=:path` | append a new lump |
//!
//! `NAME` may be a group (`_name_`, `_base_`, `_built_`, `_standard_`,
//! `_ns_`) or a `/pattern/` matched against whole names. Gap regions are
//! named `notindir`.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`], which is an alias for
//! `std::result::Result<T, Error>`. Errors are terminal: every source,
//! token and destination is checked before the first byte is written.
//!
//! ```rust,no_run
//! use wadlump::{Error, Wad};
//!
//! fn open(path: &str) -> wadlump::Result<()> {
//!     match Wad::open_path(path) {
//!         Ok(wad) => {
//!             println!("Opened archive with {} lumps", wad.lump_count());
//!             Ok(())
//!         }
//!         Err(e @ Error::OffsetOutOfRange { .. }) => {
//!             eprintln!("Truncated archive: {}", e);
//!             Err(e)
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! # fn main() {}
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | No | Command-line interface tool |
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod edit;
pub mod error;
pub mod format;
pub mod namespace;
pub mod read;
pub mod write;

pub use error::{Error, Result};
pub use format::WadKind;

// Re-export reading API at crate root for convenience
pub use read::{Payload, Region, RegionKind, Wad};

// Re-export edit API
pub use edit::{Directive, EditOptions, EditResult, EditableWad, Editor};

// Re-export writing API at crate root for convenience
pub use write::{Destinations, Layout, WriteOptions, WriteResult};

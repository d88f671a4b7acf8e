//! Writing archives and region directories.
//!
//! Every write first plans a [`Layout`]: a regenerated header, the surviving
//! gap and lump regions, and a regenerated directory table. The archive
//! writer streams the plan into a temporary file and renames it over the
//! destination; the directory writer cuts the same stream into one
//! `NN-label` file per region.
//!
//! # Example
//!
//! ```rust,ignore
//! use wadlump::Wad;
//! use wadlump::write::{Destinations, WriteOptions};
//!
//! let mut wad = Wad::open_path("doom2.wad")?;
//! let destinations = Destinations::new().archive("rebuilt.wad").directory("doom2");
//! let result = wad.write(&destinations, &WriteOptions::new().overwrite(true))?;
//! println!("Wrote {} lumps, {} files", result.lumps_written, result.files_written);
//! ```

mod archive;
mod directory;
mod layout;
pub(crate) mod options;

pub use layout::{Content, Layout, PlannedFile, Slot};
pub use options::{Destinations, WriteOptions, WriteResult};

use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::read::Wad;
use crate::{Error, Result};

impl<R: Read + Seek> Wad<R> {
    /// Plans the output of the current regions.
    ///
    /// # Errors
    ///
    /// See [`Layout::plan`].
    pub fn layout(&self, options: &WriteOptions) -> Result<Layout<'_>> {
        Layout::plan(&self.regions, self.kind, *options)
    }

    /// Writes the archive bytes to `out`.
    ///
    /// This does not check for existing output and is not atomic.
    pub fn write_to<W: Write>(&mut self, mut out: W, options: &WriteOptions) -> Result<WriteResult> {
        let Wad {
            reader,
            regions,
            kind,
            ..
        } = self;
        let layout = Layout::plan(regions, *kind, *options)?;
        let archive_size = archive::write_slots(&layout, reader, &mut out)?;
        out.flush()?;
        Ok(WriteResult {
            regions_written: layout.slots().count(),
            lumps_written: layout.header().lump_count as usize,
            archive_size,
            files_written: 0,
        })
    }

    /// Writes an archive file.
    ///
    /// # Errors
    ///
    /// See [`Wad::write`].
    pub fn write_archive(&mut self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<WriteResult> {
        self.write(&Destinations::new().archive(path.as_ref()), options)
    }

    /// Writes a region directory.
    ///
    /// # Errors
    ///
    /// See [`Wad::write`].
    pub fn write_dir(&mut self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<WriteResult> {
        self.write(&Destinations::new().directory(path.as_ref()), options)
    }

    /// Writes to every requested destination.
    ///
    /// Destinations, names and the output plan are all checked before
    /// anything is written. When an existing region directory is replaced,
    /// region-file payloads are loaded into memory first so a directory can
    /// be rewritten in place.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateTarget`] if the archive and directory destinations are the same path
    /// - [`Error::OutputExists`] if a destination exists and overwriting was not requested
    /// - [`Error::InvalidLumpName`] if a name fits neither a directory entry nor a file name
    pub fn write(&mut self, destinations: &Destinations, options: &WriteOptions) -> Result<WriteResult> {
        destinations.validate()?;
        for path in destinations.archive.iter().chain(&destinations.directory) {
            if path.exists() && !options.overwrite {
                return Err(Error::OutputExists { path: path.clone() });
            }
        }
        if destinations.directory.as_deref().is_some_and(Path::exists) {
            self.materialize_files()?;
        }

        let Wad {
            reader,
            regions,
            kind,
            ..
        } = self;
        let layout = Layout::plan(regions, *kind, *options)?;
        if destinations.directory.is_some() {
            layout.validate_file_names()?;
        }

        let mut result = WriteResult {
            regions_written: layout.slots().count(),
            lumps_written: layout.header().lump_count as usize,
            ..Default::default()
        };
        if let Some(path) = &destinations.archive {
            result.archive_size = archive::write_archive(&layout, reader, path)?;
        }
        if let Some(path) = &destinations.directory {
            result.files_written = directory::write_dir(&layout, reader, path)?;
        }

        log::debug!(
            "Wrote {} regions ({} lumps, {} files)",
            result.regions_written,
            result.lumps_written,
            result.files_written
        );
        Ok(result)
    }
}

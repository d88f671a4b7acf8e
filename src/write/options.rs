//! Write options and results.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Options for writing archives and region directories.
///
/// # Example
///
/// ```rust
/// use wadlump::write::WriteOptions;
///
/// let options = WriteOptions::new().lumps_only(true).overwrite(true);
/// assert!(options.lumps_only);
/// assert!(!options.preserve_case);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Keep names as they are instead of upper-casing directory entries and
    /// lower-casing region files.
    pub preserve_case: bool,
    /// Write only lump regions to a region directory.
    pub lumps_only: bool,
    /// Place region files in namespace subdirectories.
    pub namespaces: bool,
    /// Order output regions by source offset instead of read order.
    pub offset_order: bool,
    /// Replace existing destinations.
    pub overwrite: bool,
}

impl WriteOptions {
    /// Creates write options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets case preservation.
    pub fn preserve_case(mut self, preserve_case: bool) -> Self {
        self.preserve_case = preserve_case;
        self
    }

    /// Limits region directories to lumps.
    pub fn lumps_only(mut self, lumps_only: bool) -> Self {
        self.lumps_only = lumps_only;
        self
    }

    /// Enables namespace subdirectories.
    pub fn namespaces(mut self, namespaces: bool) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Sorts output by source offset.
    pub fn offset_order(mut self, offset_order: bool) -> Self {
        self.offset_order = offset_order;
        self
    }

    /// Allows replacing existing destinations.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Where a write goes: an archive file, a region directory, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destinations {
    /// Archive file to create.
    pub archive: Option<PathBuf>,
    /// Region directory to create.
    pub directory: Option<PathBuf>,
}

impl Destinations {
    /// Creates an empty set of destinations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive destination.
    pub fn archive(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive = Some(path.into());
        self
    }

    /// Sets the region directory destination.
    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directory = Some(path.into());
        self
    }

    /// Returns `true` if nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.archive.is_none() && self.directory.is_none()
    }

    /// Checks that the destinations do not collide.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTarget`] if the archive and directory
    /// destinations are the same path.
    pub fn validate(&self) -> Result<()> {
        if let (Some(archive), Some(directory)) = (&self.archive, &self.directory) {
            if same_path(archive, directory) {
                return Err(Error::DuplicateTarget {
                    target: archive.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Result of a write.
#[must_use = "write result should be checked to verify what was written"]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    /// Number of regions in the output plan, header and directory included.
    pub regions_written: usize,
    /// Number of directory entries written.
    pub lumps_written: usize,
    /// Size of the archive output in bytes.
    pub archive_size: u64,
    /// Number of region files written.
    pub files_written: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_options_builder() {
        let options = WriteOptions::new()
            .preserve_case(true)
            .namespaces(true)
            .offset_order(true);
        assert!(options.preserve_case);
        assert!(options.namespaces);
        assert!(options.offset_order);
        assert!(!options.overwrite);
        assert!(!options.lumps_only);
    }

    #[test]
    fn test_destinations_must_differ() {
        assert!(Destinations::new().is_empty());

        let ok = Destinations::new().archive("out.wad").directory("out");
        assert!(ok.validate().is_ok());

        let same = Destinations::new().archive("out").directory("./out");
        assert!(matches!(same.validate(), Err(Error::DuplicateTarget { .. })));
    }
}

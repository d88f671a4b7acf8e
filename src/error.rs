//! Error types for WAD region operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when reading, editing, or writing WAD archives and region
//! directories, along with a convenient [`Result<T>`] type alias.
//!
//! Every error is terminal for a run. The pipeline validates the source, the
//! change tokens and the output plan before touching any destination, so an
//! error never leaves a half-written archive behind.
//!
//! # Example
//!
//! ```rust,no_run
//! use wadlump::{Error, Wad};
//!
//! match Wad::open_path("doom2.wad") {
//!     Ok(wad) => println!("{} regions", wad.len()),
//!     Err(Error::UnknownMagic { magic }) => eprintln!("not a WAD: {:?}", magic),
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

/// The main error type for WAD region operations.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | I/O | [`Io`][Self::Io] | File system operations |
/// | Format | [`MalformedHeader`][Self::MalformedHeader], [`UnknownMagic`][Self::UnknownMagic], [`OffsetOutOfRange`][Self::OffsetOutOfRange], [`InvalidRegionFile`][Self::InvalidRegionFile], [`UnterminatedNamespace`][Self::UnterminatedNamespace] | Damaged or foreign input |
/// | Usage | [`UnknownGroup`][Self::UnknownGroup], [`InvalidRegex`][Self::InvalidRegex], [`InvalidChange`][Self::InvalidChange], [`InvalidLumpName`][Self::InvalidLumpName], [`MissingSourceFile`][Self::MissingSourceFile], [`DuplicateTarget`][Self::DuplicateTarget] | Bad change tokens or destinations |
/// | Output | [`OutputExists`][Self::OutputExists] | Refusing to overwrite |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive header is truncated or internally inconsistent.
    ///
    /// Raised when the input is shorter than the 12-byte header, when the
    /// lump count or directory offset is negative, or when the directory
    /// table would extend past the end of the archive.
    #[error("Malformed WAD header: {reason}")]
    MalformedHeader {
        /// A description of the inconsistency.
        reason: String,
    },

    /// The four-byte magic is neither `IWAD` nor `PWAD`.
    #[error("Unknown WAD type {}: expected IWAD or PWAD", String::from_utf8_lossy(.magic))]
    UnknownMagic {
        /// The magic bytes that were found.
        magic: [u8; 4],
    },

    /// A directory entry points past the end of the archive.
    #[error("Lump {index} ({name}) at offset {offset:#x} with size {size} exceeds archive length {len}")]
    OffsetOutOfRange {
        /// Position of the entry in the directory table.
        index: usize,
        /// Name of the entry.
        name: String,
        /// Declared offset.
        offset: u64,
        /// Declared size.
        size: u64,
        /// Actual archive length.
        len: u64,
    },

    /// A file in a region directory does not follow the `NN-name` convention,
    /// or the ordinals are not contiguous.
    #[error("Invalid region file '{}': {reason}", .path.display())]
    InvalidRegionFile {
        /// The offending path.
        path: PathBuf,
        /// Why the file was rejected.
        reason: String,
    },

    /// A namespace marker has no partner.
    ///
    /// Either an `_END` marker closes a tag that is not open, or a `_START`
    /// marker is still open when the lump sequence ends.
    #[error("Unterminated namespace '{tag}' at lump {index} ({name})")]
    UnterminatedNamespace {
        /// The namespace tag involved.
        tag: String,
        /// Read-order index of the offending marker.
        index: usize,
        /// Name of the offending marker.
        name: String,
    },

    /// A change token references a group that does not exist.
    #[error("Unknown group '{token}': expected one of _name_, _base_, _built_, _standard_, _ns_")]
    UnknownGroup {
        /// The unrecognized group token.
        token: String,
    },

    /// A change token contains an invalid regular expression.
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegex {
        /// The invalid regex pattern.
        pattern: String,
        /// Description of why the pattern is invalid.
        reason: String,
    },

    /// A change token could not be parsed.
    #[error("Invalid change '{token}': {reason}")]
    InvalidChange {
        /// The offending token.
        token: String,
        /// Why the token was rejected.
        reason: String,
    },

    /// A lump name cannot be stored in the 8-byte directory name field.
    #[error("Invalid lump name '{name}': {reason}")]
    InvalidLumpName {
        /// The offending name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// A `name=:file` or `+name=:file` change names an unreadable file.
    #[error("Unable to read source file '{}' for change '{token}'", .path.display())]
    MissingSourceFile {
        /// The change token that referenced the file.
        token: String,
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Two requests name the same target.
    ///
    /// Raised when two change tokens address the same literal lump name, or
    /// when the archive and directory destinations are the same path.
    #[error("Duplicate target '{target}'")]
    DuplicateTarget {
        /// The target named more than once.
        target: String,
    },

    /// The destination exists and overwriting was not permitted.
    #[error("Output '{}' exists, but overwriting was not requested", .path.display())]
    OutputExists {
        /// The existing destination.
        path: PathBuf,
    },
}

/// A specialized Result type for WAD region operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if the error describes damaged or foreign input data.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedHeader { .. }
                | Error::UnknownMagic { .. }
                | Error::OffsetOutOfRange { .. }
                | Error::InvalidRegionFile { .. }
                | Error::UnterminatedNamespace { .. }
        )
    }

    /// Returns `true` if the error was caused by the request rather than the data.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownGroup { .. }
                | Error::InvalidRegex { .. }
                | Error::InvalidChange { .. }
                | Error::InvalidLumpName { .. }
                | Error::MissingSourceFile { .. }
                | Error::DuplicateTarget { .. }
                | Error::OutputExists { .. }
        )
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedHeader {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_change(token: &str, reason: impl Into<String>) -> Self {
        Error::InvalidChange {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_region_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidRegionFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_magic_display() {
        let err = Error::UnknownMagic { magic: *b"PK\x03\x04" };
        let msg = err.to_string();
        assert!(msg.contains("PK"));
        assert!(msg.contains("IWAD or PWAD"));
    }

    #[test]
    fn test_offset_out_of_range_display() {
        let err = Error::OffsetOutOfRange {
            index: 3,
            name: "THINGS".into(),
            offset: 0x100,
            size: 50,
            len: 200,
        };
        let msg = err.to_string();
        assert!(msg.contains("THINGS"));
        assert!(msg.contains("0x100"));
        assert!(msg.contains("200"));
    }

    #[test]
    fn test_error_categories() {
        assert!(Error::malformed("short").is_format_error());
        assert!(!Error::malformed("short").is_usage_error());

        let dup = Error::DuplicateTarget {
            target: "MAP01".into(),
        };
        assert!(dup.is_usage_error());
        assert!(!dup.is_format_error());

        let io = Error::Io(io::Error::other("boom"));
        assert!(!io.is_format_error());
        assert!(!io.is_usage_error());
    }

    #[test]
    fn test_missing_source_file_has_source() {
        use std::error::Error as _;

        let err = Error::MissingSourceFile {
            token: "MAP01=:missing.lmp".into(),
            path: PathBuf::from("missing.lmp"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.lmp"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

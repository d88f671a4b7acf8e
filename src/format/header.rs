//! WAD header structure and parsing.

use std::io::{self, Read, Write};

use crate::{Error, Result};

use super::reader::{non_negative, read_array, read_i32_le};
use super::{DIR_ENTRY_SIZE, HEADER_SIZE, WadKind};

/// The 12-byte header at the start of every WAD archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Archive kind from the magic.
    pub kind: WadKind,
    /// Number of directory entries.
    pub lump_count: u64,
    /// Byte offset of the directory table.
    pub dir_offset: u64,
}

impl Header {
    /// Parses and validates the header of an archive of `archive_len` bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedHeader`] if the input is shorter than the header,
    ///   a field is negative, or the directory table extends past the end
    /// - [`Error::UnknownMagic`] if the magic is neither `IWAD` nor `PWAD`
    pub fn parse<R: Read>(r: &mut R, archive_len: u64) -> Result<Self> {
        if archive_len < HEADER_SIZE {
            return Err(Error::malformed(format!(
                "archive is {} bytes, shorter than the {}-byte header",
                archive_len, HEADER_SIZE
            )));
        }

        let magic: [u8; 4] = read_array(r).map_err(truncated)?;
        let kind = WadKind::from_magic(magic).ok_or(Error::UnknownMagic { magic })?;

        let raw_count = read_i32_le(r).map_err(truncated)?;
        let raw_offset = read_i32_le(r).map_err(truncated)?;
        let lump_count = non_negative(raw_count)
            .ok_or_else(|| Error::malformed(format!("negative lump count {}", raw_count)))?;
        let dir_offset = non_negative(raw_offset)
            .ok_or_else(|| Error::malformed(format!("negative directory offset {}", raw_offset)))?;

        let dir_end = dir_offset + lump_count * DIR_ENTRY_SIZE;
        if dir_end > archive_len {
            return Err(Error::malformed(format!(
                "directory of {} entries at offset {:#x} ends at {:#x}, past archive length {:#x}",
                lump_count, dir_offset, dir_end, archive_len
            )));
        }

        Ok(Self {
            kind,
            lump_count,
            dir_offset,
        })
    }

    /// Returns the size in bytes of the directory table.
    pub fn dir_size(&self) -> u64 {
        self.lump_count * DIR_ENTRY_SIZE
    }

    /// Serializes the header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedHeader`] if a field does not fit the signed
    /// 32-bit on-disk representation.
    pub fn to_bytes(&self) -> Result<[u8; 12]> {
        let count = i32::try_from(self.lump_count)
            .map_err(|_| Error::malformed(format!("{} lumps do not fit a WAD", self.lump_count)))?;
        let offset = i32::try_from(self.dir_offset).map_err(|_| {
            Error::malformed(format!("directory offset {:#x} does not fit a WAD", self.dir_offset))
        })?;

        let mut out = [0u8; 12];
        out[0..4].copy_from_slice(&self.kind.magic());
        out[4..8].copy_from_slice(&count.to_le_bytes());
        out[8..12].copy_from_slice(&offset.to_le_bytes());
        Ok(out)
    }

    /// Writes the serialized header.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.to_bytes()?)?;
        Ok(())
    }
}

fn truncated(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::malformed("truncated header")
    } else {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn raw(magic: &[u8; 4], count: i32, offset: i32) -> Vec<u8> {
        let mut data = magic.to_vec();
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(&offset.to_le_bytes());
        data
    }

    #[test]
    fn test_parse_empty_pwad() {
        let data = raw(b"PWAD", 0, 12);
        let header = Header::parse(&mut Cursor::new(&data), data.len() as u64).unwrap();
        assert_eq!(header.kind, WadKind::Pwad);
        assert_eq!(header.lump_count, 0);
        assert_eq!(header.dir_offset, 12);
        assert_eq!(header.to_bytes().unwrap().to_vec(), data);
    }

    #[test]
    fn test_parse_rejects_short_input() {
        let data = b"IWAD\x00".to_vec();
        let err = Header::parse(&mut Cursor::new(&data), data.len() as u64).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_magic() {
        let data = raw(b"WAD2", 0, 12);
        let err = Header::parse(&mut Cursor::new(&data), data.len() as u64).unwrap_err();
        assert!(matches!(err, Error::UnknownMagic { magic } if &magic == b"WAD2"));
    }

    #[test]
    fn test_parse_rejects_negative_fields() {
        let data = raw(b"IWAD", -1, 12);
        let err = Header::parse(&mut Cursor::new(&data), data.len() as u64).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { .. }));

        let data = raw(b"IWAD", 0, -12);
        let err = Header::parse(&mut Cursor::new(&data), data.len() as u64).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { .. }));
    }

    #[test]
    fn test_parse_rejects_directory_past_end() {
        let data = raw(b"PWAD", 2, 12);
        let err = Header::parse(&mut Cursor::new(&data), data.len() as u64).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { .. }));
    }
}

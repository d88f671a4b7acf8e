//! WAD directory entries.
//!
//! Names are stored in an 8-byte NUL-padded field. Bytes are mapped to
//! `char` one-to-one (Latin-1), so any on-disk name survives a rewrite
//! unchanged even when it is not valid UTF-8.

use std::io::{Read, Write};

use crate::{Error, Result};

use super::NAME_LEN;
use super::reader::{non_negative, read_array, read_i32_le};

/// One 16-byte entry of the directory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Byte offset of the lump payload.
    pub offset: u64,
    /// Size of the lump payload.
    pub size: u64,
    /// Lump name, without padding.
    pub name: String,
}

impl DirEntry {
    /// Parses one entry.
    ///
    /// Negative offsets and sizes are reported as [`Error::MalformedHeader`].
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        let raw_offset = read_i32_le(r)?;
        let raw_size = read_i32_le(r)?;
        let raw_name: [u8; NAME_LEN] = read_array(r)?;

        let name = decode_name(&raw_name);
        let offset = non_negative(raw_offset).ok_or_else(|| {
            Error::malformed(format!("lump '{}' has negative offset {}", name, raw_offset))
        })?;
        let size = non_negative(raw_size).ok_or_else(|| {
            Error::malformed(format!("lump '{}' has negative size {}", name, raw_size))
        })?;

        Ok(Self { offset, size, name })
    }

    /// Serializes the entry.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        let offset = i32::try_from(self.offset).map_err(|_| {
            Error::malformed(format!("lump '{}' offset {:#x} does not fit a WAD", self.name, self.offset))
        })?;
        let size = i32::try_from(self.size).map_err(|_| {
            Error::malformed(format!("lump '{}' size {} does not fit a WAD", self.name, self.size))
        })?;

        w.write_all(&offset.to_le_bytes())?;
        w.write_all(&size.to_le_bytes())?;
        w.write_all(&encode_name(&self.name)?)?;
        Ok(())
    }
}

/// Decodes a NUL-padded name field.
pub fn decode_name(raw: &[u8]) -> String {
    raw.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

/// Encodes a name into the 8-byte field.
///
/// # Errors
///
/// Returns [`Error::InvalidLumpName`] if the name is empty, longer than eight
/// bytes, or contains NUL or characters outside the single-byte range.
pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN]> {
    let invalid = |reason: &str| Error::InvalidLumpName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }

    let mut out = [0u8; NAME_LEN];
    let mut len = 0;
    for c in name.chars() {
        if len == NAME_LEN {
            return Err(invalid("longer than 8 characters"));
        }
        let byte = u8::try_from(u32::from(c)).map_err(|_| invalid("contains a multi-byte character"))?;
        if byte == 0 {
            return Err(invalid("contains NUL"));
        }
        out[len] = byte;
        len += 1;
    }
    Ok(out)
}

/// Checks that a name can be stored in a directory entry.
pub fn validate_name(name: &str) -> Result<()> {
    encode_name(name).map(|_| ())
}

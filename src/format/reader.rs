//! Low-level binary reading utilities for WAD parsing.

use std::io::{self, Read};

/// Reads a little-endian `i32`.
pub fn read_i32_le<R: Read>(r: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Reads exactly `N` bytes into an array.
pub fn read_array<R: Read, const N: usize>(r: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Converts a signed on-disk field to `u64`, rejecting negative values.
pub fn non_negative(value: i32) -> Option<u64> {
    u64::try_from(value).ok()
}

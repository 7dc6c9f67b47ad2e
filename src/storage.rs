//! Backing store and positional read primitives
//!
//! A database is served either from an owned buffer or from a read-only
//! memory map. Every read is addressed by offset; nothing keeps a cursor,
//! so a single store can serve any number of concurrent readers.
//!
//! # Offsets
//!
//! Header fields, row addresses and index slots in the BIN format are
//! 1-based: offset 1 is the first byte of the file. String pointers stored
//! inside rows are plain 0-based file positions. [`PositionalReader`] keeps
//! both conventions so callers can pass on-disk values through unchanged.
//!
//! ```text
//!  pointer p (0-based)
//!  │
//!  ▼
//! ┌─────┬───────┬───────┬─────┐
//! │ len │ buf 0 │ buf 1 │ ... │
//! └─────┴───────┴───────┴─────┘
//! ```

use crate::error::{Ip2LocationError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Storage for database data - either owned or memory-mapped
pub(crate) enum DatabaseStorage {
    Owned(Vec<u8>),
    Mmap(Mmap),
}

impl DatabaseStorage {
    /// Memory-map a file read-only
    pub(crate) fn map(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the map is read-only. BIN files are immutable once
        // published; replacing one in place while mapped is unsupported.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(DatabaseStorage::Mmap(mmap))
    }

    /// Read a whole file into an owned buffer
    pub(crate) fn read(path: &Path) -> Result<Self> {
        Ok(DatabaseStorage::Owned(std::fs::read(path)?))
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            DatabaseStorage::Owned(v) => v.as_slice(),
            DatabaseStorage::Mmap(m) => &m[..],
        }
    }

    pub(crate) fn is_mapped(&self) -> bool {
        matches!(self, DatabaseStorage::Mmap(_))
    }
}

/// Bounds-checked little-endian reads at absolute file offsets
#[derive(Debug, Clone, Copy)]
pub struct PositionalReader<'a> {
    data: &'a [u8],
}

impl<'a> PositionalReader<'a> {
    /// Wrap a byte slice holding an entire database file
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total size of the store in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the store holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at the 1-based `offset`
    pub fn bytes(&self, offset: u64, len: usize) -> Result<&'a [u8]> {
        let out_of_range = || Ip2LocationError::Io { offset, len };
        let start = offset
            .checked_sub(1)
            .and_then(|s| usize::try_from(s).ok())
            .ok_or_else(out_of_range)?;
        let end = start.checked_add(len).ok_or_else(out_of_range)?;
        self.data.get(start..end).ok_or_else(out_of_range)
    }

    /// Read one byte at the 1-based `offset`
    pub fn read_u8(&self, offset: u64) -> Result<u8> {
        Ok(self.bytes(offset, 1)?[0])
    }

    /// Read a little-endian `u32` at the 1-based `offset`
    pub fn read_u32(&self, offset: u64) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(offset)?))
    }

    /// Read a little-endian 128-bit address at the 1-based `offset`
    ///
    /// The 16 stored bytes are reversed into big-endian order, which is
    /// exactly what `u128::from_le_bytes` yields as a number.
    pub fn read_u128(&self, offset: u64) -> Result<u128> {
        Ok(u128::from_le_bytes(self.array(offset)?))
    }

    /// Read a little-endian IEEE-754 `f32` at the 1-based `offset`
    pub fn read_f32(&self, offset: u64) -> Result<f32> {
        Ok(f32::from_le_bytes(self.array(offset)?))
    }

    /// Read a length-prefixed string at the 0-based `pointer`
    ///
    /// Returns exactly the stored bytes: no terminator, no trimming.
    pub fn read_pstring(&self, pointer: u64) -> Result<&'a [u8]> {
        // A 0-based pointer p is the 1-based offset p + 1
        let offset = pointer.saturating_add(1);
        let len = self.read_u8(offset)?;
        self.bytes(offset.saturating_add(1), usize::from(len))
    }

    fn array<const N: usize>(&self, offset: u64) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(offset, N)?);
        Ok(out)
    }
}

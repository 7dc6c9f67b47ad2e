//! BIN file header
//!
//! The header is a fixed 29-byte little-endian block at the start of
//! the file (offsets shown 1-based, as the format documents them):
//!
//! ```text
//! ┌────────┬──────┬──────────────────────────────┐
//! │ Offset │ Size │ Field                        │
//! ├────────┼──────┼──────────────────────────────┤
//! │ 1      │ 1    │ database type (1..=24)       │
//! │ 2      │ 1    │ column count                 │
//! │ 3..=5  │ 1    │ release year, month, day     │
//! │ 6      │ 4    │ IPv4 row count               │
//! │ 10     │ 4    │ IPv4 table base address      │
//! │ 14     │ 4    │ IPv6 row count               │
//! │ 18     │ 4    │ IPv6 table base address      │
//! │ 22     │ 4    │ IPv4 index base (0 = none)   │
//! │ 26     │ 4    │ IPv6 index base (0 = none)   │
//! └────────┴──────┴──────────────────────────────┘
//! ```

use crate::address::IpFamily;
use crate::error::{Ip2LocationError, Result};
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

/// Size of the on-disk header in bytes
pub const HEADER_LEN: usize = std::mem::size_of::<RawHeader>();

/// On-disk header layout (29 bytes, byte-aligned)
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
struct RawHeader {
    database_type: u8,
    column_count: u8,
    year: u8,
    month: u8,
    day: u8,
    ipv4_count: U32,
    ipv4_base: U32,
    ipv6_count: U32,
    ipv6_base: U32,
    ipv4_index_base: U32,
    ipv6_index_base: U32,
}

/// Decoded header plus the row sizes derived from it
///
/// Created once when a database is opened and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    database_type: u8,
    column_count: u8,
    year: u8,
    month: u8,
    day: u8,
    ipv4: FamilyTable,
    ipv6: FamilyTable,
}

/// Location and shape of one address family's range table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyTable {
    /// Number of rows in the table
    pub row_count: u32,
    /// 1-based offset of the first row
    pub base: u32,
    /// 1-based offset of the index table, 0 if there is none
    pub index_base: u32,
    /// Fixed row width in bytes
    pub row_size: u32,
}

impl FamilyTable {
    /// True if the file carries an index for this family
    pub fn has_index(&self) -> bool {
        self.index_base > 0
    }
}

impl Header {
    /// Decode the header from the start of a database file
    ///
    /// This is the only place where a damaged file is told apart from a bad
    /// query: anything unreadable here is reported as `InvalidFile`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (raw, _) = RawHeader::read_from_prefix(data).map_err(|_| {
            Ip2LocationError::InvalidFile(format!(
                "file is {} bytes, header needs {}",
                data.len(),
                HEADER_LEN
            ))
        })?;

        if raw.column_count == 0 {
            return Err(Ip2LocationError::InvalidFile(
                "column count is zero".to_string(),
            ));
        }

        let columns = u32::from(raw.column_count);
        Ok(Header {
            database_type: raw.database_type,
            column_count: raw.column_count,
            year: raw.year,
            month: raw.month,
            day: raw.day,
            ipv4: FamilyTable {
                row_count: raw.ipv4_count.get(),
                base: raw.ipv4_base.get(),
                index_base: raw.ipv4_index_base.get(),
                // every IPv4 column is 4 bytes wide
                row_size: columns * 4,
            },
            ipv6: FamilyTable {
                row_count: raw.ipv6_count.get(),
                base: raw.ipv6_base.get(),
                index_base: raw.ipv6_index_base.get(),
                // the address column is 16 bytes, the rest are 4
                row_size: 16 + (columns - 1) * 4,
            },
        })
    }

    /// Database type (schema) number, 1..=24 for known products
    pub fn database_type(&self) -> u8 {
        self.database_type
    }

    /// Number of columns per row, address column included
    pub fn column_count(&self) -> u8 {
        self.column_count
    }

    /// Two-digit release year (e.g. 24 for 2024)
    pub fn year(&self) -> u8 {
        self.year
    }

    /// Release month
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Release day
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Release date formatted as `20YY-MM-DD`
    pub fn release_date(&self) -> String {
        format!("20{:02}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Table description for one address family
    pub fn table(&self, family: IpFamily) -> &FamilyTable {
        match family {
            IpFamily::V4 => &self.ipv4,
            IpFamily::V6 => &self.ipv6,
        }
    }

    /// Number of IPv4 rows
    pub fn ipv4_count(&self) -> u32 {
        self.ipv4.row_count
    }

    /// Number of IPv6 rows
    pub fn ipv6_count(&self) -> u32 {
        self.ipv6.row_count
    }

    /// True if the file holds IPv4 rows
    pub fn has_ipv4(&self) -> bool {
        self.ipv4.row_count > 0
    }

    /// True if the file holds IPv6 rows
    pub fn has_ipv6(&self) -> bool {
        self.ipv6.row_count > 0
    }
}

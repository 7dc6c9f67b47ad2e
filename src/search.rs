//! Range table search
//!
//! Each address family has a table of fixed-size rows sorted by their
//! start address. A row owns the half-open range from its own start
//! address up to the next row's start address, so the table always ends
//! with one extra start address that closes the final range:
//!
//! ```text
//!  base
//!  │
//!  ▼
//! ┌──────┬─────────┐┌──────┬─────────┐     ┌──────┬─────────┐┌──────┐
//! │ from │ columns ││ from │ columns │ ... │ from │ columns ││ from │
//! └──────┴─────────┘└──────┴─────────┘     └──────┴─────────┘└──────┘
//!  row 0              row 1                 row n-1            end
//! ```
//!
//! When the file carries an index, the entry for the address's top 16
//! bits gives the row bounds to bisect instead of the whole table.

use crate::address::{AddressKey, IpFamily};
use crate::error::Result;
use crate::header::Header;
use crate::storage::PositionalReader;
use log::trace;

/// IPv6 rows put a 16-byte address before the 4-byte columns, 12 bytes
/// more than the column math assumes
const IPV6_COLUMN_SHIFT: u64 = 12;

/// A row that owns the queried address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMatch {
    /// Row number within its family's table
    pub row: u32,
    /// 1-based offset of the row
    pub offset: u64,
    /// 1-based offset that column offsets are added to
    pub column_base: u64,
}

/// Binary search over one database's range tables
pub struct RangeSearch<'a> {
    reader: PositionalReader<'a>,
    header: &'a Header,
}

impl<'a> RangeSearch<'a> {
    /// Create a search over the raw file data
    pub fn new(reader: PositionalReader<'a>, header: &'a Header) -> Self {
        Self { reader, header }
    }

    /// Find the row owning `key`, `None` if no range contains it
    pub fn find(&self, key: &AddressKey) -> Result<Option<RowMatch>> {
        let family = key.family;
        let table = self.header.table(family);

        if table.row_count == 0 || table.base == 0 {
            return Ok(None);
        }

        let (mut low, mut high) = match key.index_slot {
            Some(slot) => (self.reader.read_u32(slot)?, self.reader.read_u32(slot + 4)?),
            None => (0, table.row_count),
        };
        // the final start address only closes the last range
        high = high.min(table.row_count - 1);

        // ranges are half-open, so the top address would fall past the last one
        let mut value = key.value;
        if value >= family.max_value() {
            value -= 1;
        }

        let row_size = u64::from(table.row_size);
        while low <= high {
            let mid = ((u64::from(low) + u64::from(high)) >> 1) as u32;
            let offset = u64::from(table.base) + u64::from(mid) * row_size;

            let from = self.read_address(family, offset)?;
            let to = self.read_address(family, offset + row_size)?;
            trace!(
                "{} search: rows [{}, {}] mid {} range [{:#x}, {:#x})",
                family, low, high, mid, from, to
            );

            if from <= value && value < to {
                let column_base = match family {
                    IpFamily::V4 => offset,
                    IpFamily::V6 => offset + IPV6_COLUMN_SHIFT,
                };
                return Ok(Some(RowMatch {
                    row: mid,
                    offset,
                    column_base,
                }));
            }

            if value < from {
                match mid.checked_sub(1) {
                    Some(h) => high = h,
                    None => break,
                }
            } else {
                low = mid + 1;
            }
        }

        Ok(None)
    }

    fn read_address(&self, family: IpFamily, offset: u64) -> Result<u128> {
        match family {
            IpFamily::V4 => self.reader.read_u32(offset).map(u128::from),
            IpFamily::V6 => self.reader.read_u128(offset),
        }
    }
}

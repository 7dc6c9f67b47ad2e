//! Address classification
//!
//! Turns query text into an address family, the numeric value compared
//! against the range table, and (when the file has one) the index slot
//! that narrows the search for the address's top 16 bits.

use crate::error::{Ip2LocationError, Result};
use crate::header::Header;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Bytes per index entry: two `u32` row bounds
const INDEX_ENTRY_SIZE: u64 = 8;

/// Address family of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    /// 32-bit addresses
    V4,
    /// 128-bit addresses
    V6,
}

impl IpFamily {
    /// Largest address representable in this family
    pub const fn max_value(self) -> u128 {
        match self {
            IpFamily::V4 => u32::MAX as u128,
            IpFamily::V6 => u128::MAX,
        }
    }

    /// Width in bytes of a stored range address
    pub const fn address_width(self) -> u32 {
        match self {
            IpFamily::V4 => 4,
            IpFamily::V6 => 16,
        }
    }

    /// Right shift that keeps the top 16 bits of an address
    const fn index_shift(self) -> u32 {
        match self {
            IpFamily::V4 => 16,
            IpFamily::V6 => 112,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFamily::V4 => write!(f, "IPv4"),
            IpFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// A classified query address
///
/// Built fresh for each query and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressKey {
    /// Address family of the row table to search
    pub family: IpFamily,
    /// Address as a big-endian unsigned integer
    pub value: u128,
    /// 1-based offset of the index entry bounding the search, if indexed
    pub index_slot: Option<u64>,
}

impl AddressKey {
    /// Parse query text and classify it against a header
    pub fn parse(text: &str, header: &Header) -> Result<Self> {
        let addr: IpAddr = text
            .parse()
            .map_err(|_| Ip2LocationError::InvalidAddress(text.to_string()))?;
        Ok(Self::from_ip(addr, header))
    }

    /// Classify an already parsed address
    ///
    /// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are searched in the
    /// IPv4 table.
    pub fn from_ip(addr: IpAddr, header: &Header) -> Self {
        let (family, value) = match addr {
            IpAddr::V4(v4) => (IpFamily::V4, u128::from(u32::from(v4))),
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => (IpFamily::V4, u128::from(u32::from(v4))),
                None => (IpFamily::V6, u128::from(v6)),
            },
        };

        let table = header.table(family);
        let index_slot = table.has_index().then(|| {
            let bucket = (value >> family.index_shift()) as u64;
            bucket * INDEX_ENTRY_SIZE + u64::from(table.index_base)
        });

        AddressKey {
            family,
            value,
            index_slot,
        }
    }

    /// The address in its family's natural form
    pub fn to_ip(&self) -> IpAddr {
        match self.family {
            IpFamily::V4 => IpAddr::V4(Ipv4Addr::from(self.value as u32)),
            IpFamily::V6 => IpAddr::V6(Ipv6Addr::from(self.value)),
        }
    }
}

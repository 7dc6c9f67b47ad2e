//! ip2location - Reader for IP2Location BIN geolocation databases
//!
//! Looks up an IPv4 or IPv6 address in a BIN file and returns the
//! attributes of the range that owns it: country, region, city,
//! coordinates, ISP, time zone, mobile network codes and so on, depending
//! on which of the 24 database products (DB1 through DB24) the file is.
//!
//! # Quick Start
//!
//! ```no_run
//! use ip2location::{Database, Fields};
//!
//! let db = Database::open("IP2LOCATION-LITE-DB11.BIN")?;
//!
//! // Only the requested columns are read
//! if let Some(record) = db.lookup("8.8.8.8", Fields::COUNTRY_SHORT | Fields::CITY)? {
//!     println!("{} / {}", record.country_short, record.city);
//! }
//!
//! // Historical contract: not found yields an empty record
//! let record = db.query("2001:4860:4860::8888", Fields::all())?;
//! println!("{:?}", record);
//! # Ok::<(), ip2location::Ip2LocationError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//!  "8.8.8.8" ──► AddressKey ──► RangeSearch ──► FieldProjector ──► Record
//!                   │               │                 │
//!                   ▼               ▼                 ▼
//!                Header      PositionalReader    ColumnLayout
//!                   ▲               │
//!                   └─── mmap'd or owned BIN file
//! ```
//!
//! - [`Header`] is decoded once at open and describes both range tables.
//! - [`ColumnLayout`] says which columns the product carries and where.
//! - A query classifies the address, bisects the matching range table
//!   (narrowed by the file's index when present), then reads just the
//!   requested columns of the row it found.
//!
//! Nothing is mutated after open, so `&Database` can be shared freely
//! between threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Address parsing and classification
pub mod address;
/// Database handle and query API
pub mod database;
/// Error types for the ip2location library
pub mod error;
/// Field selection masks
pub mod fields;
/// BIN file header
pub mod header;
/// Column layout per database type
pub mod layout;
/// Lookup results and row projection
pub mod record;
/// Range table search
pub mod search;
/// Backing store and positional reads
pub mod storage;

// Re-exports for Rust consumers

pub use crate::address::{AddressKey, IpFamily};
pub use crate::database::{Database, DatabaseBuilder, StorageMode};
pub use crate::error::{Ip2LocationError, Result};
pub use crate::fields::Fields;
pub use crate::header::{FamilyTable, Header, HEADER_LEN};
pub use crate::layout::{database_fields, Column, ColumnLayout, DatabaseType};
pub use crate::record::Record;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Database handle and query API
//!
//! A [`Database`] owns the backing store of one BIN file together with the
//! header and column layout decoded when it was opened. Queries never
//! mutate it, so a single handle can be shared by reference across threads.

use crate::address::AddressKey;
use crate::error::{Ip2LocationError, Result};
use crate::fields::Fields;
use crate::header::Header;
use crate::layout::{ColumnLayout, DatabaseType};
use crate::record::{FieldProjector, Record};
use crate::search::RangeSearch;
use crate::storage::{DatabaseStorage, PositionalReader};
use log::debug;
use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// How a database file is brought into memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Memory-map the file read-only
    #[default]
    Mmap,
    /// Read the whole file into an owned buffer
    InMemory,
}

/// Builder for opening a database with non-default options
///
/// # Example
///
/// ```no_run
/// use ip2location::{Database, StorageMode};
///
/// let db = Database::builder("IP2LOCATION-LITE-DB3.BIN")
///     .storage(StorageMode::InMemory)
///     .build()?;
/// # Ok::<(), ip2location::Ip2LocationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseBuilder {
    path: PathBuf,
    storage: StorageMode,
}

impl DatabaseBuilder {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            storage: StorageMode::default(),
        }
    }

    /// Choose how the file is loaded (default: memory-mapped)
    pub fn storage(mut self, mode: StorageMode) -> Self {
        self.storage = mode;
        self
    }

    /// Shorthand for `storage(StorageMode::InMemory)`
    pub fn in_memory(self) -> Self {
        self.storage(StorageMode::InMemory)
    }

    /// Open the database
    pub fn build(self) -> Result<Database> {
        let storage = match self.storage {
            StorageMode::Mmap => DatabaseStorage::map(&self.path)?,
            StorageMode::InMemory => DatabaseStorage::read(&self.path)?,
        };
        debug!("Opened {} ({:?})", self.path.display(), self.storage);
        Database::from_storage(storage)
    }
}

/// An open BIN geolocation database
///
/// # Examples
///
/// ```no_run
/// use ip2location::{Database, Fields};
///
/// let db = Database::open("IP2LOCATION-LITE-DB3.BIN")?;
///
/// if let Some(record) = db.lookup("8.8.8.8", Fields::COUNTRY | Fields::CITY)? {
///     println!("{} {}", record.country_short, record.city);
/// }
/// # Ok::<(), ip2location::Ip2LocationError>(())
/// ```
pub struct Database {
    data: DatabaseStorage,
    header: Header,
    layout: ColumnLayout,
}

/// Generates single-field convenience getters that call through to
/// [`Database::query`] with a preset mask.
macro_rules! field_getters {
    ($($(#[$doc:meta])* $name:ident => $fields:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, address: &str) -> Result<Record> {
                self.query(address, $fields)
            }
        )*
    };
}

impl Database {
    /// Open a database file using memory mapping
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring how a database file is opened
    pub fn builder(path: impl AsRef<Path>) -> DatabaseBuilder {
        DatabaseBuilder::new(path.as_ref().to_path_buf())
    }

    /// Create a database from an in-memory copy of a BIN file
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_storage(DatabaseStorage::Owned(data))
    }

    fn from_storage(storage: DatabaseStorage) -> Result<Self> {
        let header = Header::parse(storage.as_slice())?;
        let layout = ColumnLayout::for_database_type(header.database_type()).ok_or_else(|| {
            Ip2LocationError::InvalidFile(format!(
                "unknown database type {}",
                header.database_type()
            ))
        })?;

        debug!(
            "{} released {}: {} columns, {} IPv4 rows, {} IPv6 rows, fields {:?}",
            layout.database_type(),
            header.release_date(),
            header.column_count(),
            header.ipv4_count(),
            header.ipv6_count(),
            layout.supported_fields()
        );

        Ok(Self {
            data: storage,
            header,
            layout,
        })
    }

    /// Decoded file header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Column layout for this database's product
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Product this file belongs to
    pub fn database_type(&self) -> DatabaseType {
        self.layout.database_type()
    }

    /// Fields this database can return
    ///
    /// Requesting anything outside this set is not an error; those fields
    /// simply stay empty.
    pub fn supported_fields(&self) -> Fields {
        self.layout.supported_fields()
    }

    /// True if the file is memory-mapped rather than held in a buffer
    pub fn is_mapped(&self) -> bool {
        self.data.is_mapped()
    }

    /// Look up an address given as text
    ///
    /// Returns `Ok(Some(record))` if a range owns the address and `Ok(None)`
    /// if none does.
    pub fn lookup(&self, address: &str, fields: Fields) -> Result<Option<Record>> {
        let key = AddressKey::parse(address, &self.header)?;
        self.lookup_key(&key, fields)
    }

    /// Look up an already parsed address
    pub fn lookup_ip(&self, address: IpAddr, fields: Fields) -> Result<Option<Record>> {
        let key = AddressKey::from_ip(address, &self.header);
        self.lookup_key(&key, fields)
    }

    /// Look up an address, returning an empty record if no range owns it
    ///
    /// This is the historical query contract: "not found" and "found with
    /// nothing requested" are indistinguishable. Use [`Database::lookup`]
    /// to tell them apart.
    pub fn query(&self, address: &str, fields: Fields) -> Result<Record> {
        Ok(self.lookup(address, fields)?.unwrap_or_default())
    }

    fn lookup_key(&self, key: &AddressKey, fields: Fields) -> Result<Option<Record>> {
        let reader = PositionalReader::new(self.data.as_slice());

        let row = match RangeSearch::new(reader, &self.header).find(key)? {
            Some(row) => row,
            None => return Ok(None),
        };

        FieldProjector::new(reader, &self.layout)
            .project(row.column_base, fields)
            .map(Some)
    }

    /// Release the backing store
    ///
    /// Equivalent to dropping the handle.
    pub fn close(self) {
        debug!("Closing {} database", self.database_type());
    }

    field_getters! {
        /// Every field the database carries
        get_all => Fields::all();
        /// Two-letter country code
        get_country_short => Fields::COUNTRY_SHORT;
        /// Country name
        get_country_long => Fields::COUNTRY_LONG;
        /// Region or state
        get_region => Fields::REGION;
        /// City
        get_city => Fields::CITY;
        /// Internet service provider
        get_isp => Fields::ISP;
        /// Latitude
        get_latitude => Fields::LATITUDE;
        /// Longitude
        get_longitude => Fields::LONGITUDE;
        /// Domain
        get_domain => Fields::DOMAIN;
        /// ZIP code
        get_zipcode => Fields::ZIPCODE;
        /// Time zone
        get_timezone => Fields::TIMEZONE;
        /// Net speed
        get_net_speed => Fields::NET_SPEED;
        /// IDD code
        get_idd_code => Fields::IDD_CODE;
        /// Area code
        get_area_code => Fields::AREA_CODE;
        /// Weather station code
        get_weather_station_code => Fields::WEATHER_STATION_CODE;
        /// Weather station name
        get_weather_station_name => Fields::WEATHER_STATION_NAME;
        /// Mobile country code
        get_mcc => Fields::MCC;
        /// Mobile network code
        get_mnc => Fields::MNC;
        /// Mobile brand
        get_mobile_brand => Fields::MOBILE_BRAND;
        /// Elevation
        get_elevation => Fields::ELEVATION;
        /// Usage type
        get_usage_type => Fields::USAGE_TYPE;
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("database_type", &self.database_type().to_string())
            .field("release_date", &self.header.release_date())
            .field("ipv4_count", &self.header.ipv4_count())
            .field("ipv6_count", &self.header.ipv6_count())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}

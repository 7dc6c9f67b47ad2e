//! Column layout per database type
//!
//! Every BIN product (DB1 through DB24) stores a fixed subset of columns
//! in a fixed order. The position table below is the compatibility
//! contract with the published format: entry `[column][db_type]` is the
//! 1-based column number, or 0 if that product lacks the column. Column 1
//! is always the range start address, so attribute positions begin at 2.
//!
//! Positions are shared by IPv4 and IPv6 rows. Only the address column
//! differs in width, which the search engine corrects for.

use crate::fields::Fields;
use std::fmt;

/// Highest database type this reader understands
pub const MAX_DATABASE_TYPE: u8 = 24;

/// Width of every non-address column in bytes
pub const COLUMN_WIDTH: u32 = 4;

/// Attribute columns that can appear in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Pointer to the country code, followed by the country name
    Country,
    /// Region or state
    Region,
    /// City
    City,
    /// Internet service provider
    Isp,
    /// Latitude, stored inline as `f32`
    Latitude,
    /// Longitude, stored inline as `f32`
    Longitude,
    /// Domain
    Domain,
    /// ZIP code
    Zipcode,
    /// Time zone
    Timezone,
    /// Net speed
    NetSpeed,
    /// IDD code
    IddCode,
    /// Area code
    AreaCode,
    /// Weather station code
    WeatherStationCode,
    /// Weather station name
    WeatherStationName,
    /// Mobile country code
    Mcc,
    /// Mobile network code
    Mnc,
    /// Mobile brand
    MobileBrand,
    /// Elevation, stored as decimal text
    Elevation,
    /// Usage type
    UsageType,
}

impl Column {
    /// Every column, in table order
    pub const ALL: [Column; 19] = [
        Column::Country,
        Column::Region,
        Column::City,
        Column::Isp,
        Column::Latitude,
        Column::Longitude,
        Column::Domain,
        Column::Zipcode,
        Column::Timezone,
        Column::NetSpeed,
        Column::IddCode,
        Column::AreaCode,
        Column::WeatherStationCode,
        Column::WeatherStationName,
        Column::Mcc,
        Column::Mnc,
        Column::MobileBrand,
        Column::Elevation,
        Column::UsageType,
    ];

    /// Result fields served by this column
    pub const fn fields(self) -> Fields {
        match self {
            Column::Country => Fields::COUNTRY,
            Column::Region => Fields::REGION,
            Column::City => Fields::CITY,
            Column::Isp => Fields::ISP,
            Column::Latitude => Fields::LATITUDE,
            Column::Longitude => Fields::LONGITUDE,
            Column::Domain => Fields::DOMAIN,
            Column::Zipcode => Fields::ZIPCODE,
            Column::Timezone => Fields::TIMEZONE,
            Column::NetSpeed => Fields::NET_SPEED,
            Column::IddCode => Fields::IDD_CODE,
            Column::AreaCode => Fields::AREA_CODE,
            Column::WeatherStationCode => Fields::WEATHER_STATION_CODE,
            Column::WeatherStationName => Fields::WEATHER_STATION_NAME,
            Column::Mcc => Fields::MCC,
            Column::Mnc => Fields::MNC,
            Column::MobileBrand => Fields::MOBILE_BRAND,
            Column::Elevation => Fields::ELEVATION,
            Column::UsageType => Fields::USAGE_TYPE,
        }
    }

    /// 1-based column number in a row of `db_type`, `None` if absent
    pub fn position(self, db_type: u8) -> Option<u8> {
        POSITIONS[self as usize]
            .get(usize::from(db_type))
            .copied()
            .filter(|&p| p != 0)
    }
}

#[rustfmt::skip]
const POSITIONS: [[u8; 25]; 19] = [
    //  -  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24
    [0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2], // country
    [0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3], // region
    [0, 0, 0, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4], // city
    [0, 0, 3, 0, 5, 0, 7, 5, 7, 0, 8, 0, 9, 0, 9, 0, 9, 0, 9, 7, 9, 0, 9, 7, 9], // isp
    [0, 0, 0, 0, 0, 5, 5, 0, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5], // latitude
    [0, 0, 0, 0, 0, 6, 6, 0, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6], // longitude
    [0, 0, 0, 0, 0, 0, 0, 6, 8, 0, 9, 0, 10, 0, 10, 0, 10, 0, 10, 8, 10, 0, 10, 8, 10], // domain
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 7, 7, 7, 0, 7, 7, 7, 0, 7, 0, 7, 7, 7, 0, 7], // zipcode
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 8, 7, 8, 8, 8, 7, 8, 0, 8, 8, 8, 0, 8], // timezone
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 11, 0, 11, 8, 11, 0, 11, 0, 11, 0, 11], // netspeed
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 12, 0, 12, 0, 12, 9, 12, 0, 12], // idd code
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 13, 0, 13, 0, 13, 10, 13, 0, 13], // area code
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 14, 0, 14, 0, 14, 0, 14], // weather code
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 15, 0, 15, 0, 15, 0, 15], // weather name
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 16, 0, 16, 9, 16], // mcc
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 17, 0, 17, 10, 17], // mnc
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11, 18, 0, 18, 11, 18], // mobile brand
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11, 19, 0, 19], // elevation
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 12, 20], // usage type
];

/// Fields supported by a database type, derived from the position table
///
/// Returns the empty set for unknown types.
pub const fn database_fields(db_type: u8) -> Fields {
    let t = db_type as usize;
    if t == 0 || t > MAX_DATABASE_TYPE as usize {
        return Fields::empty();
    }
    let mut bits = 0u32;
    let mut c = 0;
    while c < Column::ALL.len() {
        if POSITIONS[c][t] != 0 {
            bits |= Column::ALL[c].fields().bits();
        }
        c += 1;
    }
    Fields::from_bits_retain(bits)
}

/// A known BIN product, DB1 through DB24
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseType(u8);

impl DatabaseType {
    /// Wrap a product number, `None` outside 1..=24
    pub const fn new(number: u8) -> Option<Self> {
        if number == 0 || number > MAX_DATABASE_TYPE {
            None
        } else {
            Some(DatabaseType(number))
        }
    }

    /// Product number as stored in the header
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Composite mask of every field this product carries
    pub const fn fields(self) -> Fields {
        database_fields(self.0)
    }

    /// Every known product in ascending order
    pub fn all() -> impl Iterator<Item = DatabaseType> {
        (1..=MAX_DATABASE_TYPE).map(DatabaseType)
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DB{}", self.0)
    }
}

/// Resolved byte offsets of the attribute columns for one database type
///
/// Shared read-only by every query on a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    db_type: u8,
    offsets: [Option<u32>; 19],
}

impl ColumnLayout {
    /// Resolve the layout of a database type, `None` if the type is unknown
    pub fn for_database_type(db_type: u8) -> Option<Self> {
        if db_type == 0 || db_type > MAX_DATABASE_TYPE {
            return None;
        }
        let mut offsets = [None; 19];
        for (slot, column) in offsets.iter_mut().zip(Column::ALL) {
            *slot = column
                .position(db_type)
                .map(|p| u32::from(p - 1) * COLUMN_WIDTH);
        }
        Some(ColumnLayout { db_type, offsets })
    }

    /// Database type this layout was resolved for
    pub fn database_type(&self) -> DatabaseType {
        DatabaseType(self.db_type)
    }

    /// Byte offset of a column from the start of its row, if present
    #[inline]
    pub fn offset(&self, column: Column) -> Option<u32> {
        self.offsets[column as usize]
    }

    /// True if rows of this type carry the column
    pub fn is_present(&self, column: Column) -> bool {
        self.offset(column).is_some()
    }

    /// Every field this layout can serve
    pub fn supported_fields(&self) -> Fields {
        database_fields(self.db_type)
    }

    /// Present columns with their byte offsets, in table order
    pub fn columns(&self) -> impl Iterator<Item = (Column, u32)> + '_ {
        Column::ALL
            .iter()
            .filter_map(move |&c| self.offset(c).map(|o| (c, o)))
    }
}

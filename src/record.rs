//! Lookup results and row projection
//!
//! A matched row is never decoded as a whole. Only the requested columns
//! the database actually carries are read; everything else stays at its
//! default value.

use crate::error::Result;
use crate::fields::Fields;
use crate::layout::{Column, ColumnLayout};
use crate::storage::PositionalReader;
use log::debug;
use serde::Serialize;

/// The country name starts 3 bytes after the country code's pointer:
/// one length byte plus the two-letter code.
const COUNTRY_LONG_SKIP: u64 = 3;

/// Attributes of one address range
///
/// Sparse by design: fields that were not requested, or that the database
/// type does not carry, are empty strings or `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    /// Two-letter country code
    pub country_short: String,
    /// Country name
    pub country_long: String,
    /// Region or state
    pub region: String,
    /// City
    pub city: String,
    /// Internet service provider
    pub isp: String,
    /// Latitude in degrees
    pub latitude: f32,
    /// Longitude in degrees
    pub longitude: f32,
    /// Domain
    pub domain: String,
    /// ZIP code
    pub zipcode: String,
    /// Time zone offset
    pub timezone: String,
    /// Net speed
    pub net_speed: String,
    /// IDD code
    pub idd_code: String,
    /// Area code
    pub area_code: String,
    /// Weather station code
    pub weather_station_code: String,
    /// Weather station name
    pub weather_station_name: String,
    /// Mobile country code
    pub mcc: String,
    /// Mobile network code
    pub mnc: String,
    /// Mobile brand
    pub mobile_brand: String,
    /// Elevation in meters
    pub elevation: f32,
    /// Usage type
    pub usage_type: String,
}

impl Record {
    /// True if every field holds its default value
    pub fn is_empty(&self) -> bool {
        *self == Record::default()
    }

    /// Mutable access to the string field fed by a pointer column
    fn text_mut(&mut self, column: Column) -> Option<&mut String> {
        match column {
            Column::Region => Some(&mut self.region),
            Column::City => Some(&mut self.city),
            Column::Isp => Some(&mut self.isp),
            Column::Domain => Some(&mut self.domain),
            Column::Zipcode => Some(&mut self.zipcode),
            Column::Timezone => Some(&mut self.timezone),
            Column::NetSpeed => Some(&mut self.net_speed),
            Column::IddCode => Some(&mut self.idd_code),
            Column::AreaCode => Some(&mut self.area_code),
            Column::WeatherStationCode => Some(&mut self.weather_station_code),
            Column::WeatherStationName => Some(&mut self.weather_station_name),
            Column::Mcc => Some(&mut self.mcc),
            Column::Mnc => Some(&mut self.mnc),
            Column::MobileBrand => Some(&mut self.mobile_brand),
            Column::UsageType => Some(&mut self.usage_type),
            Column::Country | Column::Latitude | Column::Longitude | Column::Elevation => None,
        }
    }
}

/// Reads requested columns out of a matched row
pub struct FieldProjector<'a> {
    reader: PositionalReader<'a>,
    layout: &'a ColumnLayout,
}

impl<'a> FieldProjector<'a> {
    /// Create a projector for one database's layout
    pub fn new(reader: PositionalReader<'a>, layout: &'a ColumnLayout) -> Self {
        Self { reader, layout }
    }

    /// Build a record from the row whose columns start at `column_base`
    pub fn project(&self, column_base: u64, fields: Fields) -> Result<Record> {
        let mut record = Record::default();

        for (column, offset) in self.layout.columns() {
            if !fields.intersects(column.fields()) {
                continue;
            }
            let cell = column_base + u64::from(offset);

            match column {
                Column::Country => {
                    let pointer = u64::from(self.reader.read_u32(cell)?);
                    if fields.contains(Fields::COUNTRY_SHORT) {
                        record.country_short = self.read_text(pointer)?;
                    }
                    if fields.contains(Fields::COUNTRY_LONG) {
                        record.country_long = self.read_text(pointer + COUNTRY_LONG_SKIP)?;
                    }
                }
                Column::Latitude => record.latitude = self.reader.read_f32(cell)?,
                Column::Longitude => record.longitude = self.reader.read_f32(cell)?,
                Column::Elevation => {
                    let pointer = u64::from(self.reader.read_u32(cell)?);
                    record.elevation = parse_elevation(&self.read_text(pointer)?);
                }
                _ => {
                    let pointer = u64::from(self.reader.read_u32(cell)?);
                    let text = self.read_text(pointer)?;
                    if let Some(slot) = record.text_mut(column) {
                        *slot = text;
                    }
                }
            }
        }

        Ok(record)
    }

    fn read_text(&self, pointer: u64) -> Result<String> {
        let bytes = self.reader.read_pstring(pointer)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Elevation is stored as decimal text, unlike the binary coordinates.
/// Unparseable text yields `0.0`.
pub fn parse_elevation(text: &str) -> f32 {
    match text.parse::<f32>() {
        Ok(value) => value,
        Err(e) => {
            debug!("Unparseable elevation {:?}: {}", text, e);
            0.0
        }
    }
}

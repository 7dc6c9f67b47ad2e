//! Field selection masks
//!
//! Bit positions follow the historical API order so masks persisted by
//! older callers keep their meaning.

use bitflags::bitflags;

bitflags! {
    /// Set of requested or supported result fields.
    ///
    /// # Example
    ///
    /// ```
    /// use ip2location::Fields;
    ///
    /// let wanted = Fields::COUNTRY_SHORT | Fields::CITY;
    /// assert!(wanted.contains(Fields::CITY));
    /// assert!(Fields::COUNTRY.contains(Fields::COUNTRY_LONG));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Fields: u32 {
        /// Two-letter ISO 3166 country code
        const COUNTRY_SHORT        = 1 << 0;
        /// Country name
        const COUNTRY_LONG         = 1 << 1;
        /// Region or state name
        const REGION               = 1 << 2;
        /// City name
        const CITY                 = 1 << 3;
        /// Internet service provider
        const ISP                  = 1 << 4;
        /// Latitude in degrees
        const LATITUDE             = 1 << 5;
        /// Longitude in degrees
        const LONGITUDE            = 1 << 6;
        /// Registered domain
        const DOMAIN               = 1 << 7;
        /// ZIP or postal code
        const ZIPCODE              = 1 << 8;
        /// UTC offset, e.g. `-07:00`
        const TIMEZONE             = 1 << 9;
        /// Connection speed class (DIAL, DSL, COMP, T1)
        const NET_SPEED            = 1 << 10;
        /// International direct dialing code
        const IDD_CODE             = 1 << 11;
        /// Telephone area code
        const AREA_CODE            = 1 << 12;
        /// Weather station code
        const WEATHER_STATION_CODE = 1 << 13;
        /// Weather station name
        const WEATHER_STATION_NAME = 1 << 14;
        /// Mobile country code
        const MCC                  = 1 << 15;
        /// Mobile network code
        const MNC                  = 1 << 16;
        /// Mobile carrier brand
        const MOBILE_BRAND         = 1 << 17;
        /// Elevation above sea level in meters
        const ELEVATION            = 1 << 18;
        /// Usage type (COM, ORG, GOV, MIL, EDU, ...)
        const USAGE_TYPE           = 1 << 19;

        /// Both country fields, which share one column
        const COUNTRY = Self::COUNTRY_SHORT.bits() | Self::COUNTRY_LONG.bits();
    }
}

impl Fields {
    /// Parse a lowercase field name such as `country_short` or `mcc`
    ///
    /// `all` selects every field, `country` selects both country fields.
    pub fn from_field_name(name: &str) -> Option<Fields> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("all") {
            return Some(Fields::all());
        }
        Fields::from_name(&name.to_ascii_uppercase().replace('-', "_"))
    }

    /// Lowercase names of the single fields in this set
    pub fn field_names(&self) -> Vec<String> {
        self.iter_names()
            .filter(|(_, flag)| flag.bits().is_power_of_two())
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }
}

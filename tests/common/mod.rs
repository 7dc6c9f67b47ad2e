//! Synthetic BIN database writer shared by the integration tests
//!
//! Produces files in the on-disk layout the reader expects:
//!
//! ```text
//! header | IPv4 rows + end row | IPv6 rows + end row | IPv4 index | IPv6 index | strings
//! ```

#![allow(dead_code)]

use ip2location::{Column, ColumnLayout, IpFamily, HEADER_LEN};
use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr};
use tempfile::NamedTempFile;

const INDEX_BUCKETS: u128 = 1 << 16;

/// Value stored in one column of a row
#[derive(Debug, Clone)]
pub enum Cell {
    /// Country code and name, stored back to back
    Country(String, String),
    /// Length-prefixed string in the string area
    Text(String),
    /// Inline `f32`
    Float(f32),
}

pub fn country(short: &str, long: &str) -> (Column, Cell) {
    (Column::Country, Cell::Country(short.to_string(), long.to_string()))
}

pub fn text(column: Column, value: &str) -> (Column, Cell) {
    (column, Cell::Text(value.to_string()))
}

pub fn float(column: Column, value: f32) -> (Column, Cell) {
    (column, Cell::Float(value))
}

pub fn v4(text: &str) -> u128 {
    u128::from(u32::from(text.parse::<Ipv4Addr>().unwrap()))
}

pub fn v6(text: &str) -> u128 {
    u128::from(text.parse::<Ipv6Addr>().unwrap())
}

struct Range {
    from: u128,
    cells: Vec<(Column, Cell)>,
}

#[derive(Default)]
struct FamilyRows {
    ranges: Vec<Range>,
    end: u128,
    indexed: bool,
}

/// Builder for an in-memory BIN file
pub struct BinFixture {
    db_type: u8,
    date: (u8, u8, u8),
    v4: FamilyRows,
    v6: FamilyRows,
}

impl BinFixture {
    pub fn new(db_type: u8) -> Self {
        Self {
            db_type,
            date: (24, 6, 1),
            v4: FamilyRows::default(),
            v6: FamilyRows::default(),
        }
    }

    pub fn date(mut self, year: u8, month: u8, day: u8) -> Self {
        self.date = (year, month, day);
        self
    }

    /// Add a range starting at `from`; it ends where the next one starts
    pub fn range(mut self, family: IpFamily, from: u128, cells: Vec<(Column, Cell)>) -> Self {
        self.rows_mut(family).ranges.push(Range { from, cells });
        self
    }

    /// Exclusive end of the last range
    pub fn end(mut self, family: IpFamily, end: u128) -> Self {
        self.rows_mut(family).end = end;
        self
    }

    /// Emit an index table for the family
    pub fn index(mut self, family: IpFamily) -> Self {
        self.rows_mut(family).indexed = true;
        self
    }

    fn rows_mut(&mut self, family: IpFamily) -> &mut FamilyRows {
        match family {
            IpFamily::V4 => &mut self.v4,
            IpFamily::V6 => &mut self.v6,
        }
    }

    pub fn column_count(&self) -> u32 {
        Column::ALL
            .iter()
            .filter_map(|c| c.position(self.db_type))
            .max()
            .map_or(1, u32::from)
    }

    pub fn build(mut self) -> Vec<u8> {
        let layout = ColumnLayout::for_database_type(self.db_type).unwrap();
        let columns = self.column_count();
        let row_sizes = [columns * 4, 16 + (columns - 1) * 4];

        self.v4.ranges.sort_by_key(|r| r.from);
        self.v6.ranges.sort_by_key(|r| r.from);
        let families = [(&self.v4, IpFamily::V4), (&self.v6, IpFamily::V6)];

        // Place the tables first so string pointers are known up front
        let mut cursor = HEADER_LEN;
        let mut bases = [0u32; 2];
        for (i, (rows, _)) in families.iter().enumerate() {
            if !rows.ranges.is_empty() {
                bases[i] = cursor as u32 + 1;
                cursor += (rows.ranges.len() + 1) * row_sizes[i] as usize;
            }
        }
        let mut index_bases = [0u32; 2];
        for (i, (rows, _)) in families.iter().enumerate() {
            if rows.indexed && !rows.ranges.is_empty() {
                index_bases[i] = cursor as u32 + 1;
                cursor += (INDEX_BUCKETS * 8) as usize;
            }
        }

        let mut strings = StringArea::new(cursor);
        let mut data = vec![self.db_type, columns as u8, self.date.0, self.date.1, self.date.2];
        for value in [
            self.v4.ranges.len() as u32,
            bases[0],
            self.v6.ranges.len() as u32,
            bases[1],
            index_bases[0],
            index_bases[1],
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        assert_eq!(data.len(), HEADER_LEN);

        for (i, (rows, family)) in families.iter().enumerate() {
            if rows.ranges.is_empty() {
                continue;
            }
            for range in &rows.ranges {
                let row = encode_row(*family, row_sizes[i], range.from, &range.cells, &layout, &mut strings);
                data.extend_from_slice(&row);
            }
            // the end row only closes the last range
            let mut end_row = vec![0u8; row_sizes[i] as usize];
            write_address(&mut end_row, *family, rows.end);
            data.extend_from_slice(&end_row);
        }
        for (i, (rows, family)) in families.iter().enumerate() {
            if index_bases[i] != 0 {
                let froms: Vec<u128> = rows.ranges.iter().map(|r| r.from).collect();
                data.extend_from_slice(&encode_index(*family, &froms));
            }
        }

        assert_eq!(data.len(), strings.start);
        data.extend_from_slice(&strings.bytes);
        data
    }
}

fn encode_row(
    family: IpFamily,
    row_size: u32,
    from: u128,
    cells: &[(Column, Cell)],
    layout: &ColumnLayout,
    strings: &mut StringArea,
) -> Vec<u8> {
    let mut row = vec![0u8; row_size as usize];
    let shift = write_address(&mut row, family, from);

    for (column, offset) in layout.columns() {
        let cell = cells.iter().find(|(c, _)| *c == column).map(|(_, cell)| cell);
        let bytes = match (cell, column) {
            (Some(Cell::Country(short, long)), _) => strings.push_country(short, long).to_le_bytes(),
            (Some(Cell::Text(value)), _) => strings.push(value).to_le_bytes(),
            (Some(Cell::Float(value)), _) => value.to_le_bytes(),
            (None, Column::Latitude | Column::Longitude) => 0f32.to_le_bytes(),
            (None, Column::Country) => strings.push_country("", "").to_le_bytes(),
            (None, _) => strings.push("").to_le_bytes(),
        };
        let at = shift + offset as usize;
        row[at..at + 4].copy_from_slice(&bytes);
    }
    row
}

/// Write the range start and return the column shift for the family
fn write_address(row: &mut [u8], family: IpFamily, from: u128) -> usize {
    match family {
        IpFamily::V4 => {
            row[..4].copy_from_slice(&(from as u32).to_le_bytes());
            0
        }
        IpFamily::V6 => {
            row[..16].copy_from_slice(&from.to_le_bytes());
            12
        }
    }
}

/// One `[low, high]` row bound pair per top-16-bit bucket
fn encode_index(family: IpFamily, froms: &[u128]) -> Vec<u8> {
    let shift = match family {
        IpFamily::V4 => 16,
        IpFamily::V6 => 112,
    };
    let span = (1u128 << shift) - 1;

    let mut out = Vec::with_capacity((INDEX_BUCKETS * 8) as usize);
    for bucket in 0..INDEX_BUCKETS {
        let first = bucket << shift;
        let last = first | span;
        let low = froms.partition_point(|&f| f <= first).saturating_sub(1);
        let high = froms.partition_point(|&f| f <= last).saturating_sub(1);
        out.extend_from_slice(&(low as u32).to_le_bytes());
        out.extend_from_slice(&(high as u32).to_le_bytes());
    }
    out
}

struct StringArea {
    start: usize,
    bytes: Vec<u8>,
}

impl StringArea {
    fn new(start: usize) -> Self {
        Self {
            start,
            bytes: Vec::new(),
        }
    }

    /// Append a length-prefixed string, returning its 0-based file position
    fn push(&mut self, value: &str) -> u32 {
        assert!(value.len() <= 255);
        let pointer = (self.start + self.bytes.len()) as u32;
        self.bytes.push(value.len() as u8);
        self.bytes.extend_from_slice(value.as_bytes());
        pointer
    }

    /// Country code padded to 3 bytes, immediately followed by the name
    fn push_country(&mut self, short: &str, long: &str) -> u32 {
        assert!(short.len() <= 2);
        let pointer = self.push(short);
        self.bytes.resize(self.bytes.len() + 2 - short.len(), 0);
        self.push(long);
        pointer
    }
}

pub fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

/// DB3 file with [0, 100) in Los Angeles and [100, 200) in Paris
pub fn db3_sample() -> Vec<u8> {
    BinFixture::new(3)
        .range(
            IpFamily::V4,
            0,
            vec![
                country("US", "United States"),
                text(Column::Region, "CA"),
                text(Column::City, "LA"),
            ],
        )
        .range(
            IpFamily::V4,
            100,
            vec![
                country("FR", "France"),
                text(Column::Region, "IDF"),
                text(Column::City, "Paris"),
            ],
        )
        .end(IpFamily::V4, 200)
        .build()
}

/// Every column filled in, as a DB24 row would carry them
pub fn full_cells(city: &str) -> Vec<(Column, Cell)> {
    vec![
        country("US", "United States of America"),
        text(Column::Region, "California"),
        text(Column::City, city),
        text(Column::Isp, "Google LLC"),
        float(Column::Latitude, 37.40599),
        float(Column::Longitude, -122.078514),
        text(Column::Domain, "google.com"),
        text(Column::Zipcode, "94043"),
        text(Column::Timezone, "-07:00"),
        text(Column::NetSpeed, "T1"),
        text(Column::IddCode, "1"),
        text(Column::AreaCode, "650"),
        text(Column::WeatherStationCode, "USCA0746"),
        text(Column::WeatherStationName, "Mountain View"),
        text(Column::Mcc, "-"),
        text(Column::Mnc, "-"),
        text(Column::MobileBrand, "-"),
        text(Column::Elevation, "32"),
        text(Column::UsageType, "DCH"),
    ]
}

/// DB24 file with IPv4 and IPv6 ranges, optionally indexed
pub fn db24_sample(indexed: bool) -> Vec<u8> {
    let mut fixture = BinFixture::new(24)
        .range(IpFamily::V4, v4("1.0.0.0"), full_cells("Brisbane"))
        .range(IpFamily::V4, v4("8.8.8.0"), full_cells("Mountain View"))
        .range(IpFamily::V4, v4("8.8.9.0"), full_cells("Sunnyvale"))
        .range(IpFamily::V4, v4("200.0.0.0"), full_cells("Sao Paulo"))
        .end(IpFamily::V4, v4("223.255.255.255"))
        .range(IpFamily::V6, v6("2001:db8::"), full_cells("Documentation"))
        .range(IpFamily::V6, v6("2001:4860::"), full_cells("Mountain View"))
        .range(IpFamily::V6, v6("2001:4861::"), full_cells("Elsewhere"))
        .end(IpFamily::V6, v6("2001:4862::"));
    if indexed {
        fixture = fixture.index(IpFamily::V4).index(IpFamily::V6);
    }
    fixture.build()
}

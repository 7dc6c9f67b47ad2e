#![no_main]
use ip2location::{Database, Fields};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

// DB3 file: header, two IPv4 rows plus end row, then strings
fn sample_database() -> Vec<u8> {
    const HEADER_LEN: usize = 29;
    let rows = [(0u32, "US", "United States", "CA", "LA"), (100, "FR", "France", "IDF", "Paris")];
    let strings_start = HEADER_LEN + 3 * 16;

    let mut table = Vec::new();
    let mut strings: Vec<u8> = Vec::new();
    let push = |strings: &mut Vec<u8>, s: &str| {
        let pointer = (strings_start + strings.len()) as u32;
        strings.push(s.len() as u8);
        strings.extend_from_slice(s.as_bytes());
        pointer
    };
    for (from, short, long, region, city) in rows {
        let country = push(&mut strings, short);
        push(&mut strings, long);
        let region = push(&mut strings, region);
        let city = push(&mut strings, city);
        for value in [from, country, region, city] {
            table.extend_from_slice(&value.to_le_bytes());
        }
    }
    table.extend_from_slice(&[200u8, 0, 0, 0]);
    table.extend_from_slice(&[0u8; 12]);

    let mut data = vec![3u8, 4, 24, 1, 1];
    for value in [2u32, HEADER_LEN as u32 + 1, 0, 0, 0, 0] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data.extend_from_slice(&table);
    data.extend_from_slice(&strings);
    data
}

static DB: OnceLock<Database> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let db = DB.get_or_init(|| Database::from_bytes(sample_database()).unwrap());

    // Arbitrary query text: either parses or is an InvalidAddress error
    let text = String::from_utf8_lossy(data);
    if let Ok(Some(record)) = db.lookup(&text, Fields::all()) {
        assert!(!record.country_short.is_empty());
    }

    // Masks with bits outside the known fields are harmless
    if data.len() >= 4 {
        let bits = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let _ = db.query("0.0.0.42", Fields::from_bits_retain(bits));
    }
});

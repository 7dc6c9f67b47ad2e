use anyhow::{bail, Result};
use ip2location::{Fields, Record};
use serde_json::{json, Map, Value};

/// Parse a comma-separated field list such as `country_short,city`
pub fn parse_fields(list: &str) -> Result<Fields> {
    let mut fields = Fields::empty();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match Fields::from_field_name(name) {
            Some(f) => fields |= f,
            None => bail!(
                "Unknown field '{}'. Valid fields: all, country, {}",
                name,
                Fields::all().field_names().join(", ")
            ),
        }
    }
    if fields.is_empty() {
        bail!("No fields given");
    }
    Ok(fields)
}

/// Requested fields of a record, in mask bit order
fn requested_values(record: &Record, fields: Fields) -> Result<Vec<(String, Value)>> {
    let full = serde_json::to_value(record)?;
    Ok(fields
        .field_names()
        .into_iter()
        .filter_map(|name| {
            let value = full.get(&name).map(tidy_float)?;
            Some((name, value))
        })
        .collect())
}

/// Requested fields of a record as a JSON object
pub fn record_to_json(record: &Record, fields: Fields) -> Result<Value> {
    let map: Map<String, Value> = requested_values(record, fields)?.into_iter().collect();
    Ok(Value::Object(map))
}

/// Requested fields of a record as `(name, text)` pairs
pub fn record_to_pairs(record: &Record, fields: Fields) -> Result<Vec<(String, String)>> {
    Ok(requested_values(record, fields)?
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name, text)
        })
        .collect())
}

/// Coordinates are stored as `f32`; print them at that precision
fn tidy_float(value: &Value) -> Value {
    match value.as_f64() {
        Some(f) if value.is_f64() => {
            let short = (f as f32).to_string();
            short.parse::<f64>().map(|v| json!(v)).unwrap_or_else(|_| value.clone())
        }
        _ => value.clone(),
    }
}

pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

use anyhow::{Context, Result};
use ip2location::{Database, StorageMode};
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::{parse_fields, record_to_json, record_to_pairs};

pub fn cmd_query(
    database: PathBuf,
    addresses: Vec<String>,
    fields: Option<String>,
    json_output: bool,
    quiet: bool,
    in_memory: bool,
) -> Result<()> {
    let storage = if in_memory {
        StorageMode::InMemory
    } else {
        StorageMode::Mmap
    };
    let db = Database::builder(&database)
        .storage(storage)
        .build()
        .with_context(|| format!("Failed to load database: {}", database.display()))?;

    let fields = match fields {
        Some(list) => parse_fields(&list)?,
        None => db.supported_fields(),
    };

    let mut all_found = true;
    let mut results = Vec::with_capacity(addresses.len());

    for address in &addresses {
        let record = db
            .lookup(address, fields)
            .with_context(|| format!("Query failed for: {}", address))?;
        all_found &= record.is_some();

        if quiet {
            continue;
        }

        if json_output {
            let value = match &record {
                Some(r) => record_to_json(r, fields)?,
                None => serde_json::Value::Null,
            };
            results.push(json!({
                "ip": address,
                "found": record.is_some(),
                "record": value,
            }));
        } else {
            println!("{}", address);
            match &record {
                Some(r) => {
                    for (name, text) in record_to_pairs(r, fields)? {
                        println!("  {:<22} {}", format!("{}:", name), text);
                    }
                }
                None => println!("  not found"),
            }
        }
    }

    if json_output && !quiet {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    std::process::exit(if all_found { 0 } else { 1 });
}

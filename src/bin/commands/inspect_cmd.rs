use anyhow::{Context, Result};
use ip2location::{Database, IpFamily};
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::format_number;

pub fn cmd_inspect(database: PathBuf, json_output: bool) -> Result<()> {
    let db = Database::open(&database)
        .with_context(|| format!("Failed to load database: {}", database.display()))?;

    let header = db.header();
    let supported = db.supported_fields().field_names();

    if json_output {
        let table_json = |family: IpFamily| {
            let table = header.table(family);
            json!({
                "rows": table.row_count,
                "base": table.base,
                "index_base": table.index_base,
                "row_size": table.row_size,
            })
        };

        let output = json!({
            "file": database.display().to_string(),
            "database_type": db.database_type().to_string(),
            "release_date": header.release_date(),
            "column_count": header.column_count(),
            "ipv4": table_json(IpFamily::V4),
            "ipv6": table_json(IpFamily::V6),
            "fields": supported,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Database: {}", database.display());
    println!("Type:     {}", db.database_type());
    println!("Released: {}", header.release_date());
    println!("Columns:  {}", header.column_count());
    println!();

    for family in [IpFamily::V4, IpFamily::V6] {
        let table = header.table(family);
        if table.row_count == 0 {
            println!("{}: ✗", family);
            continue;
        }
        println!("{}: ✓", family);
        println!("  Rows:      {}", format_number(u64::from(table.row_count)));
        println!("  Row size:  {} bytes", table.row_size);
        println!(
            "  Index:     {}",
            if table.has_index() { "✓" } else { "✗" }
        );
    }

    println!();
    println!("Fields:");
    for name in supported {
        println!("  {}", name);
    }

    Ok(())
}

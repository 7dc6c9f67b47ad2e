mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_inspect, cmd_query};

#[derive(Parser)]
#[command(name = "ip2location")]
#[command(
    about = "Look up IP addresses in IP2Location BIN databases",
    long_about = "ip2location - Geolocation lookups against IP2Location BIN databases\n\n\
    Reads any of the DB1 through DB24 products, IPv4 and IPv6, with or without\n\
    an index. Files are memory-mapped by default.\n\n\
    Examples:\n\
      ip2location query IP2LOCATION-LITE-DB11.BIN 8.8.8.8\n\
      ip2location query DB3.BIN 1.1.1.1 2606:4700::1111 --fields country,city --json\n\
      ip2location inspect IP2LOCATION-LITE-DB11.BIN"
)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more addresses
    Query {
        /// Path to the BIN database
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// IPv4 or IPv6 addresses to look up
        #[arg(value_name = "IP", required = true)]
        addresses: Vec<String>,

        /// Comma-separated fields to return (e.g. country_short,city,latitude)
        /// Default: every field the database carries
        #[arg(short, long, value_name = "LIST")]
        fields: Option<String>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,

        /// Quiet mode - no output, only exit code (0 = all found, 1 = otherwise)
        #[arg(short, long)]
        quiet: bool,

        /// Read the whole file into memory instead of mapping it
        #[arg(long)]
        in_memory: bool,
    },

    /// Show the header and capabilities of a database
    Inspect {
        /// Path to the BIN database
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Query {
            database,
            addresses,
            fields,
            json,
            quiet,
            in_memory,
        } => cmd_query(database, addresses, fields, json, quiet, in_memory),
        Commands::Inspect { database, json } => cmd_inspect(database, json),
    }
}

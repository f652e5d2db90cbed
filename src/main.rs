//! w3a CLI - Command-line interface
//!
//! Encodes coordinates to three-word addresses and back, one at a time or
//! for whole CSV files.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use w3a_rs::{
    Codec, CodecConfig, CodecError, CsvAddressConfig, Dictionary, csv_to_address_csv,
    init_logging,
};

#[derive(Parser)]
#[command(name = "w3a")]
#[command(about = "Convert coordinates to three-word addresses and back", long_about = None)]
struct Args {
    /// Word list, one word per line
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// JSON codec configuration (grid step, scramble keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the address of the cell containing a coordinate
    Encode {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Print the center and bounds of the cell named by an address
    Decode {
        /// Three words separated by '.'
        address: String,
    },
    /// Convert a CSV file
    Csv {
        #[command(subcommand)]
        command: CsvCommand,
    },
}

#[derive(Subcommand)]
enum CsvCommand {
    /// Add an address column from latitude/longitude columns
    Encode {
        input: PathBuf,
        output: PathBuf,

        #[arg(long, default_value = "lat")]
        lat_column: String,

        #[arg(long, default_value = "lon")]
        lon_column: String,

        /// Columns to drop from the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
    /// Add lat/lon columns from an address column
    Decode {
        input: PathBuf,
        output: PathBuf,

        #[arg(long, default_value = "address")]
        address_column: String,

        /// Columns to drop from the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let Some(dictionary_path) = args.dictionary.as_deref() else {
        eprintln!("Error: --dictionary <PATH> is required");
        process::exit(1);
    };

    let codec = match build_codec(dictionary_path, args.config.as_deref()) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("Error loading codec: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&codec, args.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_codec(dictionary_path: &Path, config_path: Option<&Path>) -> Result<Codec, CodecError> {
    let config = match config_path {
        Some(path) => CodecConfig::from_path(path)?,
        None => CodecConfig::default(),
    };
    let grid = config.build_grid()?;
    let dictionary = Dictionary::from_path(dictionary_path, grid.total_cells())?;
    Codec::from_config(&config, Arc::new(dictionary))
}

fn run(codec: &Codec, command: Command) -> Result<(), CodecError> {
    match command {
        Command::Encode { lat, lon } => {
            println!("{}", codec.encode(&(lat, lon))?);
        }
        Command::Decode { address } => {
            let cell = codec.locate(&address)?;
            let (min, max) = (cell.bounds.min(), cell.bounds.max());
            println!("Address: {}", cell.address);
            println!("  Center: {}, {}", cell.lat(), cell.lon());
            println!("  Cell: row={}, col={}", cell.row, cell.col);
            println!("  Bounds: ({}, {}) to ({}, {})", min.y, min.x, max.y, max.x);
        }
        Command::Csv { command } => {
            let (input, output, config) = match command {
                CsvCommand::Encode {
                    input,
                    output,
                    lat_column,
                    lon_column,
                    exclude,
                } => (
                    input,
                    output,
                    CsvAddressConfig::from_coords(lat_column, lon_column).exclude(exclude),
                ),
                CsvCommand::Decode {
                    input,
                    output,
                    address_column,
                    exclude,
                } => (
                    input,
                    output,
                    CsvAddressConfig::from_address(address_column).exclude(exclude),
                ),
            };
            let rows = csv_to_address_csv(&input, &output, codec, &config)?;
            println!("Wrote {} rows to {}", rows, output.display());
        }
    }
    Ok(())
}

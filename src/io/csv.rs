use crate::api::codec::Codec;
use crate::error::CodecError;
use csv::StringRecord;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Rows converted per parallel batch.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// For the type of source in the file
enum SourceIndices {
    Coordinates { lat_idx: usize, lon_idx: usize },
    Address(usize),
}

/// Specifies which columns of a CSV row feed the codec.
#[derive(Debug, Clone)]
pub enum CsvSource {
    /// Separate latitude and longitude columns, encoded into an `address` column
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
    /// A three-word address column, decoded into `lat` and `lon` columns
    AddressColumn(String),
}

/// Configuration for CSV conversion.
#[derive(Debug, Clone)]
pub struct CsvAddressConfig {
    pub source: CsvSource,
    pub exclude_columns: Vec<String>,
    pub chunk_size: usize,
}

impl CsvAddressConfig {
    /// Create config for encoding a CSV with latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use w3a_rs::CsvAddressConfig;
    ///
    /// let config = CsvAddressConfig::from_coords("Latitude", "Longitude")
    ///     .exclude(vec!["Notes".into()]);
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self {
            source: CsvSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lon_column: lon_column.into(),
            },
            exclude_columns: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create config for decoding a CSV with an address column.
    pub fn from_address(address_column: impl Into<String>) -> Self {
        Self {
            source: CsvSource::AddressColumn(address_column.into()),
            exclude_columns: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

pub trait CsvToAddresses {
    fn to_address_csv(
        &self,
        output_path: impl AsRef<Path>,
        codec: &Codec,
        config: &CsvAddressConfig,
    ) -> Result<usize, CodecError>;
}

impl<P: AsRef<Path>> CsvToAddresses for P {
    fn to_address_csv(
        &self,
        output_path: impl AsRef<Path>,
        codec: &Codec,
        config: &CsvAddressConfig,
    ) -> Result<usize, CodecError> {
        csv_to_address_csv(self, output_path, codec, config)
    }
}

/// Converts a CSV file between coordinates and three-word addresses.
///
/// Encoding writes an `address` column followed by the remaining input
/// columns; decoding writes `lat` and `lon` columns followed by the
/// remaining input columns. Source columns and `exclude_columns` are
/// dropped. Rows are read in chunks of `chunk_size` and each chunk is
/// converted in parallel, so memory stays bounded for large files and
/// output order matches input order.
///
/// Returns the number of data rows written. The first row that fails to
/// convert aborts the conversion with its error.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use w3a_rs::{Codec, CodecConfig, CsvAddressConfig, Dictionary, Grid, csv_to_address_csv};
///
/// # fn main() -> Result<(), w3a_rs::CodecError> {
/// let dictionary = Dictionary::from_path("words.txt", Grid::default().total_cells())?;
/// let codec = Codec::from_config(&CodecConfig::default(), Arc::new(dictionary))?;
///
/// let config = CsvAddressConfig::from_coords("Latitude", "Longitude");
/// csv_to_address_csv("stops.csv", "stops_addressed.csv", &codec, &config)?;
/// # Ok(())
/// # }
/// ```
pub fn csv_to_address_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    codec: &Codec,
    config: &CsvAddressConfig,
) -> Result<usize, CodecError> {
    let file = File::open(csv_path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CodecError::Csv(format!("Column '{}' not found", name)))
    };

    let (source_indices, mut exclude_indices, prefix) = match &config.source {
        CsvSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = find(lat_column)?;
            let lon_idx = find(lon_column)?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
                vec!["address"],
            )
        }
        CsvSource::AddressColumn(column) => {
            let idx = find(column)?;
            (
                SourceIndices::Address(idx),
                HashSet::from([idx]),
                vec!["lat", "lon"],
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path)?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = prefix;
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer.write_record(&header_row)?;

    let chunk_size = config.chunk_size.max(1);
    let mut records = reader.records();
    let mut written = 0;

    loop {
        let chunk: Vec<StringRecord> = records
            .by_ref()
            .take(chunk_size)
            .collect::<Result<_, _>>()?;
        if chunk.is_empty() {
            break;
        }

        let rows: Vec<Vec<String>> = chunk
            .par_iter()
            .map(|record| convert_record(record, &source_indices, &exclude_indices, codec))
            .collect::<Result<_, _>>()?;

        for row in &rows {
            writer.write_record(row)?;
        }
        written += rows.len();
        debug!(rows = rows.len(), total = written, "chunk converted");
    }

    writer.flush()?;
    info!(rows = written, "csv conversion finished");

    Ok(written)
}

fn convert_record(
    record: &StringRecord,
    source: &SourceIndices,
    exclude: &HashSet<usize>,
    codec: &Codec,
) -> Result<Vec<String>, CodecError> {
    let field = |idx: usize| {
        record
            .get(idx)
            .map(str::trim)
            .ok_or_else(|| CodecError::Csv(format!("Missing column at index {}", idx)))
    };

    let mut row = match source {
        SourceIndices::Coordinates { lat_idx, lon_idx } => {
            let lat = parse_degrees(field(*lat_idx)?, "latitude")?;
            let lon = parse_degrees(field(*lon_idx)?, "longitude")?;
            vec![codec.encode(&(lat, lon))?]
        }
        SourceIndices::Address(idx) => {
            let center = codec.decode(field(*idx)?)?;
            vec![center.lat.to_string(), center.lon.to_string()]
        }
    };

    for (i, value) in record.iter().enumerate() {
        if !exclude.contains(&i) {
            row.push(value.to_string());
        }
    }

    Ok(row)
}

fn parse_degrees(value: &str, axis: &str) -> Result<f64, CodecError> {
    value
        .parse()
        .map_err(|_| CodecError::Csv(format!("Invalid {}: '{}'", axis, value)))
}

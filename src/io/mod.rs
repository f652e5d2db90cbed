pub mod csv;

pub use self::csv::{CsvAddressConfig, CsvSource, CsvToAddresses, DEFAULT_CHUNK_SIZE, csv_to_address_csv};

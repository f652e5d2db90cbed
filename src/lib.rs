//! # w3a-rs
//!
//! Reversible three-word addresses for every ~3 metre cell on Earth.
//!
//! The globe is cut into an equirectangular grid of fixed-size cells. Each
//! cell id is passed through a fixed permutation so that neighbouring cells
//! get unrelated ids, then written as three base-`N` digits where `N` is the
//! size of a word list. Decoding runs the same steps backwards and returns
//! the center of the cell.
//!
//! There are currently three main entry points.
//!
//! ### 1. `Codec` - Encode and Decode
//!
//! ```
//! use std::sync::Arc;
//! use w3a_rs::{Codec, CodecConfig, Dictionary, GridConfig};
//!
//! # fn main() -> Result<(), w3a_rs::CodecError> {
//! let words = ["ant", "bee", "cat", "dog", "elk", "fox", "gnu", "hen"];
//! let config = CodecConfig::new().with_grid(GridConfig::new(22.5, 0.25));
//! let codec = Codec::from_config(&config, Arc::new(Dictionary::from_words(words, 512)?))?;
//!
//! let address = codec.encode(&(53.481, -2.248))?;
//! let center = codec.decode(&address)?;
//! println!("{} -> ({}, {})", address, center.lat, center.lon);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Cell` - Cell Geometry
//!
//! ```
//! use std::sync::Arc;
//! use w3a_rs::{Codec, CodecConfig, Dictionary, GridConfig};
//!
//! # fn main() -> Result<(), w3a_rs::CodecError> {
//! # let words = ["ant", "bee", "cat", "dog", "elk", "fox", "gnu", "hen"];
//! # let config = CodecConfig::new().with_grid(GridConfig::new(22.5, 0.25));
//! # let codec = Codec::from_config(&config, Arc::new(Dictionary::from_words(words, 512)?))?;
//! let cell = codec.locate("elk.dog.gnu")?;
//! let polygon = cell.to_polygon();
//! assert_eq!(polygon.exterior().coords().count(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `csv_to_address_csv` - CSV File Conversion
//!
//! ```no_run
//! use std::sync::Arc;
//! use w3a_rs::{Codec, CodecConfig, CsvAddressConfig, CsvToAddresses, Dictionary, Grid};
//!
//! # fn main() -> Result<(), w3a_rs::CodecError> {
//! let dictionary = Dictionary::from_path("words.txt", Grid::default().total_cells())?;
//! let codec = Codec::from_config(&CodecConfig::default(), Arc::new(dictionary))?;
//!
//! let config = CsvAddressConfig::from_coords("Latitude", "Longitude");
//! "input.csv".to_address_csv("output.csv", &codec, &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Address format
//!
//! An address is only meaningful for the exact dictionary, grid step and
//! scramble keys that produced it. Changing any of them re-labels every cell.
//! With the default grid (`1/36000°` latitude step, doubled longitude step)
//! the dictionary needs at least [`Grid::min_radix`] = 34 758 words.

pub mod api;
pub mod coord;
pub mod core;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod io;
pub mod logging;

pub use api::{Cell, Codec, CodecConfig};
pub use coord::{Coordinate, LatLon};
pub use core::{
    ADDRESS_DELIMITER, ADDRESS_FORMAT_VERSION, DEFAULT_LON_STEP_FACTOR, DEFAULT_SCRAMBLE_KEYS,
    DEFAULT_STEP_DEGREES, Grid, GridConfig, LAT_RANGE, LON_RANGE, MIN_SCRAMBLE_ROUNDS,
};
pub use dictionary::Dictionary;
pub use error::{CodecError, DictionaryError, GridError, PackError, ScrambleError};
pub use index::{ScrambleConfig, Scrambler, WordTriple, from_words, pack, to_words, unpack};
pub use io::{CsvAddressConfig, CsvSource, CsvToAddresses, csv_to_address_csv};
pub use logging::init_logging;

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    const TOY_WORDS: [&str; 8] = ["ant", "bee", "cat", "dog", "elk", "fox", "gnu", "hen"];

    #[test]
    fn test_end_to_end_workflow() -> Result<(), CodecError> {
        let config = CodecConfig::new().with_grid(GridConfig::new(22.5, 0.25));
        let grid = config.build_grid()?;
        let dictionary = Arc::new(Dictionary::from_words(TOY_WORDS, grid.total_cells())?);
        let codec = Codec::from_config(&config, Arc::clone(&dictionary))?;

        let coord = (53.48082746395233, -2.2479699500757597);
        let address = codec.encode(&coord)?;

        // Same path, one component at a time.
        let cell_id = grid.cell_of(&coord)?;
        let scrambled = codec.scrambler().scramble(cell_id)?;
        let triple = pack(scrambled, dictionary.radix())?;
        assert_eq!(to_words(triple, &dictionary)?, address);

        let parsed = from_words(&address, &dictionary)?;
        assert_eq!(parsed, triple);
        assert_eq!(unpack(parsed, dictionary.radix())?, scrambled);
        assert_eq!(codec.scrambler().unscramble(scrambled)?, cell_id);
        assert_eq!(codec.decode(&address)?, grid.center_of(cell_id)?);
        Ok(())
    }

    #[test]
    fn test_every_toy_cell_has_unique_triple() -> Result<(), CodecError> {
        let config = CodecConfig::new().with_grid(GridConfig::new(22.5, 0.25));
        let codec = Codec::from_config(&config, Arc::new(Dictionary::from_words(TOY_WORDS, 512)?))?;

        let addresses: HashSet<String> = (0..codec.grid().total_cells())
            .map(|id| codec.encode_cell(id))
            .collect::<Result<_, _>>()?;
        assert_eq!(addresses.len(), 512);
        Ok(())
    }

    #[test]
    fn test_using_geo_types_point() -> Result<(), CodecError> {
        let config = CodecConfig::new().with_grid(GridConfig::new(22.5, 0.25));
        let codec = Codec::from_config(&config, Arc::new(Dictionary::from_words(TOY_WORDS, 512)?))?;

        let pt = geo_types::point! { x: -2.248, y: 53.481 };
        assert_eq!(codec.encode(&pt)?, codec.encode(&(53.481, -2.248))?);

        let center: geo_types::Point<f64> = codec.decode(&codec.encode(&pt)?)?.into();
        assert_eq!(codec.encode(&center)?, codec.encode(&pt)?);
        Ok(())
    }

    #[test]
    fn test_custom_scramble_keys_change_addresses() -> Result<(), CodecError> {
        let dictionary = Arc::new(Dictionary::from_words(TOY_WORDS, 512)?);
        let grid = GridConfig::new(22.5, 0.25);
        let a = Codec::from_config(&CodecConfig::new().with_grid(grid), Arc::clone(&dictionary))?;
        let b = Codec::from_config(
            &CodecConfig::new()
                .with_grid(grid)
                .with_scramble(ScrambleConfig::new(vec![1, 2, 3, 4])),
            dictionary,
        )?;

        let differing = (0..512)
            .filter(|&id| a.encode_cell(id).ok() != b.encode_cell(id).ok())
            .count();
        assert!(differing > 400);
        Ok(())
    }
}

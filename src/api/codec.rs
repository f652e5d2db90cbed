use crate::api::cell::Cell;
use crate::api::config::CodecConfig;
use crate::coord::{Coordinate, LatLon};
use crate::core::grid::Grid;
use crate::dictionary::Dictionary;
use crate::error::{CodecError, DictionaryError};
use crate::index::pack::{from_words, pack, to_words, unpack};
use crate::index::scramble::Scrambler;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{info, trace};

/// Converts between coordinates and three-word addresses.
///
/// Encoding runs `grid cell -> scramble -> base-N digits -> words`,
/// decoding runs the same steps backwards and returns the cell center.
/// The codec holds no mutable state: it is `Send + Sync` and can be shared
/// across threads (e.g. behind an `Arc`) without locking.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use w3a_rs::{Codec, CodecConfig, Dictionary, GridConfig};
///
/// # fn main() -> Result<(), w3a_rs::CodecError> {
/// let words = ["ant", "bee", "cat", "dog", "elk", "fox", "gnu", "hen"];
/// let config = CodecConfig::new().with_grid(GridConfig::new(22.5, 0.25));
/// let dictionary = Arc::new(Dictionary::from_words(words, 512)?);
/// let codec = Codec::from_config(&config, dictionary)?;
///
/// let address = codec.encode(&(-90.0, -180.0))?;
/// assert_eq!(address, "elk.dog.gnu");
///
/// let center = codec.decode(&address)?;
/// assert_eq!((center.lat, center.lon), (-78.75, -177.1875));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Codec {
    grid: Grid,
    scrambler: Scrambler,
    dictionary: Arc<Dictionary>,
}

impl Codec {
    /// Assembles a codec from its parts.
    ///
    /// # Errors
    ///
    /// - [`CodecError::DomainMismatch`] - the scrambler does not cover exactly the grid's cells
    /// - [`DictionaryError::TooSmall`] - the dictionary cannot address every cell
    pub fn new(
        grid: Grid,
        scrambler: Scrambler,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, CodecError> {
        if scrambler.domain() != grid.total_cells() {
            return Err(CodecError::DomainMismatch {
                scrambler: scrambler.domain(),
                grid: grid.total_cells(),
            });
        }
        if dictionary.capacity() < grid.total_cells() as u128 {
            return Err(DictionaryError::TooSmall {
                size: dictionary.len(),
                capacity: dictionary.capacity(),
                required: grid.total_cells(),
            }
            .into());
        }

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            words = dictionary.len(),
            rounds = scrambler.rounds(),
            "codec ready"
        );

        Ok(Self {
            grid,
            scrambler,
            dictionary,
        })
    }

    /// Builds the grid and scrambler described by `config`.
    pub fn from_config(
        config: &CodecConfig,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, CodecError> {
        config.validate()?;
        let grid = config.build_grid()?;
        let scrambler = Scrambler::new(&config.scramble, grid.total_cells())?;
        Self::new(grid, scrambler, dictionary)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scrambler(&self) -> &Scrambler {
        &self.scrambler
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Returns the address of the cell containing `coord`.
    pub fn encode<C: Coordinate>(&self, coord: &C) -> Result<String, CodecError> {
        let cell_id = self.grid.cell_of(coord)?;
        self.encode_cell(cell_id)
    }

    /// Returns the center of the cell named by `address`.
    pub fn decode(&self, address: &str) -> Result<LatLon, CodecError> {
        let cell_id = self.decode_cell(address)?;
        Ok(self.grid.center_of(cell_id)?)
    }

    /// Returns the address of a cell id.
    pub fn encode_cell(&self, cell_id: u64) -> Result<String, CodecError> {
        let scrambled = self.scrambler.scramble(cell_id)?;
        let triple = pack(scrambled, self.dictionary.radix())?;
        let address = to_words(triple, &self.dictionary)?;
        trace!(cell_id, scrambled, %address, "encoded");
        Ok(address)
    }

    /// Returns the cell id named by `address`.
    pub fn decode_cell(&self, address: &str) -> Result<u64, CodecError> {
        let triple = from_words(address, &self.dictionary)?;
        let scrambled = unpack(triple, self.dictionary.radix())?;
        let cell_id = self.scrambler.unscramble(scrambled)?;
        trace!(address, scrambled, cell_id, "decoded");
        Ok(cell_id)
    }

    /// Returns the full cell containing `coord`.
    pub fn cell_at<C: Coordinate>(&self, coord: &C) -> Result<Cell, CodecError> {
        let cell_id = self.grid.cell_of(coord)?;
        let address = self.encode_cell(cell_id)?;
        self.cell(cell_id, address)
    }

    /// Returns the full cell named by `address`, with the address in
    /// canonical form.
    pub fn locate(&self, address: &str) -> Result<Cell, CodecError> {
        let cell_id = self.decode_cell(address)?;
        let canonical = self.encode_cell(cell_id)?;
        self.cell(cell_id, canonical)
    }

    /// Encodes many coordinates in parallel; results keep the input order.
    pub fn encode_batch<C>(&self, coords: &[C]) -> Vec<Result<String, CodecError>>
    where
        C: Coordinate + Sync,
    {
        coords.par_iter().map(|coord| self.encode(coord)).collect()
    }

    /// Decodes many addresses in parallel; results keep the input order.
    pub fn decode_batch<S>(&self, addresses: &[S]) -> Vec<Result<LatLon, CodecError>>
    where
        S: AsRef<str> + Sync,
    {
        addresses
            .par_iter()
            .map(|address| self.decode(address.as_ref()))
            .collect()
    }

    fn cell(&self, cell_id: u64, address: String) -> Result<Cell, CodecError> {
        Ok(Cell::new(
            cell_id,
            address,
            self.grid.center_of(cell_id)?,
            self.grid.row_col(cell_id)?,
            self.grid.bounds(cell_id)?,
        ))
    }
}

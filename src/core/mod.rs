pub mod constants;
pub mod grid;

pub use constants::{
    ADDRESS_DELIMITER, ADDRESS_FORMAT_VERSION, DEFAULT_LON_STEP_FACTOR, DEFAULT_SCRAMBLE_KEYS,
    DEFAULT_STEP_DEGREES, LAT_RANGE, LON_RANGE, MIN_SCRAMBLE_ROUNDS,
};
pub use grid::{Grid, GridConfig};

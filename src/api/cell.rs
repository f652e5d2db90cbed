use crate::coord::LatLon;
use geo_types::{Point, Polygon, Rect};

/// A single addressed cell of the grid.
///
/// Produced by [`Codec::cell_at`](crate::Codec::cell_at) and
/// [`Codec::locate`](crate::Codec::locate). Carries everything a map view
/// needs to draw and label the cell.
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
/// let codec = Codec::from_config(&config, Arc::new(Dictionary::from_words(words, 512)?))?;
///
/// let cell = codec.cell_at(&(51.5, -0.1))?;
/// println!("{} at ({}, {})", cell.address, cell.lat(), cell.lon());
///
/// // Convert the cell to a polygon for GIS operations (like drawing it on a map)
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Row-major cell id (before scrambling)
    pub id: u64,
    /// Three-word address of the cell
    pub address: String,
    /// Cell center in degrees
    pub center: LatLon,
    /// Row index, 0 at the south pole
    pub row: u64,
    /// Column index, 0 at -180° longitude
    pub col: u64,
    /// Cell boundary with `x = lon, y = lat`
    pub bounds: Rect<f64>,
}

impl Cell {
    pub(crate) fn new(
        id: u64,
        address: String,
        center: LatLon,
        (row, col): (u64, u64),
        bounds: Rect<f64>,
    ) -> Self {
        Self {
            id,
            address,
            center,
            row,
            col,
            bounds,
        }
    }

    pub fn lat(&self) -> f64 {
        self.center.lat
    }

    pub fn lon(&self) -> f64 {
        self.center.lon
    }

    /// Returns the center as a `geo_types::Point` (`x = lon, y = lat`).
    pub fn to_point(&self) -> Point<f64> {
        self.center.to_point()
    }

    /// Converts this cell to a closed rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }
}

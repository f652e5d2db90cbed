use crate::coord::{Coordinate, LatLon};
use crate::core::constants::{
    DEFAULT_LON_STEP_FACTOR, DEFAULT_STEP_DEGREES, LAT_RANGE, LON_RANGE, STEP_EPSILON,
};
use crate::error::GridError;
use geo_types::{Rect, coord};
use serde::{Deserialize, Serialize};

/// Largest row or column count; keeps cell edges exactly representable.
const MAX_DIVISIONS: f64 = (1u64 << 40) as f64;

/// Angular resolution of the grid.
///
/// `step_degrees` is the cell height. The cell width is
/// `step_degrees * lon_step_factor`; the default factor of 2 doubles the
/// longitude step so cells are roughly square at 60° latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub step_degrees: f64,
    pub lon_step_factor: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step_degrees: DEFAULT_STEP_DEGREES,
            lon_step_factor: DEFAULT_LON_STEP_FACTOR,
        }
    }
}

impl GridConfig {
    pub fn new(step_degrees: f64, lon_step_factor: f64) -> Self {
        Self {
            step_degrees,
            lon_step_factor,
        }
    }
}

/// Equirectangular partition of the globe into `rows * cols` cells.
///
/// Cells are numbered row-major from the south-west corner:
/// `cell_id = row * cols + col`, row 0 touching the south pole and
/// column 0 touching the antimeridian at -180°.
///
/// # Example
///
/// ```
/// use w3a_rs::{Grid, GridConfig};
///
/// # fn main() -> Result<(), w3a_rs::GridError> {
/// let grid = Grid::new(&GridConfig::new(22.5, 0.25))?;
/// assert_eq!(grid.total_cells(), 512);
///
/// let id = grid.cell_of(&(51.5, -0.1))?;
/// let center = grid.center_of(id)?;
/// assert_eq!(grid.cell_of(&center)?, id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    rows: u64,
    cols: u64,
    total_cells: u64,
    lat_step: f64,
    lon_step: f64,
}

impl Default for Grid {
    fn default() -> Self {
        // 6 480 000 x 6 480 000
        let rows = (180.0 / DEFAULT_STEP_DEGREES).round() as u64;
        let cols = (360.0 / (DEFAULT_STEP_DEGREES * DEFAULT_LON_STEP_FACTOR)).round() as u64;
        Self {
            rows,
            cols,
            total_cells: rows * cols,
            lat_step: 180.0 / rows as f64,
            lon_step: 360.0 / cols as f64,
        }
    }
}

impl Grid {
    /// Builds a grid from an angular step.
    ///
    /// Row and column counts are the number of steps that cover the domain,
    /// rounded up unless the step divides it (within `1e-6`). The effective
    /// steps are then recomputed from the counts so every cell has the same
    /// size and the last row/column ends exactly at 90°/180°.
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        let lat_span = LAT_RANGE[1] - LAT_RANGE[0];
        let lon_span = LON_RANGE[1] - LON_RANGE[0];

        let rows = divisions(lat_span, config.step_degrees, "latitude")?;
        let cols = divisions(
            lon_span,
            config.step_degrees * config.lon_step_factor,
            "longitude",
        )?;

        Self::with_dimensions(rows, cols)
    }

    /// Builds a grid with an explicit number of rows and columns.
    pub fn with_dimensions(rows: u64, cols: u64) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidStep(format!(
                "grid needs at least one row and column, got {} x {}",
                rows, cols
            )));
        }
        let total_cells = rows
            .checked_mul(cols)
            .ok_or(GridError::TooManyCells { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            total_cells,
            lat_step: (LAT_RANGE[1] - LAT_RANGE[0]) / rows as f64,
            lon_step: (LON_RANGE[1] - LON_RANGE[0]) / cols as f64,
        })
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn cols(&self) -> u64 {
        self.cols
    }

    pub fn total_cells(&self) -> u64 {
        self.total_cells
    }

    /// Effective cell height in degrees.
    pub fn lat_step(&self) -> f64 {
        self.lat_step
    }

    /// Effective cell width in degrees.
    pub fn lon_step(&self) -> f64 {
        self.lon_step
    }

    /// Smallest dictionary size `n` with `n^3 >= total_cells`.
    pub fn min_radix(&self) -> u64 {
        let total = self.total_cells as u128;
        let mut n = (self.total_cells as f64).cbrt().ceil() as u128;
        while n > 1 && (n - 1).pow(3) >= total {
            n -= 1;
        }
        while n.pow(3) < total {
            n += 1;
        }
        n as u64
    }

    /// Converts a coordinate to grid row/column indices.
    ///
    /// Points on the north pole or on the +180° meridian fall in the last
    /// row or column.
    pub fn row_col_of<C: Coordinate>(&self, coord: &C) -> Result<(u64, u64), GridError> {
        let lat = coord.lat();
        let lon = coord.lon();

        if !(LAT_RANGE[0]..=LAT_RANGE[1]).contains(&lat) {
            return Err(GridError::OutOfRange(format!("latitude {}", lat)));
        }
        if !(LON_RANGE[0]..=LON_RANGE[1]).contains(&lon) {
            return Err(GridError::OutOfRange(format!("longitude {}", lon)));
        }

        let row = (((lat - LAT_RANGE[0]) / self.lat_step).floor() as u64).min(self.rows - 1);
        let col = (((lon - LON_RANGE[0]) / self.lon_step).floor() as u64).min(self.cols - 1);

        Ok((row, col))
    }

    /// Returns the id of the cell containing the coordinate.
    pub fn cell_of<C: Coordinate>(&self, coord: &C) -> Result<u64, GridError> {
        let (row, col) = self.row_col_of(coord)?;
        Ok(row * self.cols + col)
    }

    /// Combines row and column into a cell id.
    pub fn cell_id(&self, row: u64, col: u64) -> Result<u64, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfRange(format!(
                "row {} col {} outside {} x {} grid",
                row, col, self.rows, self.cols
            )));
        }
        Ok(row * self.cols + col)
    }

    /// Splits a cell id into row and column.
    pub fn row_col(&self, cell_id: u64) -> Result<(u64, u64), GridError> {
        if cell_id >= self.total_cells {
            return Err(GridError::OutOfRange(format!(
                "cell id {} >= {}",
                cell_id, self.total_cells
            )));
        }
        Ok((cell_id / self.cols, cell_id % self.cols))
    }

    /// Returns the midpoint of a cell.
    ///
    /// Lossy: the original point inside the cell is not recoverable.
    pub fn center_of(&self, cell_id: u64) -> Result<LatLon, GridError> {
        let (row, col) = self.row_col(cell_id)?;
        let lat = LAT_RANGE[0] + (row as f64 + 0.5) * self.lat_step;
        let lon = LON_RANGE[0] + (col as f64 + 0.5) * self.lon_step;
        Ok(LatLon::new(lat, lon))
    }

    /// Returns the cell boundary as a lon/lat rectangle (`x = lon, y = lat`).
    pub fn bounds(&self, cell_id: u64) -> Result<Rect<f64>, GridError> {
        let (row, col) = self.row_col(cell_id)?;
        let min_lat = LAT_RANGE[0] + row as f64 * self.lat_step;
        let min_lon = LON_RANGE[0] + col as f64 * self.lon_step;
        let max_lat = (min_lat + self.lat_step).min(LAT_RANGE[1]);
        let max_lon = (min_lon + self.lon_step).min(LON_RANGE[1]);

        Ok(Rect::new(
            coord! { x: min_lon, y: min_lat },
            coord! { x: max_lon, y: max_lat },
        ))
    }
}

fn divisions(span: f64, step: f64, axis: &str) -> Result<u64, GridError> {
    if !step.is_finite() || step <= 0.0 || step > span {
        return Err(GridError::InvalidStep(format!(
            "{} step {} must be in (0, {}]",
            axis, step, span
        )));
    }

    let exact = span / step;
    let nearest = exact.round();
    let count = if (exact - nearest).abs() < STEP_EPSILON {
        nearest
    } else {
        exact.ceil()
    };

    if count > MAX_DIVISIONS {
        return Err(GridError::InvalidStep(format!(
            "{} step {} is too fine",
            axis, step
        )));
    }

    Ok(count as u64)
}

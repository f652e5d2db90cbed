use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Trait for types that can provide a latitude/longitude pair in degrees.
///
/// Implemented for `(f64, f64)` tuples read as `(lat, lon)`, for
/// `geo_types::Point<f64>` read as `x = lon, y = lat`, and for [`LatLon`].
/// This allows the codec to accept any of them.
pub trait Coordinate {
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
    /// Returns the longitude in degrees.
    fn lon(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }
    fn lon(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn lat(&self) -> f64 {
        self.y()
    }
    fn lon(&self) -> f64 {
        self.x()
    }
}

/// A latitude/longitude pair in degrees.
///
/// Returned by decoding; always the center of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Converts to a `geo_types::Point` with `x = lon, y = lat`.
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl Coordinate for LatLon {
    fn lat(&self) -> f64 {
        self.lat
    }
    fn lon(&self) -> f64 {
        self.lon
    }
}

impl From<LatLon> for Point<f64> {
    fn from(value: LatLon) -> Self {
        value.to_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (51.5, -0.1);
        assert_eq!(tuple.lat(), 51.5);
        assert_eq!(tuple.lon(), -0.1);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(-0.1, 51.5);
        assert_eq!(point.lat(), 51.5);
        assert_eq!(point.lon(), -0.1);
    }

    #[test]
    fn test_latlon_to_point_swaps_axes() {
        let ll = LatLon::new(53.48, -2.25);
        let pt: Point<f64> = ll.into();
        assert_eq!(pt.x(), -2.25);
        assert_eq!(pt.y(), 53.48);
        assert_eq!(pt.lat(), ll.lat());
    }
}

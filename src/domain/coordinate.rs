use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// No range validation is applied; callers supply well-formed values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Tuples are read in KML order: (lon, lat)
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.lon, y: c.lat }
    }
}

/// A standalone point extracted from a KML `Point` geometry.
///
/// Purely informational: points of interest never take part in containment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub position: Coordinate,
}

impl PointOfInterest {
    pub fn new(position: Coordinate) -> Self {
        Self { position }
    }
}

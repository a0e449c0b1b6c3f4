use geo::BoundingRect;
use serde::Serialize;

use crate::domain::{Coordinate, Polygon};

/// Bounding box of a boundary in degrees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Bounding box of a polygon's vertices, `None` for an empty ring
    pub fn of_polygon(polygon: &Polygon) -> Option<Self> {
        let rect = polygon.to_geo().bounding_rect()?;
        Some(Self {
            min_lon: rect.min().x,
            max_lon: rect.max().x,
            min_lat: rect.min().y,
            max_lat: rect.max().y,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_polygon() {
        let poly = Polygon::from(vec![(73.831, 17.175), (73.833, 17.175), (73.833, 17.177)]);
        let bounds = Bounds::of_polygon(&poly).unwrap();

        assert_eq!(bounds.min_lon, 73.831);
        assert_eq!(bounds.max_lon, 73.833);
        assert_eq!(bounds.min_lat, 17.175);
        assert_eq!(bounds.max_lat, 17.177);
        assert!((bounds.width() - 0.002).abs() < 1e-9);
        assert!((bounds.center().lat - 17.176).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_of_empty_polygon() {
        assert!(Bounds::of_polygon(&Polygon::new(Vec::new())).is_none());
    }
}

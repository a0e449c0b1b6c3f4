use serde::Serialize;

use super::{Coordinate, PointOfInterest};

/// A closed ring of vertices; the last vertex connects back to the first.
///
/// Winding order does not matter for containment. Rings with fewer than three
/// distinct vertices are accepted but give unreliable containment results,
/// see [`Polygon::is_degenerate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub vertices: Vec<Coordinate>,
}

impl Polygon {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the ring has fewer than three distinct vertices.
    pub fn is_degenerate(&self) -> bool {
        let mut distinct: Vec<Coordinate> = Vec::with_capacity(3);
        for v in &self.vertices {
            if !distinct.contains(v) {
                distinct.push(*v);
                if distinct.len() >= 3 {
                    return false;
                }
            }
        }
        true
    }

    /// The same ring starting at `start` (wrapping around).
    pub fn rotated(&self, start: usize) -> Self {
        let mut vertices = self.vertices.clone();
        if !vertices.is_empty() {
            let n = vertices.len();
            vertices.rotate_left(start % n);
        }
        Self { vertices }
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let ring: geo::LineString<f64> = self
            .vertices
            .iter()
            .map(|&c| geo::Coord::from(c))
            .collect();
        geo::Polygon::new(ring, Vec::new())
    }
}

impl From<Vec<(f64, f64)>> for Polygon {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(Coordinate::from).collect())
    }
}

/// The result of parsing one KML document.
///
/// Both collections follow document order. Built once by the extractor and
/// never mutated afterwards, so it can be shared read-only across threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundarySet {
    pub polygons: Vec<Polygon>,
    pub points: Vec<PointOfInterest>,
}

impl BoundarySet {
    pub fn new(polygons: Vec<Polygon>, points: Vec<PointOfInterest>) -> Self {
        Self { polygons, points }
    }

    /// The boundary the source tooling monitors against: the first polygon.
    pub fn primary(&self) -> Option<&Polygon> {
        self.polygons.first()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.points.is_empty()
    }
}

pub mod boundary;
pub mod coordinate;

pub use boundary::{BoundarySet, Polygon};
pub use coordinate::{Coordinate, PointOfInterest};

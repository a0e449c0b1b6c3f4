pub mod bounds;
pub mod containment;
pub mod projection;
#[cfg(feature = "utm")]
pub mod utm;

pub use bounds::Bounds;
pub use containment::contains;
pub use projection::{CoordinateProjector, ProjectedCoordinate, ProjectionConfig, UtmProjector};

//! kmlfence - KML geofences and return-to-home decisions

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod kml;
pub mod monitor;

pub use domain::{BoundarySet, Coordinate, PointOfInterest, Polygon};
pub use error::{Error, Result};
pub use geometry::{CoordinateProjector, ProjectedCoordinate, ProjectionConfig, UtmProjector, contains};
pub use kml::{extract, extract_file};
pub use monitor::{GeofenceMonitor, GeofenceStatus, check_geofence, should_return_to_home};

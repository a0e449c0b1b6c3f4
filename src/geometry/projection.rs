use serde::Serialize;

use crate::domain::Coordinate;
use crate::error::{Error, Result};

/// A coordinate in UTM: meters within a zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedCoordinate {
    pub easting: f64,
    pub northing: f64,
    pub zone_number: u8,
    pub zone_letter: char,
}

/// Whether a projection backend can be used in this process
///
/// Built once at startup and handed to whichever component projects
/// coordinates; there is no global switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionConfig {
    pub available: bool,
}

impl ProjectionConfig {
    /// Probe the build for the UTM backend
    pub fn detect() -> Self {
        Self {
            available: cfg!(feature = "utm"),
        }
    }

    pub fn disabled() -> Self {
        Self { available: false }
    }

    /// Narrow the probed capability with a user setting; never widens it
    pub fn with_enabled(self, enabled: bool) -> Self {
        Self {
            available: self.available && enabled,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::detect()
    }
}

/// Converts geographic coordinates into a locally flat system
///
/// Output is one-to-one and order-preserving with the input. A missing
/// backend must surface as [`Error::Unavailable`], never as zeroed output.
pub trait CoordinateProjector {
    fn project(&self, coordinates: &[Coordinate]) -> Result<Vec<ProjectedCoordinate>>;
}

/// WGS84 -> UTM projector, zone picked per coordinate
#[derive(Debug, Clone)]
pub struct UtmProjector {
    config: ProjectionConfig,
}

impl UtmProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn is_available(&self) -> bool {
        self.config.available && cfg!(feature = "utm")
    }

    /// Project a single coordinate
    pub fn project_one(&self, coordinate: Coordinate) -> Result<ProjectedCoordinate> {
        if !self.is_available() {
            return Err(Error::Unavailable);
        }

        project_utm(coordinate)
    }
}

#[cfg(feature = "utm")]
fn project_utm(coordinate: Coordinate) -> Result<ProjectedCoordinate> {
    super::utm::from_lon_lat(coordinate)
}

#[cfg(not(feature = "utm"))]
fn project_utm(_coordinate: Coordinate) -> Result<ProjectedCoordinate> {
    Err(Error::Unavailable)
}

impl CoordinateProjector for UtmProjector {
    fn project(&self, coordinates: &[Coordinate]) -> Result<Vec<ProjectedCoordinate>> {
        if !self.is_available() {
            return Err(Error::Unavailable);
        }

        coordinates
            .iter()
            .map(|&c| self.project_one(c))
            .collect()
    }
}

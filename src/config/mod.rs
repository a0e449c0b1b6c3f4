use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::Coordinate;
use crate::geometry::ProjectionConfig;

fn default_polygon() -> usize {
    0
}
fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// KML document holding the boundary
    #[serde(default)]
    pub kml: Option<PathBuf>,
    /// Test positions as `[lon, lat]` pairs
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
    /// Index of the polygon used as the active boundary
    #[serde(default = "default_polygon")]
    pub polygon: usize,
    #[serde(default)]
    pub utm: bool,
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub projection: Option<ProjectionSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProjectionSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for ProjectionSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

impl FileConfig {
    /// First config file found in the usual locations
    pub fn load() -> Option<Self> {
        get_config_paths()
            .into_iter()
            .find_map(|path| Self::load_from(&path))
    }

    /// Read one config file, warning (not failing) on bad TOML
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                None
            }
        }
    }

    pub fn test_points(&self) -> Vec<Coordinate> {
        self.points
            .iter()
            .map(|&[lon, lat]| Coordinate::new(lon, lat))
            .collect()
    }

    /// Capability probe narrowed by the `[projection]` section
    pub fn projection_config(&self) -> ProjectionConfig {
        let enabled = self
            .projection
            .as_ref()
            .map(|p| p.enabled)
            .unwrap_or(true);
        ProjectionConfig::detect().with_enabled(enabled)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("kmlfence.toml"));
    paths.push(PathBuf::from(".kmlfence.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("kmlfence").join("config.toml"));
        paths.push(config_dir.join("kmlfence.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".kmlfence.toml"));
    }

    paths
}

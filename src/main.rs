use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use kmlfence::config::FileConfig;
use kmlfence::geometry::{Bounds, CoordinateProjector, ProjectedCoordinate, UtmProjector};
use kmlfence::kml::{extract_file, parse_coordinate_token};
use kmlfence::monitor::{GeofenceMonitor, GeofenceStatus};
use kmlfence::{BoundarySet, Coordinate};

/// Check positions against a KML geofence and flag return-to-home
///
/// Examples:
///   # List the boundaries in a mission file
///   kmlfence --kml field.kml
///
///   # Test two positions against the first polygon
///   kmlfence --kml field.kml -p 73.8320,17.1759 -p 73.8300,17.1750
///
///   # Use the second polygon and show UTM coordinates
///   kmlfence --kml field.kml --polygon 1 --utm -p 73.8318,17.1761
#[derive(Parser, Debug)]
#[command(name = "kmlfence")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches kmlfence.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// KML file holding the geofence
    #[arg(short = 'k', long)]
    kml: Option<PathBuf>,

    /// Position to test as lon,lat (repeatable)
    #[arg(short = 'p', long = "point", value_parser = parse_point, allow_hyphen_values = true)]
    points: Vec<Coordinate>,

    /// Index of the polygon used as the active boundary
    #[arg(long)]
    polygon: Option<usize>,

    /// Also print UTM coordinates for the boundary and test points
    #[arg(long)]
    utm: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_point(s: &str) -> std::result::Result<Coordinate, String> {
    parse_coordinate_token(s).ok_or_else(|| format!("expected lon,lat but got '{}'", s))
}

#[derive(Debug, Serialize)]
struct Report {
    kml: PathBuf,
    polygons: usize,
    points_of_interest: usize,
    boundary_index: Option<usize>,
    boundary_utm: Option<Vec<ProjectedCoordinate>>,
    checks: Vec<PointCheck>,
}

#[derive(Debug, Serialize)]
struct PointCheck {
    position: Coordinate,
    status: GeofenceStatus,
    rth: bool,
    utm: Option<ProjectedCoordinate>,
    utm_error: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str::<FileConfig>(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let kml_path = args
        .kml
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.kml.clone()));
    let points = if !args.points.is_empty() {
        args.points.clone()
    } else {
        file_config
            .as_ref()
            .map(|c| c.test_points())
            .unwrap_or_default()
    };
    let polygon_index = args
        .polygon
        .or_else(|| file_config.as_ref().map(|c| c.polygon))
        .unwrap_or(0);
    let utm = args.utm || file_config.as_ref().map(|c| c.utm).unwrap_or(false);
    let json = args.json || file_config.as_ref().map(|c| c.json).unwrap_or(false);
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let projection = file_config
        .as_ref()
        .map(|c| c.projection_config())
        .unwrap_or_default();

    let Some(kml_path) = kml_path else {
        bail!("Must provide --kml or set `kml` in the config file");
    };

    if !json {
        println!("kmlfence - KML Geofence Check");
        println!("=============================");
        println!();
    }

    if verbose && !json {
        println!("Configuration:");
        println!("  KML: {}", kml_path.display());
        println!("  Active polygon: {}", polygon_index);
        println!("  Test points: {}", points.len());
        println!(
            "  UTM output: {}",
            if utm { "enabled" } else { "disabled" }
        );
        println!(
            "  Projection backend: {}",
            if projection.available {
                "available"
            } else {
                "unavailable"
            }
        );
        println!();
    }

    let spinner = create_spinner("Parsing KML boundaries...", json);
    let start = Instant::now();
    let boundaries = extract_file(&kml_path)
        .with_context(|| format!("Failed to extract boundaries from {}", kml_path.display()))?;
    spinner.finish_with_message(format!(
        "Parsed {} polygons, {} points [{:.1}s]",
        boundaries.polygons.len(),
        boundaries.points.len(),
        start.elapsed().as_secs_f32()
    ));

    if verbose && !json {
        print_boundaries(&boundaries);
    }

    let projector = UtmProjector::new(projection);

    let monitor = GeofenceMonitor::from_boundary_set_at(&boundaries, polygon_index);
    let Some(monitor) = monitor else {
        if !points.is_empty() {
            bail!(
                "No polygon at index {} in {} ({} found); cannot check positions",
                polygon_index,
                kml_path.display(),
                boundaries.polygons.len()
            );
        }
        if json {
            let report = Report {
                kml: kml_path,
                polygons: boundaries.polygons.len(),
                points_of_interest: boundaries.points.len(),
                boundary_index: None,
                boundary_utm: None,
                checks: Vec::new(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("No polygon boundary found.");
        }
        return Ok(());
    };

    if monitor.boundary().is_degenerate() {
        eprintln!(
            "Warning: polygon {} has fewer than 3 distinct vertices; containment results are unreliable",
            polygon_index
        );
    }

    if verbose && !json {
        if let Some(bounds) = Bounds::of_polygon(monitor.boundary()) {
            println!(
                "Active boundary: {} vertices, lon {:.6}..{:.6}, lat {:.6}..{:.6}",
                monitor.boundary().len(),
                bounds.min_lon,
                bounds.max_lon,
                bounds.min_lat,
                bounds.max_lat
            );
        }
    }

    let boundary_utm = if utm {
        match projector.project(&monitor.boundary().vertices) {
            Ok(projected) => {
                if !json {
                    println!();
                    println!("Boundary in UTM:");
                    for p in &projected {
                        println!("  {}", format_utm(p));
                    }
                }
                Some(projected)
            }
            Err(e) => {
                eprintln!("Warning: UTM conversion of boundary failed: {}", e);
                None
            }
        }
    } else {
        None
    };

    if !json && !points.is_empty() {
        println!();
        println!("Checking {} positions:", points.len());
    }

    let mut checks = Vec::with_capacity(points.len());
    for position in points {
        let status = monitor.status(position);
        let rth = monitor.should_return_to_home(position);

        let (point_utm, utm_error) = if utm {
            match projector.project_one(position) {
                Ok(p) => (Some(p), None),
                Err(e) => {
                    eprintln!(
                        "Warning: UTM conversion failed for ({}, {}): {}",
                        position.lon, position.lat, e
                    );
                    (None, Some(e.to_string()))
                }
            }
        } else {
            (None, None)
        };

        if !json {
            println!(
                "  ({:.6}, {:.6}) inside boundary: {}",
                position.lon,
                position.lat,
                status == GeofenceStatus::Inside
            );
            if rth {
                println!("    Outside geofence! Trigger RTH.");
            }
            if let Some(ref p) = point_utm {
                println!("    UTM: {}", format_utm(p));
            }
        }

        checks.push(PointCheck {
            position,
            status,
            rth,
            utm: point_utm,
            utm_error,
        });
    }

    if json {
        let report = Report {
            kml: kml_path,
            polygons: boundaries.polygons.len(),
            points_of_interest: boundaries.points.len(),
            boundary_index: Some(polygon_index),
            boundary_utm,
            checks,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let breaches = checks.iter().filter(|c| c.rth).count();
        println!();
        println!("Done! {} of {} positions breach the geofence.", breaches, checks.len());
    }

    Ok(())
}

fn print_boundaries(boundaries: &BoundarySet) {
    for (i, polygon) in boundaries.polygons.iter().enumerate() {
        println!("  Polygon {}: {} vertices", i, polygon.len());
    }
    for (i, point) in boundaries.points.iter().enumerate() {
        println!(
            "  Point {}: ({:.6}, {:.6})",
            i, point.position.lon, point.position.lat
        );
    }
}

fn format_utm(p: &ProjectedCoordinate) -> String {
    format!(
        "{:.2}E {:.2}N zone {}{}",
        p.easting, p.northing, p.zone_number, p.zone_letter
    )
}

fn create_spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

//! WGS84 -> UTM forward projection
//!
//! Series expansion of the transverse Mercator projection (Snyder, 1987),
//! accurate to well under a metre inside a zone.

use super::projection::ProjectedCoordinate;
use crate::domain::Coordinate;
use crate::error::{Error, Result};

/// Scale factor on the central meridian
const K0: f64 = 0.9996;
/// WGS84 semi-major axis in meters
const R: f64 = 6_378_137.0;
/// WGS84 first eccentricity squared
const E: f64 = 0.006_694_38;
const E2: f64 = E * E;
const E3: f64 = E2 * E;
const E_P2: f64 = E / (1.0 - E);

const M1: f64 = 1.0 - E / 4.0 - 3.0 * E2 / 64.0 - 5.0 * E3 / 256.0;
const M2: f64 = 3.0 * E / 8.0 + 3.0 * E2 / 32.0 + 45.0 * E3 / 1024.0;
const M3: f64 = 15.0 * E2 / 256.0 + 45.0 * E3 / 1024.0;
const M4: f64 = 35.0 * E3 / 3072.0;

const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Latitude bands C..X, 8 degrees each; X is stretched to 84N
const ZONE_LETTERS: &[u8] = b"CDEFGHJKLMNPQRSTUVWXX";

pub fn from_lon_lat(c: Coordinate) -> Result<ProjectedCoordinate> {
    let (lon, lat) = (c.lon, c.lat);

    if !(-80.0..=84.0).contains(&lat) {
        return Err(Error::Projection {
            message: format!("latitude {lat} outside UTM range (-80, 84)"),
        });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(Error::Projection {
            message: format!("longitude {lon} outside range (-180, 180)"),
        });
    }

    let zone_number = zone_number(lon, lat);
    let zone_letter = zone_letter(lat);

    let lat_rad = lat.to_radians();
    let lat_sin = lat_rad.sin();
    let lat_cos = lat_rad.cos();
    let lat_tan = lat_rad.tan();
    let lat_tan2 = lat_tan * lat_tan;
    let lat_tan4 = lat_tan2 * lat_tan2;

    let central_lon_rad = central_meridian(zone_number).to_radians();

    let n = R / (1.0 - E * lat_sin * lat_sin).sqrt();
    let c = E_P2 * lat_cos * lat_cos;

    let a = lat_cos * wrap_angle(lon.to_radians() - central_lon_rad);
    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let m = R
        * (M1 * lat_rad - M2 * (2.0 * lat_rad).sin() + M3 * (4.0 * lat_rad).sin()
            - M4 * (6.0 * lat_rad).sin());

    let easting = K0
        * n
        * (a + a3 / 6.0 * (1.0 - lat_tan2 + c)
            + a5 / 120.0 * (5.0 - 18.0 * lat_tan2 + lat_tan4 + 72.0 * c - 58.0 * E_P2))
        + FALSE_EASTING;

    let mut northing = K0
        * (m + n
            * lat_tan
            * (a2 / 2.0
                + a4 / 24.0 * (5.0 - lat_tan2 + 9.0 * c + 4.0 * c * c)
                + a6 / 720.0 * (61.0 - 58.0 * lat_tan2 + lat_tan4 + 600.0 * c - 330.0 * E_P2)));
    if lat < 0.0 {
        northing += FALSE_NORTHING_SOUTH;
    }

    Ok(ProjectedCoordinate {
        easting,
        northing,
        zone_number,
        zone_letter,
    })
}

/// UTM zone number including the Norway and Svalbard exceptions
pub fn zone_number(lon: f64, lat: f64) -> u8 {
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }

    if (72.0..=84.0).contains(&lat) && lon >= 0.0 {
        if lon < 9.0 {
            return 31;
        } else if lon < 21.0 {
            return 33;
        } else if lon < 33.0 {
            return 35;
        } else if lon < 42.0 {
            return 37;
        }
    }

    let zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

pub fn zone_letter(lat: f64) -> char {
    let index = (((lat + 80.0) as usize) >> 3).min(ZONE_LETTERS.len() - 1);
    ZONE_LETTERS[index] as char
}

pub fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 183.0
}

/// Wrap to [-pi, pi)
fn wrap_angle(value: f64) -> f64 {
    use std::f64::consts::PI;
    (value + PI).rem_euclid(2.0 * PI) - PI
}

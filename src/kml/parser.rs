use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::path::Path;

use crate::domain::{BoundarySet, Coordinate, PointOfInterest, Polygon};
use crate::error::{Error, Result};

/// Namespace every geometry element must be bound to.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Which geometries the current `coordinates` element is nested under.
#[derive(Debug, Default)]
struct OpenCoordinates {
    depth: usize,
    in_polygon: bool,
    in_point: bool,
    text: String,
}

/// Parse a KML document into polygons and points of interest
///
/// # Algorithm
/// 1. Stream the document, tracking open `Polygon` and `Point` elements
///    (KML namespace only, any nesting depth)
/// 2. Collect the text of each `coordinates` element below either geometry
/// 3. Split it into `lon,lat[,alt]` tokens, dropping tokens that do not carry
///    two numeric components
/// 4. Every ring under a `Polygon` with at least one vertex becomes a polygon;
///    every vertex under a `Point` becomes a point of interest
///
/// Fails only when the document itself is not well-formed XML. Bad vertices
/// never abort the parse.
pub fn extract(document: &str) -> Result<BoundarySet> {
    let mut reader = NsReader::from_str(document);

    let mut polygons = Vec::new();
    let mut points = Vec::new();

    let mut depth = 0usize;
    let mut root_seen = false;
    let mut open_polygons = 0usize;
    let mut open_points = 0usize;
    let mut coordinates: Option<OpenCoordinates> = None;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| Error::malformed(e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                if depth == 0 && root_seen {
                    return Err(Error::malformed("more than one root element"));
                }
                root_seen = true;
                depth += 1;

                if !is_kml(&ns) {
                    continue;
                }
                match e.local_name().as_ref() {
                    b"Polygon" => open_polygons += 1,
                    b"Point" => open_points += 1,
                    b"coordinates" if coordinates.is_none() => {
                        if open_polygons > 0 || open_points > 0 {
                            coordinates = Some(OpenCoordinates {
                                depth,
                                in_polygon: open_polygons > 0,
                                in_point: open_points > 0,
                                text: String::new(),
                            });
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(_) => {
                if depth == 0 && root_seen {
                    return Err(Error::malformed("more than one root element"));
                }
                root_seen = true;
            }
            Event::End(ref e) => {
                if depth == 0 {
                    return Err(Error::malformed("closing tag without matching opening tag"));
                }

                if coordinates.as_ref().is_some_and(|c| c.depth == depth) {
                    if let Some(open) = coordinates.take() {
                        let vertices = parse_coordinate_block(&open.text);
                        if open.in_point {
                            points.extend(vertices.iter().copied().map(PointOfInterest::new));
                        }
                        if open.in_polygon && !vertices.is_empty() {
                            polygons.push(Polygon::new(vertices));
                        }
                    }
                }

                if is_kml(&ns) {
                    match e.local_name().as_ref() {
                        b"Polygon" => open_polygons = open_polygons.saturating_sub(1),
                        b"Point" => open_points = open_points.saturating_sub(1),
                        _ => {}
                    }
                }
                depth -= 1;
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::malformed(err.to_string()))?;
                if depth == 0 {
                    if !text.trim().is_empty() {
                        return Err(Error::malformed("text outside of the root element"));
                    }
                    continue;
                }
                if let Some(open) = coordinates.as_mut().filter(|c| c.depth == depth) {
                    open.text.push_str(&text);
                    open.text.push(' ');
                }
            }
            Event::CData(ref e) => {
                if let Some(open) = coordinates.as_mut().filter(|c| c.depth == depth) {
                    open.text.push_str(&String::from_utf8_lossy(e));
                    open.text.push(' ');
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(Error::malformed("document has no root element"));
    }
    if depth > 0 {
        return Err(Error::malformed("unexpected end of document"));
    }

    Ok(BoundarySet::new(polygons, points))
}

/// Read a KML file from disk and extract its boundaries
pub fn extract_file(path: &Path) -> Result<BoundarySet> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract(&contents)
}

fn is_kml(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == KML_NAMESPACE.as_bytes())
}

/// Parse the whitespace-separated tokens of a `coordinates` element
pub fn parse_coordinate_block(text: &str) -> Vec<Coordinate> {
    text.split_whitespace()
        .filter_map(parse_coordinate_token)
        .collect()
}

/// Parse a single `lon,lat[,alt]` token; altitude is ignored
///
/// Returns `None` for tokens that should be skipped rather than fail the file.
pub fn parse_coordinate_token(token: &str) -> Option<Coordinate> {
    let parts: Vec<&str> = token.split(',').collect();
    if !has_lon_lat_components(&parts) {
        return None;
    }

    let lon: f64 = parts[0].trim().parse().ok()?;
    let lat: f64 = parts[1].trim().parse().ok()?;

    Some(Coordinate::new(lon, lat))
}

/// A token is usable when it has at least longitude and latitude
pub fn has_lon_lat_components(parts: &[&str]) -> bool {
    parts.len() >= 2
}

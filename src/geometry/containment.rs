use crate::domain::{Coordinate, Polygon};

/// Ray-casting point-in-polygon test over planar (lon, lat)
///
/// Casts a horizontal ray from `point` towards +x and toggles on every edge
/// it crosses. An edge counts only when the point's latitude lies in the
/// half-open span `(min_lat, max_lat]` of that edge, and comparisons are
/// exact floating point with no epsilon.
///
/// Points exactly on an edge may come out either way depending on the
/// edge's orientation; this is the classic approximation and is kept as-is.
/// Rings with fewer than three distinct vertices give an unspecified result,
/// and an empty ring is never inside.
pub fn contains(point: Coordinate, polygon: &Polygon) -> bool {
    let ring = &polygon.vertices;
    let n = ring.len();
    if n == 0 {
        return false;
    }

    let (x, y) = (point.lon, point.lat);
    let mut inside = false;
    let mut p1 = ring[0];

    // n + 1 steps: the first is the zero-length edge ring[0] -> ring[0],
    // the last closes the ring back to ring[0].
    for i in 0..=n {
        let p2 = ring[i % n];

        if p1.lat.min(p2.lat) < y && y <= p1.lat.max(p2.lat) && x <= p1.lon.max(p2.lon) {
            // A bracketed edge always has p1.lat != p2.lat.
            let xinters = (y - p1.lat) * (p2.lon - p1.lon) / (p2.lat - p1.lat) + p1.lon;
            if p1.lon == p2.lon || x <= xinters {
                inside = !inside;
            }
        }

        p1 = p2;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;

    fn square() -> Polygon {
        Polygon::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
    }

    fn pt(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    #[test]
    fn test_square_inside_and_outside() {
        let poly = square();
        assert!(contains(pt(2.0, 2.0), &poly));
        assert!(!contains(pt(5.0, 5.0), &poly));
        assert!(!contains(pt(-1.0, 2.0), &poly));
        assert!(!contains(pt(2.0, -0.5), &poly));
    }

    #[test]
    fn test_square_edge_policy() {
        let poly = square();
        // Right edge is vertical and bracketed: one toggle.
        assert!(contains(pt(4.0, 2.0), &poly));
        // Left edge: both vertical edges toggle, net outside.
        assert!(!contains(pt(0.0, 2.0), &poly));
        // Bottom edge lies at min latitude, excluded by the half-open span.
        assert!(!contains(pt(2.0, 0.0), &poly));
        // Top edge lies at max latitude and is included.
        assert!(contains(pt(2.0, 4.0), &poly));
    }

    #[test]
    fn test_winding_does_not_matter() {
        let mut reversed = square();
        reversed.vertices.reverse();
        assert!(contains(pt(1.0, 3.0), &reversed));
        assert!(!contains(pt(4.5, 3.0), &reversed));
    }

    #[test]
    fn test_rotation_invariance_off_boundary() {
        let poly = Polygon::from(vec![
            (73.8310, 17.1750),
            (73.8330, 17.1750),
            (73.8330, 17.1770),
            (73.8320, 17.1765),
            (73.8310, 17.1770),
        ]);
        let probes = [
            pt(73.8320, 17.1759),
            pt(73.8318, 17.1761),
            pt(73.8330, 17.1775),
            pt(73.8300, 17.1750),
            pt(73.8320, 17.1768),
        ];

        for start in 0..poly.len() {
            let rotated = poly.rotated(start);
            for &p in &probes {
                assert_eq!(contains(p, &poly), contains(p, &rotated), "start={start} p={p:?}");
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let poly = square();
        let p = pt(3.9, 0.1);
        assert_eq!(contains(p, &poly), contains(p, &poly));
    }

    #[test]
    fn test_concave_polygon() {
        // U shape opening upwards
        let poly = Polygon::from(vec![
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 6.0),
            (4.0, 6.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 6.0),
            (0.0, 6.0),
        ]);
        assert!(contains(pt(1.0, 5.0), &poly));
        assert!(contains(pt(5.0, 5.0), &poly));
        assert!(contains(pt(3.0, 1.0), &poly));
        assert!(!contains(pt(3.0, 4.0), &poly));
    }

    #[test]
    fn test_agrees_with_geo_off_boundary() {
        let poly = Polygon::from(vec![
            (0.0, 0.0),
            (5.0, -1.0),
            (7.0, 3.0),
            (3.5, 2.0),
            (2.0, 6.0),
        ]);
        let reference = poly.to_geo();

        for i in 0..40 {
            for j in 0..40 {
                // Offsets keep every sample at least 1e-3 away from an edge.
                let p = pt(-1.0 + i as f64 * 0.23 + 0.0013, -1.5 + j as f64 * 0.19 + 0.0007);
                let expected = reference.contains(&geo::Point::new(p.lon, p.lat));
                assert_eq!(contains(p, &poly), expected, "p={p:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_rings_do_not_panic() {
        assert!(!contains(pt(0.0, 0.0), &Polygon::new(Vec::new())));
        let single = Polygon::from(vec![(1.0, 1.0)]);
        assert!(!contains(pt(1.0, 1.0), &single));
        let segment = Polygon::from(vec![(0.0, 0.0), (0.0, 2.0)]);
        // Both directions of the vertical segment toggle: net outside.
        assert!(!contains(pt(-1.0, 1.0), &segment));
    }
}

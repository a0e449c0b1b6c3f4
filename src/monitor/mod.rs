use serde::Serialize;

use crate::domain::{BoundarySet, Coordinate, Polygon};
use crate::geometry::contains;

/// True when `position` lies inside `boundary`
pub fn check_geofence(position: Coordinate, boundary: &Polygon) -> bool {
    contains(position, boundary)
}

/// True when `position` is outside `boundary` and RTH should trigger
pub fn should_return_to_home(position: Coordinate, boundary: &Polygon) -> bool {
    !check_geofence(position, boundary)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeofenceStatus {
    Inside,
    Breach,
}

impl GeofenceStatus {
    pub fn triggers_rth(self) -> bool {
        self == GeofenceStatus::Breach
    }
}

/// Holds the active boundary and evaluates positions against it
///
/// Every evaluation is independent: no history, hysteresis or debounce.
/// Tracking breaches along a trajectory is up to the caller.
#[derive(Debug, Clone)]
pub struct GeofenceMonitor {
    boundary: Polygon,
}

impl GeofenceMonitor {
    pub fn new(boundary: Polygon) -> Self {
        Self { boundary }
    }

    /// Monitor the first polygon of a parsed document
    pub fn from_boundary_set(set: &BoundarySet) -> Option<Self> {
        Self::from_boundary_set_at(set, 0)
    }

    /// Monitor the polygon at `index` of a parsed document
    pub fn from_boundary_set_at(set: &BoundarySet, index: usize) -> Option<Self> {
        set.polygons.get(index).cloned().map(Self::new)
    }

    pub fn boundary(&self) -> &Polygon {
        &self.boundary
    }

    /// Swap in a new active boundary, returning the old one
    pub fn set_boundary(&mut self, boundary: Polygon) -> Polygon {
        std::mem::replace(&mut self.boundary, boundary)
    }

    pub fn check(&self, position: Coordinate) -> bool {
        check_geofence(position, &self.boundary)
    }

    pub fn should_return_to_home(&self, position: Coordinate) -> bool {
        should_return_to_home(position, &self.boundary)
    }

    pub fn status(&self, position: Coordinate) -> GeofenceStatus {
        if self.check(position) {
            GeofenceStatus::Inside
        } else {
            GeofenceStatus::Breach
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PointOfInterest;

    fn field() -> Polygon {
        Polygon::from(vec![
            (73.8310, 17.1750),
            (73.8330, 17.1750),
            (73.8330, 17.1770),
            (73.8310, 17.1770),
        ])
    }

    #[test]
    fn test_rth_is_complement() {
        let boundary = field();
        let probes = [
            Coordinate::new(73.8320, 17.1759),
            Coordinate::new(73.8318, 17.1761),
            Coordinate::new(73.8330, 17.1765),
            Coordinate::new(73.8317, 17.1758),
            Coordinate::new(73.8300, 17.1750),
            Coordinate::new(73.8310, 17.1760),
        ];

        for p in probes {
            assert_eq!(
                should_return_to_home(p, &boundary),
                !check_geofence(p, &boundary)
            );
        }
    }

    #[test]
    fn test_breach_triggers_rth() {
        let boundary = field();
        assert!(!should_return_to_home(Coordinate::new(73.8320, 17.1759), &boundary));
        assert!(should_return_to_home(Coordinate::new(73.8300, 17.1750), &boundary));
    }

    #[test]
    fn test_monitor_status() {
        let monitor = GeofenceMonitor::new(field());
        assert_eq!(monitor.status(Coordinate::new(73.8320, 17.1759)), GeofenceStatus::Inside);

        let status = monitor.status(Coordinate::new(73.8400, 17.1800));
        assert_eq!(status, GeofenceStatus::Breach);
        assert!(status.triggers_rth());
    }

    #[test]
    fn test_monitor_is_stateless() {
        let monitor = GeofenceMonitor::new(field());
        let inside = Coordinate::new(73.8320, 17.1759);
        let outside = Coordinate::new(73.8400, 17.1800);

        assert!(monitor.should_return_to_home(outside));
        // A prior breach does not affect the next sample
        assert!(!monitor.should_return_to_home(inside));
        assert!(monitor.should_return_to_home(outside));
    }

    #[test]
    fn test_replace_boundary() {
        let mut monitor = GeofenceMonitor::new(field());
        let p = Coordinate::new(5.0, 5.0);
        assert!(monitor.should_return_to_home(p));

        let old = monitor.set_boundary(Polygon::from(vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]));
        assert_eq!(old, field());
        assert!(!monitor.should_return_to_home(p));
    }

    #[test]
    fn test_from_boundary_set() {
        let set = BoundarySet::new(
            vec![field(), Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])],
            vec![PointOfInterest::new(Coordinate::new(73.832, 17.176))],
        );

        let monitor = GeofenceMonitor::from_boundary_set(&set).unwrap();
        assert_eq!(monitor.boundary(), &field());

        let second = GeofenceMonitor::from_boundary_set_at(&set, 1).unwrap();
        assert_eq!(second.boundary().len(), 3);

        assert!(GeofenceMonitor::from_boundary_set_at(&set, 2).is_none());
        assert!(GeofenceMonitor::from_boundary_set(&BoundarySet::default()).is_none());
    }
}

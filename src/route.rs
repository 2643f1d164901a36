//! Route synchronization: project the display order to a waypoint sequence
//! and decide when the external routing service has to be asked again. At
//! most one route artifact is cached per trip.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::models::trip::{LatLng, Trip};
use crate::ordering::display_order;
use crate::services::routing::RouteSummary;

/// Ordered coordinates for the current display order; empty when a route
/// cannot exist (fewer than two destinations).
pub fn waypoints(trip: &Trip) -> Vec<LatLng> {
    if trip.destinations.len() < 2 {
        return Vec::new();
    }
    display_order(&trip.destinations)
        .iter()
        .map(|d| d.position())
        .collect()
}

/// Fingerprint of the ordered (id, lat, lng) sequence. Adding, removing or
/// reordering destinations changes it; editing names or notes does not.
pub fn fingerprint(trip: &Trip) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for destination in display_order(&trip.destinations) {
        destination.id.hash(&mut hasher);
        destination.lat.to_bits().hash(&mut hasher);
        destination.lng.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[derive(Default)]
pub struct RouteTracker {
    cache: HashMap<i64, CachedRoute>,
}

struct CachedRoute {
    fingerprint: u64,
    route: Option<RouteSummary>,
}

impl RouteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_refresh(&self, trip_id: i64, fingerprint: u64) -> bool {
        match self.cache.get(&trip_id) {
            Some(cached) => cached.fingerprint != fingerprint,
            None => true,
        }
    }

    pub fn cached(&self, trip_id: i64) -> Option<&Option<RouteSummary>> {
        self.cache.get(&trip_id).map(|c| &c.route)
    }

    /// Replace the trip's route artifact wholesale.
    pub fn store(&mut self, trip_id: i64, fingerprint: u64, route: Option<RouteSummary>) {
        self.cache.insert(trip_id, CachedRoute { fingerprint, route });
    }

    pub fn invalidate(&mut self, trip_id: i64) {
        self.cache.remove(&trip_id);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::Destination;

    fn dest(id: i64, date: &str, lat: f64) -> Destination {
        Destination {
            id,
            name: format!("place {id}"),
            date: Some(date.parse().expect("valid date")),
            notes: String::new(),
            lat,
            lng: -lat,
        }
    }

    #[test]
    fn fewer_than_two_destinations_yield_no_waypoints() {
        let mut trip = Trip::new(1, "test");
        assert!(waypoints(&trip).is_empty());
        trip.destinations.push(dest(1, "2024-01-01", 40.0));
        assert!(waypoints(&trip).is_empty());
    }

    #[test]
    fn waypoints_follow_display_order() {
        let mut trip = Trip::new(1, "test");
        trip.destinations.push(dest(1, "2024-01-02", 40.0));
        trip.destinations.push(dest(2, "2024-01-01", 50.0));
        let points = waypoints(&trip);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].lat, 50.0);
        assert_eq!(points[1].lat, 40.0);
    }

    #[test]
    fn reordering_changes_the_fingerprint() {
        let mut trip = Trip::new(1, "test");
        trip.destinations.push(dest(1, "2024-01-01", 40.0));
        trip.destinations.push(dest(2, "2024-01-02", 50.0));
        let before = fingerprint(&trip);

        trip.destinations[0].date = Some("2024-01-03".parse().unwrap());
        assert_ne!(fingerprint(&trip), before);
    }

    #[test]
    fn note_edits_leave_the_fingerprint_alone() {
        let mut trip = Trip::new(1, "test");
        trip.destinations.push(dest(1, "2024-01-01", 40.0));
        trip.destinations.push(dest(2, "2024-01-02", 50.0));
        let before = fingerprint(&trip);

        trip.destinations[0].notes = "bring an umbrella".into();
        trip.destinations[1].name = "renamed".into();
        assert_eq!(fingerprint(&trip), before);
    }

    #[test]
    fn tracker_refreshes_on_changed_fingerprint_only() {
        let mut tracker = RouteTracker::new();
        assert!(tracker.needs_refresh(1, 42));
        tracker.store(1, 42, None);
        assert!(!tracker.needs_refresh(1, 42));
        assert!(tracker.needs_refresh(1, 43));
        tracker.invalidate(1);
        assert!(tracker.needs_refresh(1, 42));
    }
}

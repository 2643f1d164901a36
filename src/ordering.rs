//! Destination ordering: the display order of a trip's destinations is
//! derived entirely from their dates. Reordering works by reassigning the
//! moved destination's date relative to its neighbor, so no explicit index
//! field has to be kept in sync.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::models::trip::{Destination, Trip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Stable sort by date ascending. Dated destinations come before undated
/// ones; undated pairs compare equal, so the stable sort keeps their
/// insertion order.
pub fn display_order(destinations: &[Destination]) -> Vec<&Destination> {
    let mut ordered: Vec<&Destination> = destinations.iter().collect();
    ordered.sort_by(|a, b| match (a.date, b.date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ordered
}

/// Default date for a destination about to be added: one day after the
/// latest dated destination, else the trip start advanced by the number of
/// destinations already present, else `today`.
pub fn default_date(trip: &Trip, today: NaiveDate) -> NaiveDate {
    if let Some(latest) = trip.destinations.iter().filter_map(|d| d.date).max() {
        return latest.checked_add_days(Days::new(1)).unwrap_or(latest);
    }
    if let Some(start) = trip.start_date {
        return start
            .checked_add_days(Days::new(trip.destinations.len() as u64))
            .unwrap_or(start);
    }
    today
}

/// Resolve a move-up/move-down request into a date reassignment for the
/// moved destination: one day before (up) or after (down) its neighbor in
/// the current display order. Returns `None` at a boundary, for an unknown
/// id, or when the neighbor carries no date.
pub fn plan_move(
    destinations: &[Destination],
    id: i64,
    direction: Direction,
) -> Option<(i64, NaiveDate)> {
    let ordered = display_order(destinations);
    let index = ordered.iter().position(|d| d.id == id)?;
    let neighbor = match direction {
        Direction::Up => ordered.get(index.checked_sub(1)?)?,
        Direction::Down => ordered.get(index + 1)?,
    };
    let anchor = neighbor.date?;
    let date = match direction {
        Direction::Up => anchor.checked_sub_days(Days::new(1))?,
        Direction::Down => anchor.checked_add_days(Days::new(1))?,
    };
    Some((id, date))
}

/// Resolve a drag-drop onto `target_id`: the dragged destination lands just
/// before the target when it came from below, just after when it came from
/// above.
pub fn plan_drag(
    destinations: &[Destination],
    dragged_id: i64,
    target_id: i64,
) -> Option<(i64, NaiveDate)> {
    let ordered = display_order(destinations);
    let from = ordered.iter().position(|d| d.id == dragged_id)?;
    let to = ordered.iter().position(|d| d.id == target_id)?;
    if from == to {
        return None;
    }
    let anchor = ordered[to].date?;
    let date = if from > to {
        anchor.checked_sub_days(Days::new(1))?
    } else {
        anchor.checked_add_days(Days::new(1))?
    };
    Some((dragged_id, date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(id: i64, date: Option<&str>) -> Destination {
        Destination {
            id,
            name: format!("place {id}"),
            date: date.map(|d| d.parse().expect("valid date")),
            notes: String::new(),
            lat: 0.0,
            lng: 0.0,
        }
    }

    fn ids(ordered: &[&Destination]) -> Vec<i64> {
        ordered.iter().map(|d| d.id).collect()
    }

    #[test]
    fn orders_by_date_ascending() {
        let dests = vec![
            dest(1, Some("2024-01-02")),
            dest(2, Some("2024-01-01")),
            dest(3, Some("2024-01-03")),
        ];
        assert_eq!(ids(&display_order(&dests)), vec![2, 1, 3]);
    }

    #[test]
    fn undated_follow_dated_in_insertion_order() {
        let dests = vec![
            dest(1, None),
            dest(2, Some("2024-05-01")),
            dest(3, None),
            dest(4, Some("2024-04-01")),
        ];
        assert_eq!(ids(&display_order(&dests)), vec![4, 2, 1, 3]);
    }

    #[test]
    fn equal_dates_keep_insertion_order() {
        let dests = vec![
            dest(1, Some("2024-01-01")),
            dest(2, Some("2024-01-01")),
            dest(3, Some("2024-01-01")),
        ];
        assert_eq!(ids(&display_order(&dests)), vec![1, 2, 3]);
        // Stable: re-running on the unchanged set yields the same sequence.
        assert_eq!(ids(&display_order(&dests)), vec![1, 2, 3]);
    }

    #[test]
    fn default_date_follows_latest_dated_destination() {
        let mut trip = Trip::new(1, "test");
        trip.destinations.push(dest(1, Some("2024-03-05")));
        trip.destinations.push(dest(2, Some("2024-02-01")));
        let today = "2020-01-01".parse().unwrap();
        assert_eq!(default_date(&trip, today), "2024-03-06".parse().unwrap());
    }

    #[test]
    fn default_date_advances_start_date_by_count() {
        let mut trip = Trip::new(1, "test");
        trip.start_date = Some("2024-06-01".parse().unwrap());
        let today = "2020-01-01".parse().unwrap();
        assert_eq!(default_date(&trip, today), "2024-06-01".parse().unwrap());
        trip.destinations.push(dest(1, None));
        trip.destinations.push(dest(2, None));
        assert_eq!(default_date(&trip, today), "2024-06-03".parse().unwrap());
    }

    #[test]
    fn default_date_falls_back_to_today() {
        let trip = Trip::new(1, "test");
        let today: NaiveDate = "2024-08-23".parse().unwrap();
        assert_eq!(default_date(&trip, today), today);
    }

    #[test]
    fn move_up_lands_one_day_before_neighbor() {
        // A(2024-01-02), B(2024-01-01): display order [B, A].
        let dests = vec![dest(10, Some("2024-01-02")), dest(20, Some("2024-01-01"))];
        let (id, date) = plan_move(&dests, 10, Direction::Up).expect("plan");
        assert_eq!(id, 10);
        assert_eq!(date, "2023-12-31".parse().unwrap());
    }

    #[test]
    fn move_at_boundary_is_a_no_op() {
        let dests = vec![dest(1, Some("2024-01-01")), dest(2, Some("2024-01-02"))];
        assert!(plan_move(&dests, 1, Direction::Up).is_none());
        assert!(plan_move(&dests, 2, Direction::Down).is_none());
        assert!(plan_move(&dests, 99, Direction::Up).is_none());
    }

    #[test]
    fn move_next_to_undated_neighbor_is_a_no_op() {
        let dests = vec![dest(1, Some("2024-01-01")), dest(2, None)];
        assert!(plan_move(&dests, 1, Direction::Down).is_none());
    }

    #[test]
    fn drag_down_lands_one_day_after_target() {
        let dests = vec![
            dest(1, Some("2024-01-01")),
            dest(2, Some("2024-01-05")),
            dest(3, Some("2024-01-09")),
        ];
        let (id, date) = plan_drag(&dests, 1, 3).expect("plan");
        assert_eq!(id, 1);
        assert_eq!(date, "2024-01-10".parse().unwrap());
    }

    #[test]
    fn drag_up_lands_one_day_before_target() {
        let dests = vec![
            dest(1, Some("2024-01-01")),
            dest(2, Some("2024-01-05")),
            dest(3, Some("2024-01-09")),
        ];
        let (id, date) = plan_drag(&dests, 3, 1).expect("plan");
        assert_eq!(id, 3);
        assert_eq!(date, "2023-12-31".parse().unwrap());
    }

    #[test]
    fn drag_onto_itself_is_a_no_op() {
        let dests = vec![dest(1, Some("2024-01-01")), dest(2, Some("2024-01-02"))];
        assert!(plan_drag(&dests, 1, 1).is_none());
    }
}

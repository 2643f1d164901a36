//! The itinerary store: the in-memory trip collection plus the currently
//! selected trip. Never empty after construction; every mutation here is
//! followed by a full persist at the call site.

use chrono::{Local, Utc};

use crate::error::AppError;
use crate::models::trip::{Destination, Trip};
use crate::ordering::{self, Direction};

pub struct Itinerary {
    trips: Vec<Trip>,
    current_id: i64,
}

impl Itinerary {
    /// Build from a loaded collection; an empty load gets a default trip so
    /// the store is never without a current trip.
    pub fn from_trips(trips: Vec<Trip>) -> Self {
        let mut itinerary = Self {
            trips,
            current_id: 0,
        };
        if itinerary.trips.is_empty() {
            itinerary.create_trip();
        } else {
            itinerary.current_id = itinerary.trips[0].id;
        }
        itinerary
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn current(&self) -> &Trip {
        let index = self
            .trips
            .iter()
            .position(|t| t.id == self.current_id)
            .unwrap_or(0);
        &self.trips[index]
    }

    fn current_mut(&mut self) -> &mut Trip {
        let index = self
            .trips
            .iter()
            .position(|t| t.id == self.current_id)
            .unwrap_or(0);
        &mut self.trips[index]
    }

    /// Fresh id from the wall clock, bumped past anything already taken.
    /// Trips and destinations share the id space.
    pub fn fresh_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.id_in_use(id) {
            id += 1;
        }
        id
    }

    fn id_in_use(&self, id: i64) -> bool {
        self.trips
            .iter()
            .any(|t| t.id == id || t.destinations.iter().any(|d| d.id == id))
    }

    pub fn create_trip(&mut self) -> &Trip {
        let id = self.fresh_id();
        let name = format!("New Trip {}", Local::now().format("%Y-%m-%d"));
        self.trips.push(Trip::new(id, name));
        self.current_id = id;
        self.current()
    }

    pub fn delete_current(&mut self) -> Result<(), AppError> {
        if self.trips.len() <= 1 {
            return Err(AppError::LastTrip);
        }
        let current_id = self.current_id;
        self.trips.retain(|t| t.id != current_id);
        self.current_id = self.trips[0].id;
        Ok(())
    }

    pub fn switch(&mut self, id: i64) -> Result<(), AppError> {
        if !self.trips.iter().any(|t| t.id == id) {
            return Err(AppError::NotFound);
        }
        self.current_id = id;
        Ok(())
    }

    pub fn update_current(&mut self, update: TripUpdate) {
        let trip = self.current_mut();
        if let Some(name) = update.name {
            trip.name = name;
        }
        if let Some(start_date) = update.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            trip.end_date = end_date;
        }
    }

    pub fn add_destination(&mut self, destination: Destination) {
        self.current_mut().destinations.push(destination);
    }

    /// Unknown ids are a silent no-op (`false`).
    pub fn remove_destination(&mut self, id: i64) -> bool {
        let trip = self.current_mut();
        let before = trip.destinations.len();
        trip.destinations.retain(|d| d.id != id);
        trip.destinations.len() != before
    }

    pub fn move_destination(&mut self, id: i64, direction: Direction) -> bool {
        let trip = self.current_mut();
        match ordering::plan_move(&trip.destinations, id, direction) {
            Some((id, date)) => Self::assign_date(trip, id, date),
            None => false,
        }
    }

    pub fn reorder_destination(&mut self, dragged_id: i64, target_id: i64) -> bool {
        let trip = self.current_mut();
        match ordering::plan_drag(&trip.destinations, dragged_id, target_id) {
            Some((id, date)) => Self::assign_date(trip, id, date),
            None => false,
        }
    }

    fn assign_date(trip: &mut Trip, id: i64, date: chrono::NaiveDate) -> bool {
        match trip.destinations.iter_mut().find(|d| d.id == id) {
            Some(destination) => {
                destination.date = Some(date);
                true
            }
            None => false,
        }
    }

    /// Wholesale replacement after a remote load; the never-empty invariant
    /// is re-applied.
    pub fn replace_all(&mut self, trips: Vec<Trip>) {
        self.trips = trips;
        if self.trips.is_empty() {
            self.create_trip();
        } else {
            self.current_id = self.trips[0].id;
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    pub name: Option<String>,
    /// Absent = keep, null = clear, value = set.
    #[serde(default, with = "serde_with::rust::double_option")]
    pub start_date: Option<Option<chrono::NaiveDate>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub end_date: Option<Option<chrono::NaiveDate>>,
}

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    error::AppError,
    itinerary::Itinerary,
    route::RouteTracker,
    services::{
        drive::DriveStore,
        geocode::GeocodeClient,
        routing::RoutingClient,
        storage::{LocalStore, TripStore},
    },
};

/// Everything the handlers share. The itinerary sits behind one mutex, so
/// mutations are serialized the way the original single-threaded app was.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub itinerary: Arc<Mutex<Itinerary>>,
    pub routes: Arc<Mutex<RouteTracker>>,
    pub local: LocalStore,
    pub remote: Option<DriveStore>,
    pub geocoder: GeocodeClient,
    pub router: RoutingClient,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        itinerary: Itinerary,
        local: LocalStore,
        remote: Option<DriveStore>,
        geocoder: GeocodeClient,
        router: RoutingClient,
    ) -> Self {
        Self {
            config,
            itinerary: Arc::new(Mutex::new(itinerary)),
            routes: Arc::new(Mutex::new(RouteTracker::new())),
            local,
            remote,
            geocoder,
            router,
        }
    }

    /// Full-collection write to the local store; called after every
    /// mutation. On failure the in-memory state stays the source of truth
    /// and the caller surfaces the error.
    pub async fn persist(&self, itinerary: &Itinerary) -> Result<(), AppError> {
        self.local.save_all(itinerary.trips()).await
    }
}

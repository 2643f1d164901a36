use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::AppError,
    itinerary::{Itinerary, TripUpdate},
    models::trip::{LatLng, Trip},
    route,
    services::routing::RouteSummary,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route(
            "/current",
            get(current_trip).put(update_trip).delete(delete_trip),
        )
        .route("/:id/select", post(select_trip))
        .route("/current/export", get(export_trip))
        .route("/current/route", get(current_route))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripsOverview {
    pub current: i64,
    pub trips: Vec<TripSummary>,
}

#[derive(Serialize)]
pub struct TripSummary {
    pub id: i64,
    pub name: String,
    pub destinations: usize,
}

pub fn overview(itinerary: &Itinerary) -> TripsOverview {
    TripsOverview {
        current: itinerary.current().id,
        trips: itinerary
            .trips()
            .iter()
            .map(|t| TripSummary {
                id: t.id,
                name: t.name.clone(),
                destinations: t.destinations.len(),
            })
            .collect(),
    }
}

async fn list_trips(State(state): State<AppState>) -> Json<TripsOverview> {
    let itinerary = state.itinerary.lock().await;
    Json(overview(&itinerary))
}

async fn create_trip(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut itinerary = state.itinerary.lock().await;
    let trip = itinerary.create_trip().clone();
    info!("created trip {} ({})", trip.name, trip.id);
    state.persist(&itinerary).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn current_trip(State(state): State<AppState>) -> Json<Trip> {
    let itinerary = state.itinerary.lock().await;
    Json(itinerary.current().clone())
}

async fn update_trip(
    State(state): State<AppState>,
    Json(update): Json<TripUpdate>,
) -> Result<Json<Trip>, AppError> {
    let mut itinerary = state.itinerary.lock().await;
    itinerary.update_current(update);
    state.persist(&itinerary).await?;
    Ok(Json(itinerary.current().clone()))
}

async fn delete_trip(State(state): State<AppState>) -> Result<Json<TripsOverview>, AppError> {
    let mut itinerary = state.itinerary.lock().await;
    let deleted = itinerary.current().id;
    itinerary.delete_current()?;
    state.routes.lock().await.invalidate(deleted);
    state.persist(&itinerary).await?;
    Ok(Json(overview(&itinerary)))
}

async fn select_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Trip>, AppError> {
    let mut itinerary = state.itinerary.lock().await;
    itinerary.switch(id)?;
    state.persist(&itinerary).await?;
    Ok(Json(itinerary.current().clone()))
}

/// Single-trip export, indented, served as a download.
async fn export_trip(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let itinerary = state.itinerary.lock().await;
    let trip = itinerary.current();
    if trip.destinations.is_empty() {
        return Err(AppError::Validation(
            "no destinations to export; add some places to the trip first".into(),
        ));
    }
    let body = serde_json::to_string_pretty(trip).map_err(|err| AppError::Other(err.into()))?;
    let disposition = format!("attachment; filename=\"{}\"", trip.export_file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteResponse {
    waypoints: Vec<LatLng>,
    route: Option<RouteSummary>,
}

/// Waypoints plus the routed path. The route is recomputed only when the
/// waypoint sequence changed since the last request; a routing failure
/// degrades to `route: null`.
async fn current_route(State(state): State<AppState>) -> Json<RouteResponse> {
    let (trip_id, fingerprint, waypoints) = {
        let itinerary = state.itinerary.lock().await;
        let trip = itinerary.current();
        (trip.id, route::fingerprint(trip), route::waypoints(trip))
    };

    if waypoints.len() < 2 {
        return Json(RouteResponse {
            waypoints,
            route: None,
        });
    }

    {
        let tracker = state.routes.lock().await;
        if !tracker.needs_refresh(trip_id, fingerprint) {
            let route = tracker.cached(trip_id).cloned().flatten();
            return Json(RouteResponse { waypoints, route });
        }
    }

    // Network call happens outside both locks.
    let route = match state.router.compute_route(&waypoints).await {
        Ok(summary) => Some(summary),
        Err(err) => {
            warn!("route computation failed, leaving overlay absent: {err}");
            None
        }
    };
    state
        .routes
        .lock()
        .await
        .store(trip_id, fingerprint, route.clone());

    Json(RouteResponse { waypoints, route })
}

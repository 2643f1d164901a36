use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::{
    error::AppError,
    models::trip::Destination,
    ordering::{self, Direction},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/current/destinations",
            get(list_destinations).post(add_destination),
        )
        .route("/current/destinations/:id", delete(delete_destination))
        .route("/current/destinations/:id/move", post(move_destination))
        .route("/current/destinations/reorder", post(reorder_destinations))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewDestination {
    name: String,
    /// Absent = default slot per the ordering rules, null = undated.
    #[serde(default, with = "serde_with::rust::double_option")]
    date: Option<Option<NaiveDate>>,
    #[serde(default)]
    notes: String,
    lat: f64,
    lng: f64,
}

/// Current trip's destinations in display order.
async fn list_destinations(State(state): State<AppState>) -> Json<Vec<Destination>> {
    let itinerary = state.itinerary.lock().await;
    let ordered = ordering::display_order(&itinerary.current().destinations)
        .into_iter()
        .cloned()
        .collect();
    Json(ordered)
}

async fn add_destination(
    State(state): State<AppState>,
    Json(form): Json<NewDestination>,
) -> Result<impl IntoResponse, AppError> {
    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation(
            "please provide a name for this location".into(),
        ));
    }

    let mut itinerary = state.itinerary.lock().await;
    let date = match form.date {
        Some(date) => date,
        None => Some(ordering::default_date(
            itinerary.current(),
            Local::now().date_naive(),
        )),
    };
    let destination = Destination {
        id: itinerary.fresh_id(),
        name,
        date,
        notes: form.notes,
        lat: form.lat,
        lng: form.lng,
    };
    let saved = destination.clone();
    itinerary.add_destination(destination);
    info!("added destination {} ({})", saved.name, saved.id);
    state.persist(&itinerary).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Unknown ids delete nothing and still answer 204.
async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let mut itinerary = state.itinerary.lock().await;
    if itinerary.remove_destination(id) {
        state.persist(&itinerary).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct MoveRequest {
    direction: Direction,
}

async fn move_destination(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let mut itinerary = state.itinerary.lock().await;
    if itinerary.move_destination(id, request.direction) {
        state.persist(&itinerary).await?;
    }
    let ordered = ordering::display_order(&itinerary.current().destinations)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ordered))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderRequest {
    dragged_id: i64,
    target_id: i64,
}

async fn reorder_destinations(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let mut itinerary = state.itinerary.lock().await;
    if itinerary.reorder_destination(request.dragged_id, request.target_id) {
        state.persist(&itinerary).await?;
    }
    let ordered = ordering::display_order(&itinerary.current().destinations)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ordered))
}

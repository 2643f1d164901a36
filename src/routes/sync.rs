use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::{
    error::AppError,
    routes::trips::{overview, TripsOverview},
    services::{drive::DriveStore, storage::TripStore},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save", post(save_to_remote))
        .route("/load", post(load_from_remote))
}

fn remote(state: &AppState) -> Result<&DriveStore, AppError> {
    state
        .remote
        .as_ref()
        .ok_or_else(|| AppError::ExternalService("remote storage is not configured".into()))
}

async fn save_to_remote(State(state): State<AppState>) -> Result<Json<TripsOverview>, AppError> {
    let remote = remote(&state)?;
    // Snapshot under the lock, upload without it.
    let (snapshot, summary) = {
        let itinerary = state.itinerary.lock().await;
        (itinerary.trips().to_vec(), overview(&itinerary))
    };
    remote.save_all(&snapshot).await?;
    info!("saved {} trips to remote storage", snapshot.len());
    Ok(Json(summary))
}

#[derive(Deserialize)]
struct LoadRequest {
    #[serde(default)]
    confirm: bool,
}

/// Last writer wins: a confirmed remote load replaces the local collection
/// wholesale, then persists it locally.
async fn load_from_remote(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<TripsOverview>, AppError> {
    if !request.confirm {
        return Err(AppError::Validation(
            "confirmation required: loading replaces the local trips".into(),
        ));
    }
    let remote = remote(&state)?;
    let Some(trips) = remote.load_all().await? else {
        return Err(AppError::NotFound);
    };

    let mut itinerary = state.itinerary.lock().await;
    itinerary.replace_all(trips);
    state.routes.lock().await.clear();
    state.persist(&itinerary).await?;
    info!("replaced local trips from remote storage");
    Ok(Json(overview(&itinerary)))
}

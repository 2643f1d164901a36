use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::AppError, services::geocode::GeocodeResult, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

/// First geocoder hit for the query, or null when nothing matched.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Option<GeocodeResult>>, AppError> {
    if query.q.trim().is_empty() {
        return Err(AppError::Validation(
            "please enter a location to search".into(),
        ));
    }
    let result = state.geocoder.search(query.q.trim()).await?;
    Ok(Json(result))
}

pub mod destinations;
pub mod search;
pub mod sync;
pub mod trips;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/trips", trips::router().merge(destinations::router()))
        .nest("/api/search", search::router())
        .nest("/api/sync", sync::router())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

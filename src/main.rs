use tokio::net::TcpListener;
use tracing::info;
use trip_planner::config::AppConfig;
use trip_planner::error::AppError;
use trip_planner::itinerary::Itinerary;
use trip_planner::routes::create_router;
use trip_planner::services::drive::DriveStore;
use trip_planner::services::geocode::GeocodeClient;
use trip_planner::services::routing::RoutingClient;
use trip_planner::services::storage::{LocalStore, TripStore};
use trip_planner::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let local = LocalStore::new(config.data_root.clone());
    local.ensure_structure().await?;

    let trips = local.load_all().await?.unwrap_or_default();
    let itinerary = Itinerary::from_trips(trips);
    info!(
        "loaded {} trips, current is {}",
        itinerary.trips().len(),
        itinerary.current().name
    );
    // The default trip created on a fresh start has to survive a restart.
    local.save_all(itinerary.trips()).await?;

    let remote = match &config.remote {
        Some(remote) => Some(DriveStore::new(&remote.base_url, &remote.token)?),
        None => None,
    };
    let geocoder = GeocodeClient::new(&config.geocoder_url)?;
    let router = RoutingClient::new(&config.router_url)?;

    let state = AppState::new(config.clone(), itinerary, local, remote, geocoder, router);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,trip_planner=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

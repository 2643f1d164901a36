use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::trip::LatLng};

#[derive(Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
}

/// What the map overlay needs from a computed route.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// GeoJSON geometry, passed through untouched.
    pub geometry: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: serde_json::Value,
}

impl RoutingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|err| AppError::Config(format!("routing client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Ask OSRM for a driving route through the waypoints in order. A
    /// failure here is recoverable for the caller: the overlay just stays
    /// absent.
    pub async fn compute_route(&self, waypoints: &[LatLng]) -> Result<RouteSummary, AppError> {
        if waypoints.len() < 2 {
            return Err(AppError::ExternalService(
                "routing: need at least two waypoints".into(),
            ));
        }

        // OSRM takes lon,lat pairs.
        let coords = waypoints
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        let url = format!("{}/route/v1/driving/{coords}", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("alternatives", "false"),
            ])
            .send()
            .await
            .map_err(|err| AppError::ExternalService(format!("routing: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "routing: status {}",
                response.status()
            )));
        }

        let body: OsrmResponse = response
            .json()
            .await
            .map_err(|err| AppError::ExternalService(format!("routing: {err}")))?;

        if body.code != "Ok" {
            return Err(AppError::ExternalService(format!(
                "routing: service answered {}",
                body.code
            )));
        }
        let Some(route) = body.routes.into_iter().next() else {
            return Err(AppError::ExternalService("routing: no path found".into()));
        };

        Ok(RouteSummary {
            distance_meters: route.distance,
            duration_seconds: route.duration,
            geometry: route.geometry,
        })
    }
}

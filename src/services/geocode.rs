use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Nominatim usage policy wants an identifying agent.
const USER_AGENT: &str = "trip-planner/0.1";

#[derive(Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl GeocodeClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|err| AppError::Config(format!("geocode client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// First hit for the query, or `None` when nothing matches.
    pub async fn search(&self, query: &str) -> Result<Option<GeocodeResult>, AppError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|err| AppError::ExternalService(format!("geocoding: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "geocoding: status {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|err| AppError::ExternalService(format!("geocoding: {err}")))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };
        let lat = place
            .lat
            .parse()
            .map_err(|_| AppError::ExternalService("geocoding: bad latitude".into()))?;
        let lng = place
            .lon
            .parse()
            .map_err(|_| AppError::ExternalService("geocoding: bad longitude".into()))?;
        Ok(Some(GeocodeResult {
            lat,
            lng,
            display_name: place.display_name,
        }))
    }
}

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::warn;

use crate::{error::AppError, models::trip::Trip, services::storage::TripStore};

const TRIPS_KEY: &str = "trip_planner_data.json";

/// Remote object-store backend: the trip collection lives under a single
/// key, fetched and replaced wholesale. Same contract as the local store,
/// used only for the explicit save/load sync endpoints.
#[derive(Clone)]
pub struct DriveStore {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl DriveStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|err| AppError::Config(format!("remote store client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn object_url(&self) -> String {
        format!("{}/files/{}", self.base_url, TRIPS_KEY)
    }
}

#[async_trait]
impl TripStore for DriveStore {
    async fn load_all(&self) -> Result<Option<Vec<Trip>>, AppError> {
        let response = self
            .http
            .get(self.object_url())
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|err| AppError::ExternalService(format!("remote load: {err}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "remote load: status {}",
                response.status()
            )));
        }

        let raw = response
            .bytes()
            .await
            .map_err(|err| AppError::ExternalService(format!("remote load: {err}")))?;
        match serde_json::from_slice(&raw) {
            Ok(trips) => Ok(Some(trips)),
            Err(err) => {
                warn!("discarding malformed remote trip data: {err}");
                Ok(None)
            }
        }
    }

    async fn save_all(&self, trips: &[Trip]) -> Result<(), AppError> {
        let data = serde_json::to_vec_pretty(trips).map_err(|err| AppError::Other(err.into()))?;
        let response = self
            .http
            .put(self.object_url())
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(data)
            .send()
            .await
            .map_err(|err| AppError::ExternalService(format!("remote save: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "remote save: status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::{error::AppError, models::trip::Trip};

const TRIPS_FILE: &str = "trips.json";

/// One persisted JSON document for the whole trip collection. `load_all`
/// fails soft: missing or malformed data is `Ok(None)` and the caller falls
/// back to a default trip. `save_all` overwrites the document in one write.
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn load_all(&self) -> Result<Option<Vec<Trip>>, AppError>;
    async fn save_all(&self, trips: &[Trip]) -> Result<(), AppError>;
}

/// File-backed store under the data root; written after every mutation.
#[derive(Clone)]
pub struct LocalStore {
    root: Arc<PathBuf>,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        Ok(())
    }

    fn trips_path(&self) -> PathBuf {
        self.root().join(TRIPS_FILE)
    }
}

#[async_trait]
impl TripStore for LocalStore {
    async fn load_all(&self) -> Result<Option<Vec<Trip>>, AppError> {
        let path = self.trips_path();
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let raw = fs::read(&path)
            .await
            .map_err(|err| AppError::Persistence(format!("read {}: {err}", path.display())))?;
        if raw.is_empty() {
            return Ok(None);
        }
        match serde_json::from_slice(&raw) {
            Ok(trips) => Ok(Some(trips)),
            Err(err) => {
                warn!("discarding malformed trip data at {}: {err}", path.display());
                Ok(None)
            }
        }
    }

    async fn save_all(&self, trips: &[Trip]) -> Result<(), AppError> {
        self.ensure_structure().await?;
        let data = serde_json::to_vec_pretty(trips).map_err(|err| AppError::Other(err.into()))?;
        let path = self.trips_path();
        fs::write(&path, data)
            .await
            .map_err(|err| AppError::Persistence(format!("write {}: {err}", path.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalStore) {
        let dir = TempDir::new().expect("temp dir");
        let store = LocalStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[tokio::test]
    async fn missing_file_loads_as_no_trips() {
        let (_dir, store) = store();
        assert!(store.load_all().await.expect("load").is_none());
    }

    #[tokio::test]
    async fn malformed_file_loads_as_no_trips() {
        let (_dir, store) = store();
        store.ensure_structure().await.expect("mkdir");
        fs::write(store.root().join(TRIPS_FILE), b"{ not json")
            .await
            .expect("write");
        assert!(store.load_all().await.expect("load").is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (_dir, store) = store();
        let mut trip = Trip::new(1, "Weekend");
        trip.start_date = Some("2024-05-01".parse().unwrap());
        trip.destinations.push(crate::models::trip::Destination {
            id: 2,
            name: "Harbor".into(),
            date: Some("2024-05-02".parse().unwrap()),
            notes: "ferry at noon".into(),
            lat: 59.33,
            lng: 18.07,
        });
        let trips = vec![trip];

        store.save_all(&trips).await.expect("save");
        let loaded = store.load_all().await.expect("load").expect("some trips");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Weekend");
        assert_eq!(loaded[0].destinations[0].notes, "ferry at noon");
        assert_eq!(loaded[0].destinations[0].date, trips[0].destinations[0].date);

        // Re-saving the loaded model reproduces the document byte for byte.
        let first = fs::read(store.root().join(TRIPS_FILE)).await.expect("read");
        store.save_all(&loaded).await.expect("save again");
        let second = fs::read(store.root().join(TRIPS_FILE)).await.expect("read");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn persisted_document_uses_camel_case_dates() {
        let (_dir, store) = store();
        let mut trip = Trip::new(1, "Weekend");
        trip.start_date = Some("2024-05-01".parse().unwrap());
        store.save_all(&[trip]).await.expect("save");

        let raw = fs::read_to_string(store.root().join(TRIPS_FILE))
            .await
            .expect("read");
        assert!(raw.contains("\"startDate\": \"2024-05-01\""));
        assert!(raw.contains("\"endDate\": null"));
    }
}

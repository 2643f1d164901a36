use std::{env, net::SocketAddr, path::PathBuf};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub data_root: PathBuf,
    pub geocoder_url: String,
    pub router_url: String,
    pub remote: Option<RemoteConfig>,
}

/// Optional object-store backend for explicit save/load sync.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub token: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let data_root = env::var("TRIP_DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let geocoder_url = env::var("GEOCODER_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let router_url = env::var("ROUTER_URL")
            .unwrap_or_else(|_| "https://router.project-osrm.org".to_string());

        let remote = match env::var("TRIP_REMOTE_URL") {
            Ok(raw) => {
                Url::parse(&raw)
                    .map_err(|err| AppError::Config(format!("invalid TRIP_REMOTE_URL: {err}")))?;
                Some(RemoteConfig {
                    base_url: raw,
                    token: env::var("TRIP_REMOTE_TOKEN").unwrap_or_default(),
                })
            }
            Err(_) => None,
        };

        Ok(Self {
            listen_addr,
            data_root,
            geocoder_url,
            router_url,
            remote,
        })
    }
}

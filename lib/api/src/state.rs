use soilx_advisory::{GeocoderClient, WeatherClient};
use soilx_core::SoilEstimator;
use soilx_storage::StorageManager;
use std::sync::Arc;

/// Resolved HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

/// Shared per-worker handler state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageManager>,
    pub estimator: SoilEstimator,
    pub weather: WeatherClient,
    pub geocoder: GeocoderClient,
}

impl AppState {
    pub fn new(
        storage: Arc<StorageManager>,
        estimator: SoilEstimator,
        weather: WeatherClient,
        geocoder: GeocoderClient,
    ) -> Self {
        Self {
            storage,
            estimator,
            weather,
            geocoder,
        }
    }
}

//! Place-name lookup against an OpenEPI-compatible geocoder

use serde::{Deserialize, Serialize};
use soilx_core::GeoPoint;
use std::time::Duration;
use tracing::debug;

use crate::error::{AdvisoryError, Result};

pub const OPENEPI_GEOCODER_URL: &str = "https://api.openepi.io/geocoding";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

// GeoJSON FeatureCollection, coordinates in [lon, lat] order
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
}

impl FeatureCollection {
    /// First feature with usable coordinates
    fn first_place(self, query: &str) -> Option<Place> {
        self.features.into_iter().find_map(|feature| {
            let (longitude, latitude) = match feature.geometry.coordinates.as_slice() {
                [lon, lat, ..] => (*lon, *lat),
                _ => return None,
            };
            if !GeoPoint::new(latitude, longitude).is_valid() {
                return None;
            }
            let name = feature
                .properties
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| query.to_string());
            Some(Place { name, latitude, longitude })
        })
    }
}

/// Forward geocoder
///
/// Without a base URL the client is disabled and every lookup fails with
/// [`AdvisoryError::Disabled`].
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl GeocoderClient {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
        })
    }

    pub fn disabled() -> Result<Self> {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    /// Resolve `query` to its best match, `None` when nothing matches
    pub async fn geocode(&self, query: &str) -> Result<Option<Place>> {
        let base_url = self.base_url.as_deref().ok_or(AdvisoryError::Disabled("geocoding"))?;
        debug!(query, "geocoding place name");

        let response = self
            .http
            .get(format!("{}/", base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisoryError::Status {
                provider: "geocoding",
                target: query.to_string(),
                status: status.as_u16(),
            });
        }

        let body: FeatureCollection = response.json().await?;
        Ok(body.first_place(query))
    }
}

//! Current weather from OpenWeather for fixed reference stations

use serde::{Deserialize, Serialize};
use soilx_core::GeoPoint;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use crate::error::{AdvisoryError, Result};

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A named location weather is sampled at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub name: &'static str,
    pub location: GeoPoint,
}

/// County reference stations reported alongside every advice
pub const STATIONS: [Station; 3] = [
    Station { name: "Kakamega", location: GeoPoint { latitude: 0.2827, longitude: 34.7519 } },
    Station { name: "Siaya", location: GeoPoint { latitude: 0.0636, longitude: 34.2875 } },
    Station { name: "Nairobi", location: GeoPoint { latitude: -1.2864, longitude: 36.8172 } },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationWeather {
    /// Degrees Celsius
    pub temperature: f64,
    /// Rain over the last hour, mm
    pub rainfall: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub forecast: String,
}

/// Weather at every station, keyed by lowercase station name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub stations: BTreeMap<String, StationWeather>,
    total_rain: Option<f64>,
}

impl WeatherSummary {
    /// Summary used when no provider is configured or the provider failed
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn from_stations(stations: BTreeMap<String, StationWeather>) -> Self {
        let total_rain = stations.values().map(|s| s.rainfall).sum();
        Self { stations, total_rain: Some(total_rain) }
    }

    /// Summed rainfall in mm, `None` when unavailable
    pub fn total_rain(&self) -> Option<f64> {
        self.total_rain
    }

    pub fn is_available(&self) -> bool {
        self.total_rain.is_some()
    }

    pub fn station(&self, name: &str) -> Option<&StationWeather> {
        self.stations.get(&name.to_lowercase())
    }

    /// One key per reference station, `None` where no reading exists
    pub fn by_station(&self) -> BTreeMap<String, Option<StationWeather>> {
        STATIONS
            .iter()
            .map(|s| (s.name.to_lowercase(), self.station(s.name).cloned()))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
}

impl OwmResponse {
    fn into_station_weather(self, station: &str) -> Result<StationWeather> {
        let forecast = self
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| AdvisoryError::MissingConditions(station.to_string()))?;
        Ok(StationWeather {
            temperature: self.main.temp,
            rainfall: self.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
            humidity: self.main.humidity,
            forecast,
        })
    }
}

/// OpenWeather current-weather client
///
/// Without an API key the client is disabled and every fetch returns
/// [`WeatherSummary::unavailable`].
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn disabled() -> Result<Self> {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Weather at every reference station
    pub async fn fetch_summary(&self) -> Result<WeatherSummary> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(WeatherSummary::unavailable());
        };

        let mut stations = BTreeMap::new();
        for station in &STATIONS {
            let weather = self.fetch_point(station.name, &station.location, api_key).await?;
            stations.insert(station.name.to_lowercase(), weather);
        }
        Ok(WeatherSummary::from_stations(stations))
    }

    /// Current weather at an arbitrary point
    pub async fn fetch_at(&self, location: &GeoPoint) -> Result<StationWeather> {
        let api_key = self.api_key.as_deref().ok_or(AdvisoryError::Disabled("weather"))?;
        let label = format!("({}, {})", location.latitude, location.longitude);
        self.fetch_point(&label, location, api_key).await
    }

    async fn fetch_point(&self, label: &str, location: &GeoPoint, api_key: &str) -> Result<StationWeather> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(location = label, "fetching current weather");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisoryError::Status {
                provider: "weather",
                target: label.to_string(),
                status: status.as_u16(),
            });
        }

        let body: OwmResponse = response.json().await?;
        body.into_station_weather(label)
    }
}

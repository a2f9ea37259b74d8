//! # SoilX Advisory
//!
//! Turns a soil [`Prediction`](soilx_core::Prediction) and current weather
//! into crop, soil and planting recommendations.
//!
//! - [`recommend`] - rule-based soil and weather advice
//! - [`SoilReport`] - client-facing rendering of soil values
//! - [`WeatherClient`] - OpenWeather current conditions at reference stations
//! - [`GeocoderClient`] - place name to coordinates
//!
//! ## Example
//!
//! ```rust
//! use soilx_advisory::{recommend, WeatherSummary};
//! use soilx_core::Prediction;
//!
//! let prediction = Prediction {
//!     region: "Siaya".to_string(),
//!     ph: 5.4,
//!     nitrogen: 12.0,
//!     phosphorus: 20.0,
//!     potassium: 40.0,
//! };
//! let advice = recommend(&prediction, "maize", &WeatherSummary::unavailable());
//! assert_eq!(advice.soil, "Add lime to increase soil pH; Apply nitrogen fertilizer");
//! ```

pub mod error;
pub mod geocode;
pub mod recommend;
pub mod report;
pub mod weather;

pub use error::{AdvisoryError, Result};
pub use geocode::{GeocoderClient, Place, OPENEPI_GEOCODER_URL};
pub use recommend::{recommend, soil_advice, weather_advice, Recommendations};
pub use report::SoilReport;
pub use weather::{Station, StationWeather, WeatherClient, WeatherSummary, STATIONS};

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use soilx_advisory::{recommend, Place, Recommendations, SoilReport, StationWeather, WeatherSummary};
use soilx_core::{clamp_k, Error, GeoPoint, Prediction, SoilEstimator, SoilSample};
use soilx_storage::{rows_to_samples, NewHistoryEntry, SampleRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::state::{AppState, ServerConfig};

#[derive(Deserialize)]
struct EstimateRequest {
    lat: f64,
    lon: f64,
    tolerance: Option<f64>,
    k: Option<i64>,
}

#[derive(Deserialize)]
struct AdviceRequest {
    lat: Option<f64>,
    lon: Option<f64>,
    crop: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdviceResponse {
    county: String,
    soil_data: SoilReport,
    recommendations: Recommendations,
    total_rain: Option<f64>,
    /// Always keyed by every reference station
    weather_data: BTreeMap<String, Option<StationWeather>>,
}

#[derive(Deserialize)]
struct LocationAdviceRequest {
    location: Option<String>,
}

/// A response part that degrades to `{ "error": ... }` on its own
#[derive(Serialize)]
#[serde(untagged)]
enum Section<T> {
    Available(T),
    Unavailable { error: &'static str },
}

#[derive(Serialize)]
struct LocationAdviceResponse {
    location: Place,
    weather: Section<StationWeather>,
    soil: Section<LocationSoil>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationSoil {
    #[serde(flatten)]
    prediction: Prediction,
    soil_data: SoilReport,
}

#[derive(Deserialize)]
struct InsertSamplesRequest {
    #[serde(default)]
    samples: Vec<SoilSample>,
    /// Rows in relational-table shape; rows lacking coordinates are skipped
    #[serde(default)]
    rows: Vec<SampleRow>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, config: ServerConfig) -> std::io::Result<()> {
        let origins = config.cors_origins.clone();
        info!("Starting HTTP server on {}:{}", config.host, config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(build_cors(&origins))
                .app_data(web::Data::new(state.clone()))
                .configure(configure)
        })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default().supports_credentials(), |cors, origin| cors.allowed_origin(origin))
    };
    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec!["Content-Type", "Authorization"])
        .max_age(3600)
}

/// Register every route; shared by the server and handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health))
        .route("/api/soil/estimate", web::post().to(estimate_soil))
        .route("/api/advice", web::post().to(get_advice))
        .route("/api/get-agri-advice", web::post().to(get_location_advice))
        .route("/api/profile/{user_id}", web::get().to(get_profile))
        .route("/api/samples", web::get().to(list_samples))
        .route("/api/samples", web::put().to(insert_samples))
        .default_service(web::to(not_found));
}

fn error_json(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": message.into()
    }))
}

/// Body extraction failures answer with the same `{ "error": ... }` shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = error_json(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

fn error_response(e: &Error) -> HttpResponse {
    match e {
        Error::InvalidQuery { .. } | Error::InvalidSample(_) | Error::InvalidConfig(_) => {
            error_json(StatusCode::BAD_REQUEST, e.to_string())
        }
        e if e.is_no_data() => error_json(StatusCode::NOT_FOUND, "Soil data unavailable for this location"),
        e => error_json(StatusCode::INTERNAL_SERVER_ERROR, format!("Server error: {}", e)),
    }
}

/// The server's estimator, or one with the request's overrides applied
fn estimator_for(
    state: &AppState,
    tolerance: Option<f64>,
    k: Option<i64>,
    dataset_len: usize,
) -> Result<SoilEstimator, Error> {
    if tolerance.is_none() && k.is_none() {
        return Ok(state.estimator.clone());
    }
    let mut config = state.estimator.config().clone();
    if let Some(tolerance) = tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Some(k) = k {
        config = config.with_k(clamp_k(k, dataset_len));
    }
    SoilEstimator::new(config)
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("SoilX backend is running")
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "samples": state.storage.samples().len(),
        "weather": state.weather.is_enabled(),
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    error_json(StatusCode::NOT_FOUND, "Route not found")
}

async fn estimate_soil(
    state: web::Data<AppState>,
    req: web::Json<EstimateRequest>,
) -> ActixResult<HttpResponse> {
    let dataset = state.storage.samples().snapshot();
    let estimator = match estimator_for(&state, req.tolerance, req.k, dataset.len()) {
        Ok(e) => e,
        Err(e) => return Ok(error_response(&e)),
    };

    match estimator.explain(&GeoPoint::new(req.lat, req.lon), &dataset) {
        Ok(estimate) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": estimate
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn get_advice(
    state: web::Data<AppState>,
    req: web::Json<AdviceRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let (lat, lon, crop, user_id) = match (req.lat, req.lon, req.crop, req.user_id) {
        (Some(lat), Some(lon), Some(crop), Some(user_id)) if !crop.is_empty() && !user_id.is_empty() => {
            (lat, lon, crop, user_id)
        }
        _ => {
            return Ok(error_json(
                StatusCode::BAD_REQUEST,
                "Missing required fields: lat, lon, crop, or userId",
            ));
        }
    };

    let dataset = state.storage.samples().snapshot();
    let prediction = match state.estimator.estimate(&GeoPoint::new(lat, lon), &dataset) {
        Ok(p) => p,
        Err(e) => return Ok(error_response(&e)),
    };

    let weather = match state.weather.fetch_summary().await {
        Ok(w) => w,
        Err(e) => {
            warn!("Weather unavailable: {}", e);
            WeatherSummary::unavailable()
        }
    };

    let recommendations = recommend(&prediction, &crop, &weather);
    let soil_data = SoilReport::from(&prediction);

    let recorded = state.storage.history().record(NewHistoryEntry {
        user_id,
        county: prediction.region.clone(),
        soil_data: soil_data.clone(),
        recommendations: recommendations.clone(),
        total_rain: weather.total_rain(),
        crop,
    });
    if let Err(e) = recorded {
        warn!("Advice not saved to history: {}", e);
    }

    Ok(HttpResponse::Ok().json(AdviceResponse {
        county: prediction.region,
        soil_data,
        recommendations,
        total_rain: weather.total_rain(),
        weather_data: weather.by_station(),
    }))
}

async fn get_location_advice(
    state: web::Data<AppState>,
    req: web::Json<LocationAdviceRequest>,
) -> ActixResult<HttpResponse> {
    let location = match req.into_inner().location {
        Some(location) if !location.trim().is_empty() => location,
        _ => {
            return Ok(error_json(
                StatusCode::BAD_REQUEST,
                "Please provide a valid location string in the request body.",
            ));
        }
    };

    if !state.geocoder.is_enabled() {
        return Ok(error_json(StatusCode::SERVICE_UNAVAILABLE, "Place-name lookup is not configured"));
    }

    let place = match state.geocoder.geocode(location.trim()).await {
        Ok(Some(place)) => place,
        Ok(None) => return Ok(error_json(StatusCode::NOT_FOUND, "Location not found. Please try a different name.")),
        Err(e) => {
            warn!("Geocoding '{}' failed: {}", location.trim(), e);
            return Ok(error_json(StatusCode::NOT_FOUND, "Location not found. Please try a different name."));
        }
    };
    let point = place.location();

    let weather = match state.weather.fetch_at(&point).await {
        Ok(weather) => Section::Available(weather),
        Err(e) => {
            warn!("Weather unavailable for {}: {}", place.name, e);
            Section::Unavailable {
                error: "Weather data not available for this location currently.",
            }
        }
    };

    let dataset = state.storage.samples().snapshot();
    let soil = match state.estimator.estimate(&point, &dataset) {
        Ok(prediction) => Section::Available(LocationSoil {
            soil_data: SoilReport::from(&prediction),
            prediction,
        }),
        Err(e) => {
            warn!("Soil estimate unavailable for {}: {}", place.name, e);
            Section::Unavailable {
                error: "Soil data not available for this specific location.",
            }
        }
    };

    Ok(HttpResponse::Ok().json(LocationAdviceResponse {
        location: place,
        weather,
        soil,
    }))
}

async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let user_id = path.into_inner();
    Ok(HttpResponse::Ok().json(state.storage.history().for_user(&user_id)))
}

async fn list_samples(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let dataset = state.storage.samples().snapshot();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": dataset.as_slice(),
        "count": dataset.len(),
    })))
}

async fn insert_samples(
    state: web::Data<AppState>,
    req: web::Json<InsertSamplesRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let mut samples = req.samples;
    samples.extend(rows_to_samples(req.rows));

    if samples.is_empty() {
        return Ok(error_json(StatusCode::BAD_REQUEST, "No samples provided"));
    }

    let added = samples.len();
    match state.storage.samples().insert(samples) {
        Ok(total) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": true,
            "added": added,
            "count": total,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

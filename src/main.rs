use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use soilx_advisory::{GeocoderClient, WeatherClient};
use soilx_api::{AppState, RestApi, ServerConfig};
use soilx_core::{EstimatorConfig, SoilEstimator};
use soilx_storage::StorageManager;

/// Soil nutrient estimation and crop advisory server
#[derive(Parser, Debug)]
#[command(name = "soilx")]
#[command(about = "Soil estimation and crop advisory server", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 3000)]
    http_port: u16,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Exact-match window in degrees
    #[arg(long, default_value_t = soilx_core::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Neighbors used for interpolation
    #[arg(long, default_value_t = soilx_core::DEFAULT_K)]
    k: usize,

    /// OpenWeather API key; weather is disabled without one
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    openweather_api_key: Option<String>,

    /// Geocoder base URL for place-name advice, e.g. https://api.openepi.io/geocoding;
    /// place-name lookups are disabled without one
    #[arg(long, env = "GEOCODER_URL")]
    geocoder_url: Option<String>,

    /// Allowed CORS origin (repeatable); any origin when omitted
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,
}

fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    info!("Starting SoilX v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);

    let estimator_config = EstimatorConfig::default()
        .with_tolerance(args.tolerance)
        .with_k(args.k);
    let estimator = SoilEstimator::new(estimator_config)?;
    info!("Estimator: tolerance={} k={}", args.tolerance, args.k);

    let storage = Arc::new(StorageManager::new(&args.data_dir)?);
    info!("Storage initialized with {} samples", storage.samples().len());

    let weather = WeatherClient::new(args.openweather_api_key)?;
    if !weather.is_enabled() {
        warn!("No OpenWeather API key configured; advice will omit weather");
    }

    let geocoder = GeocoderClient::new(args.geocoder_url)?;
    if !geocoder.is_enabled() {
        warn!("No geocoder URL configured; place-name advice is disabled");
    }

    let state = AppState::new(storage.clone(), estimator, weather, geocoder);
    let config = ServerConfig {
        host: args.host,
        port: args.http_port,
        cors_origins: args.cors_origins,
    };

    let http_port = config.port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, config).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("SoilX started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Saving data...");
    storage.save()?;
    info!("Shutting down...");
    Ok(())
}

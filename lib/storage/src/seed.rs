//! Built-in reference samples
//!
//! Field measurements from Siaya and Kakamega counties, western Kenya.
//! Used to seed an empty data directory.

use soilx_core::{GeoPoint, Result, SoilDataset, SoilSample};

// (latitude, longitude, pH, N, P, K, region)
const REFERENCE_SAMPLES: [(f64, f64, f64, f64, f64, f64, &str); 26] = [
    (0.06797222222222223, 34.43441666666666, 6.0, 5.0, 9.0, 18.0, "Siaya"),
    (0.2943611111111111, 34.39463888888889, 6.0, 29.0, 40.0, 82.0, "Kakamega"),
    (0.06688888888888889, 34.43027777777777, 5.7, 2.0, 3.0, 7.0, "Siaya"),
    (0.06869444444444445, 34.42855555555555, 6.0, 29.0, 40.0, 82.0, "Siaya"),
    (0.0675, 34.44027777777777, 6.0, 15.0, 21.0, 43.0, "Siaya"),
    (0.2908333333333333, 34.40408333333333, 5.86, 22.0, 30.0, 63.0, "Kakamega"),
    (0.07030555555555555, 34.44211111111111, 6.12, 11.0, 16.0, 32.0, "Siaya"),
    (0.06830555555555555, 34.44219444444444, 6.0, 8.0, 12.0, 26.0, "Siaya"),
    (0.06383333333333334, 34.44380555555555, 5.0, 4.0, 6.0, 13.0, "Siaya"),
    (0.06436111111111112, 34.44183333333333, 5.0, 9.0, 13.0, 26.0, "Siaya"),
    (0.06947222222222223, 34.44033333333333, 7.0, 19.0, 29.0, 56.0, "Siaya"),
    (0.1241388888888889, 34.20166666666667, 6.21, 53.0, 75.0, 152.0, "Siaya"),
    (0.1233611111111111, 34.20105555555556, 6.28, 39.0, 58.0, 112.0, "Siaya"),
    (0.1223333333333333, 34.20397222222223, 6.3, 48.0, 68.0, 138.0, "Siaya"),
    (0.1239166666666667, 34.20705555555556, 6.42, 8.0, 12.0, 25.0, "Siaya"),
    (0.1241111111111111, 34.20666666666667, 6.4, 17.0, 30.0, 42.0, "Siaya"),
    (0.08733333333333333, 34.33000000000001, 6.0, 72.0, 100.0, 203.0, "Siaya"),
    (0.08311111111111111, 34.33450000000001, 6.0, 25.0, 36.0, 73.0, "Siaya"),
    (0.2948055555555555, 34.39172222222222, 6.0, 6.0, 10.0, 20.0, "Kakamega"),
    (0.2938888888888889, 34.39027777777778, 6.0, 10.0, 15.0, 30.0, "Kakamega"),
    (0.2985555555555556, 34.39555555555555, 6.89, 9.0, 13.0, 29.0, "Kakamega"),
    (0.2943611111111111, 34.39463888888889, 6.16, 10.0, 16.0, 32.0, "Kakamega"),
    (0.2943611111111111, 34.39463888888889, 6.06, 3.0, 6.0, 13.0, "Kakamega"),
    (0.2943611111111111, 34.39463888888889, 6.8, 12.0, 17.0, 35.0, "Kakamega"),
    (0.2855833333333333, 34.39422222222222, 7.0, 4.0, 6.0, 13.0, "Kakamega"),
    (0.2967777777777778, 34.39827777777778, 5.86, 6.0, 13.0, 20.0, "Kakamega"),
];

pub fn reference_samples() -> Vec<SoilSample> {
    REFERENCE_SAMPLES
        .iter()
        .map(|&(lat, lon, ph, n, p, k, region)| SoilSample::new(GeoPoint::new(lat, lon), ph, n, p, k, region))
        .collect()
}

pub fn reference_dataset() -> Result<SoilDataset> {
    SoilDataset::new(reference_samples())
}

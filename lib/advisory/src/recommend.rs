//! Rule-based crop, soil and weather recommendations
//!
//! Thresholds follow common agronomy guidance for maize in western Kenya:
//! pH between 6.0 and 7.5, nitrogen at least 20 kg/ha, phosphorus at least
//! 15 kg/ha, potassium at least 30 kg/ha.

use serde::{Deserialize, Serialize};
use soilx_core::Prediction;

use crate::weather::WeatherSummary;

pub const PH_LOW: f64 = 6.0;
pub const PH_HIGH: f64 = 7.5;
pub const NITROGEN_MIN: f64 = 20.0;
pub const PHOSPHORUS_MIN: f64 = 15.0;
pub const POTASSIUM_MIN: f64 = 30.0;

/// Rainfall (mm, summed over stations) above which planting should wait
pub const RAIN_EXCESSIVE_MM: f64 = 10.0;
/// Rainfall (mm) below which irrigation is advised
pub const RAIN_LOW_MM: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub crop: String,
    pub soil: String,
    pub weather: String,
}

/// Soil amendment advice for a prediction
pub fn soil_advice(prediction: &Prediction) -> String {
    let mut advice = if prediction.ph < PH_LOW {
        "Add lime to increase soil pH".to_string()
    } else if prediction.ph > PH_HIGH {
        "Add sulfur to decrease soil pH".to_string()
    } else {
        "Maintain current soil conditions".to_string()
    };

    if prediction.nitrogen < NITROGEN_MIN {
        advice.push_str("; Apply nitrogen fertilizer");
    }
    if prediction.phosphorus < PHOSPHORUS_MIN {
        advice.push_str("; Apply phosphorus fertilizer");
    }
    if prediction.potassium < POTASSIUM_MIN {
        advice.push_str("; Apply potassium fertilizer");
    }
    advice
}

/// Planting advice from total rainfall; `None` when no weather was fetched
pub fn weather_advice(total_rain: Option<f64>) -> &'static str {
    match total_rain {
        None => "Weather data unavailable; check local forecast",
        Some(rain) if rain > RAIN_EXCESSIVE_MM => "Delay planting due to excessive rain",
        Some(rain) if rain < RAIN_LOW_MM => "Ensure irrigation due to low rainfall",
        Some(_) => "Plant soon due to favorable conditions",
    }
}

pub fn recommend(prediction: &Prediction, crop: &str, weather: &WeatherSummary) -> Recommendations {
    Recommendations {
        crop: crop.to_string(),
        soil: soil_advice(prediction),
        weather: weather_advice(weather.total_rain()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(ph: f64, n: f64, p: f64, k: f64) -> Prediction {
        Prediction {
            region: "Siaya".to_string(),
            ph,
            nitrogen: n,
            phosphorus: p,
            potassium: k,
        }
    }

    #[test]
    fn test_balanced_soil() {
        assert_eq!(soil_advice(&prediction(6.5, 30.0, 20.0, 40.0)), "Maintain current soil conditions");
    }

    #[test]
    fn test_acidic_and_deficient() {
        assert_eq!(
            soil_advice(&prediction(5.0, 4.0, 6.0, 13.0)),
            "Add lime to increase soil pH; Apply nitrogen fertilizer; Apply phosphorus fertilizer; Apply potassium fertilizer"
        );
    }

    #[test]
    fn test_alkaline() {
        assert_eq!(soil_advice(&prediction(8.0, 30.0, 20.0, 40.0)), "Add sulfur to decrease soil pH");
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(
            soil_advice(&prediction(PH_LOW, NITROGEN_MIN, PHOSPHORUS_MIN, POTASSIUM_MIN)),
            "Maintain current soil conditions"
        );
    }

    #[test]
    fn test_weather_advice() {
        assert_eq!(weather_advice(Some(12.0)), "Delay planting due to excessive rain");
        assert_eq!(weather_advice(Some(0.5)), "Ensure irrigation due to low rainfall");
        assert_eq!(weather_advice(Some(5.0)), "Plant soon due to favorable conditions");
        assert_eq!(weather_advice(None), "Weather data unavailable; check local forecast");
    }

    #[test]
    fn test_recommend_keeps_crop() {
        let rec = recommend(&prediction(6.5, 30.0, 20.0, 40.0), "maize", &WeatherSummary::unavailable());
        assert_eq!(rec.crop, "maize");
        assert_eq!(rec.weather, "Weather data unavailable; check local forecast");
    }
}

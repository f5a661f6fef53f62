use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hour of a plant's synthetic outlook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPrediction {
    /// Hour of day, 0..=23.
    pub hour: u32,
    pub emission: f64,
    pub carbon_intensity: f64,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub is_clean_period: bool,
}

/// A plant's 24-hour prediction series, regenerated on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionData {
    pub plant_id: String,
    pub timestamp: DateTime<Utc>,
    pub hourly_predictions: Vec<HourlyPrediction>,
}

impl PredictionData {
    pub fn new(plant_id: impl Into<String>, hourly_predictions: Vec<HourlyPrediction>) -> Self {
        Self {
            plant_id: plant_id.into(),
            timestamp: Utc::now(),
            hourly_predictions,
        }
    }

    pub fn clean_hours(&self) -> impl Iterator<Item = &HourlyPrediction> {
        self.hourly_predictions.iter().filter(|p| p.is_clean_period)
    }
}

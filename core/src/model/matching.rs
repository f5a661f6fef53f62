use serde::{Deserialize, Serialize};

/// Buyer constraints for a matching run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchingCriteria {
    /// Tons of CO2 to offset.
    pub target_offset: f64,
    pub max_price_per_ton: f64,
    /// Accepted and carried, but not consulted by the matcher.
    pub preferred_time_slots: Vec<String>,
}

impl Default for MatchingCriteria {
    fn default() -> Self {
        Self {
            target_offset: 100.0,
            max_price_per_ton: 50_000.0,
            preferred_time_slots: Vec::new(),
        }
    }
}

/// Candidate offset block drawn from one plant's clean hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub id: String,
    pub plant_id: String,
    pub plant_name: String,
    pub time_slots: Vec<String>,
    pub offset_amount: f64,
    pub price_per_ton: f64,
    pub carbon_intensity: f64,
    pub confidence: f64,
    pub estimated_savings: f64,
}

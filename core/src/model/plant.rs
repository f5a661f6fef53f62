use serde::{Deserialize, Serialize};

/// Generation category used by the pricing type factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlantType {
    Coal,
    #[serde(alias = "gas")]
    Lng,
    Renewable,
    Nuclear,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlantStatus {
    Operating,
    Maintenance,
    Stopped,
}

/// Fuel shares in percent. Absent fuels are omitted from the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FuelMix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammonia: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewable: Option<f64>,
}

/// Catalog entry for a generating unit. Replaced wholesale on every catalog load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerPlant {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: PlantType,
    /// Rated capacity in MW.
    pub capacity: f64,
    #[serde(default)]
    pub location: String,
    pub current_output: f64,
    pub efficiency: f64,
    #[serde(default)]
    pub fuel_mix: FuelMix,
    pub emission_factor: f64,
    pub status: PlantStatus,
}

impl PowerPlant {
    /// Upper bound on the offset a single match may draw from this plant.
    pub fn max_offset(&self) -> f64 {
        self.capacity * 0.1
    }
}

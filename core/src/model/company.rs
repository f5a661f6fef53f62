use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsagePattern {
    pub peak_hours: Vec<String>,
    pub base_load: f64,
    pub peak_load: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EsgManager {
    pub name: String,
    pub email: String,
}

/// Offset buyer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub business_type: String,
    pub annual_electricity_usage: f64,
    pub carbon_reduction_target: f64,
    pub re100_participant: bool,
    #[serde(default)]
    pub usage_pattern: UsagePattern,
    #[serde(default)]
    pub esg_manager: EsgManager,
}

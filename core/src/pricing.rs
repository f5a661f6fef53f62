//! Price and savings per ton of offset.
//!
//! Both functions are pure: identical inputs always produce identical output.
//! Callers are expected to pass finite intensities.

use crate::model::PlantType;

pub const BASE_PRICE_PER_TON: f64 = 45_000.0;
pub const MARKET_REFERENCE_PRICE: f64 = 50_000.0;
pub const INTENSITY_FACTOR_FLOOR: f64 = 0.5;

pub fn type_factor(plant_type: PlantType) -> f64 {
    match plant_type {
        PlantType::Renewable => 0.6,
        PlantType::Lng => 0.8,
        PlantType::Nuclear => 0.7,
        PlantType::Coal | PlantType::Other => 1.0,
    }
}

/// `45000 * max(0.5, 1 - intensity) * type_factor`, rounded to the nearest unit.
pub fn price_per_ton(carbon_intensity: f64, plant_type: PlantType) -> f64 {
    let intensity_factor = (1.0 - carbon_intensity).max(INTENSITY_FACTOR_FLOOR);
    (BASE_PRICE_PER_TON * intensity_factor * type_factor(plant_type)).round()
}

/// Savings against the market reference, always priced as coal.
pub fn savings_per_ton(carbon_intensity: f64) -> f64 {
    (MARKET_REFERENCE_PRICE - price_per_ton(carbon_intensity, PlantType::Coal)).max(0.0)
}

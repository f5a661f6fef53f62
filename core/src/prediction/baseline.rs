//! Static per-plant baselines and the time-of-day demand curve.

pub const DEFAULT_BASE_EMISSION: f64 = 800.0;
pub const DEFAULT_BASE_INTENSITY: f64 = 0.70;

const BASELINES: [(&str, f64, f64); 6] = [
    ("pp_boryeong_1", 1000.0, 0.95),
    ("pp_boryeong_2", 950.0, 0.98),
    ("pp_dangjin_1", 1100.0, 0.92),
    ("pp_taean_1", 980.0, 0.94),
    ("pp_seocheon_gas", 400.0, 0.35),
    ("pp_solar_farm_1", 15.0, 0.02),
];

fn lookup(plant_id: &str) -> Option<(f64, f64)> {
    BASELINES
        .iter()
        .find(|(id, _, _)| *id == plant_id)
        .map(|&(_, emission, intensity)| (emission, intensity))
}

pub fn baseline_emission(plant_id: &str) -> f64 {
    lookup(plant_id).map_or(DEFAULT_BASE_EMISSION, |(emission, _)| emission)
}

pub fn baseline_intensity(plant_id: &str) -> f64 {
    lookup(plant_id).map_or(DEFAULT_BASE_INTENSITY, |(_, intensity)| intensity)
}

/// Demand multiplier: low before dawn, peaks mid-afternoon and in the evening.
pub fn time_of_day_factor(hour: u32) -> f64 {
    match hour {
        2..=5 => 0.6,
        14..=17 => 1.2,
        20..=22 => 1.1,
        _ => 1.0,
    }
}

use crate::math::StatsHelper;
use crate::model::{
    Company, HourlyPrediction, MatchResult, MatchingCriteria, PowerPlant, PredictionData,
};
use crate::pricing::{price_per_ton, savings_per_ton};
use crate::telemetry::log::LogManager;
use chrono::{DateTime, Utc};

/// `"HH:00-HH+1:00"`; hour 23 closes at `24:00`.
pub fn time_slot_label(hour: u32) -> String {
    format!("{:02}:00-{:02}:00", hour, hour + 1)
}

fn match_plant(
    plant: &PowerPlant,
    series: &PredictionData,
    criteria: &MatchingCriteria,
    now: DateTime<Utc>,
) -> Option<MatchResult> {
    let clean: Vec<&HourlyPrediction> = series.clean_hours().collect();
    if clean.is_empty() {
        return None;
    }

    let intensities: Vec<f64> = clean.iter().map(|p| p.carbon_intensity).collect();
    let confidences: Vec<f64> = clean.iter().map(|p| p.confidence).collect();
    let mean_intensity = StatsHelper::mean(&intensities);

    let price = price_per_ton(mean_intensity, plant.plant_type);
    if price > criteria.max_price_per_ton {
        return None;
    }

    Some(MatchResult {
        id: format!("match_{}_{}", plant.id, now.timestamp_millis()),
        plant_id: plant.id.clone(),
        plant_name: plant.name.clone(),
        time_slots: clean.iter().map(|p| time_slot_label(p.hour)).collect(),
        offset_amount: criteria.target_offset.min(plant.max_offset()),
        price_per_ton: price,
        carbon_intensity: StatsHelper::round_to(mean_intensity, 3),
        confidence: StatsHelper::mean(&confidences),
        estimated_savings: savings_per_ton(mean_intensity),
    })
}

/// Ranks one aggregated block per plant by ascending price.
///
/// Plants without a prediction series, without clean hours, or priced above
/// the ceiling are left out. `preferred_time_slots` is not consulted.
pub fn find_matches_at(
    _company: &Company,
    criteria: &MatchingCriteria,
    plants: &[PowerPlant],
    predictions: &[PredictionData],
    now: DateTime<Utc>,
) -> Vec<MatchResult> {
    let logger = LogManager::scoped("matcher");
    let mut matches: Vec<MatchResult> = plants
        .iter()
        .filter_map(|plant| {
            let series = predictions.iter().find(|p| p.plant_id == plant.id)?;
            match_plant(plant, series, criteria, now)
        })
        .collect();

    // stable: equal prices keep catalog order
    matches.sort_by(|a, b| a.price_per_ton.total_cmp(&b.price_per_ton));
    logger.record(&format!(
        "Matcher ranked {} of {} plants under {:.0}/t",
        matches.len(),
        plants.len(),
        criteria.max_price_per_ton
    ));
    matches
}

pub fn find_matches(
    company: &Company,
    criteria: &MatchingCriteria,
    plants: &[PowerPlant],
    predictions: &[PredictionData],
) -> Vec<MatchResult> {
    find_matches_at(company, criteria, plants, predictions, Utc::now())
}

use crate::math::StatsHelper;
use crate::model::{HourlyPrediction, PredictionData};
use crate::prediction::baseline::{baseline_emission, baseline_intensity, time_of_day_factor};
use crate::prediction::clean::{CleanPeriodRule, DailyRule, HourSample, RealTimeRule};
use crate::random::RandomSource;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: u32 = 24;

const REAL_TIME_JITTER: (f64, f64) = (0.8, 1.2);
const DAILY_JITTER: (f64, f64) = (0.85, 1.15);
const CONFIDENCE_RANGE: (f64, f64) = (0.85, 1.0);

/// Which generator feeds a refresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMode {
    #[default]
    RealTime,
    Daily,
}

fn build_hour<R: RandomSource>(
    hour: u32,
    base_emission: f64,
    base_intensity: f64,
    jitter: (f64, f64),
    rule: &dyn CleanPeriodRule,
    rng: &mut R,
) -> HourlyPrediction {
    let random_factor = rng.uniform(jitter.0, jitter.1);
    let tod_factor = time_of_day_factor(hour);

    let emission = base_emission * random_factor * tod_factor;
    let carbon_intensity = base_intensity * random_factor * tod_factor;
    let confidence = rng.uniform(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1);

    let sample = HourSample {
        hour,
        random_factor,
        time_of_day_factor: tod_factor,
        carbon_intensity,
    };

    HourlyPrediction {
        hour,
        emission: StatsHelper::round_to(emission, 2),
        carbon_intensity: StatsHelper::round_to(carbon_intensity, 3),
        confidence,
        is_clean_period: rule.is_clean(&sample),
    }
}

/// Next 24 hours starting at `start_hour`, flagged with [`RealTimeRule`].
pub fn generate_real_time_predictions<R: RandomSource>(
    plant_id: &str,
    start_hour: u32,
    rng: &mut R,
) -> Vec<HourlyPrediction> {
    let base_emission = baseline_emission(plant_id);
    let base_intensity = baseline_intensity(plant_id);

    (0..HOURS_PER_DAY)
        .map(|offset| {
            let hour = (start_hour + offset) % HOURS_PER_DAY;
            build_hour(
                hour,
                base_emission,
                base_intensity,
                REAL_TIME_JITTER,
                &RealTimeRule,
                rng,
            )
        })
        .collect()
}

/// Hours 0..24 of a calendar day, flagged with [`DailyRule`].
///
/// The date labels the series only; values do not depend on it.
pub fn generate_daily_predictions<R: RandomSource>(
    plant_id: &str,
    date: NaiveDate,
    rng: &mut R,
) -> Vec<HourlyPrediction> {
    debug!("generating daily predictions for {} on {}", plant_id, date);
    let base_emission = baseline_emission(plant_id);
    let base_intensity = baseline_intensity(plant_id);

    (0..HOURS_PER_DAY)
        .map(|hour| {
            build_hour(
                hour,
                base_emission,
                base_intensity,
                DAILY_JITTER,
                &DailyRule,
                rng,
            )
        })
        .collect()
}

/// Fresh real-time series for every plant id, in input order.
pub fn refresh_predictions<R: RandomSource>(
    plant_ids: &[String],
    start_hour: u32,
    rng: &mut R,
) -> Vec<PredictionData> {
    plant_ids
        .iter()
        .map(|id| {
            PredictionData::new(
                id.clone(),
                generate_real_time_predictions(id, start_hour, rng),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    #[test]
    fn real_time_series_wraps_from_start_hour() {
        let mut rng = SeededRandom::seeded(1);
        let series = generate_real_time_predictions("pp_boryeong_1", 22, &mut rng);
        assert_eq!(series.len(), 24);
        let hours: Vec<u32> = series.iter().map(|p| p.hour).collect();
        assert_eq!(&hours[..4], &[22, 23, 0, 1]);
        assert_eq!(hours[23], 21);
    }

    #[test]
    fn real_time_clean_hours_only_before_dawn() {
        let mut rng = SeededRandom::seeded(99);
        for _ in 0..20 {
            let series = generate_real_time_predictions("pp_taean_1", 0, &mut rng);
            for p in series.iter().filter(|p| p.is_clean_period) {
                assert!((2..=5).contains(&p.hour));
            }
        }
    }

    #[test]
    fn low_draw_marks_pre_dawn_clean() {
        // jitter draw 0.1 -> factor 0.84, confidence draw 0.1 -> 0.865
        let mut rng = ScriptedRandom::constant(0.1);
        let series = generate_real_time_predictions("pp_solar_farm_1", 0, &mut rng);
        let clean: Vec<u32> = series
            .iter()
            .filter(|p| p.is_clean_period)
            .map(|p| p.hour)
            .collect();
        assert_eq!(clean, vec![2, 3, 4, 5]);
        assert_eq!(series[3].carbon_intensity, 0.01);
        assert_eq!(series[3].emission, 7.56);
    }

    #[test]
    fn high_draw_leaves_no_clean_hours() {
        let mut rng = ScriptedRandom::constant(0.5);
        let series = generate_real_time_predictions("pp_solar_farm_1", 0, &mut rng);
        assert!(series.iter().all(|p| !p.is_clean_period));
    }

    #[test]
    fn values_stay_within_expected_bands() {
        let mut rng = SeededRandom::seeded(5);
        let series = generate_real_time_predictions("pp_seocheon_gas", 7, &mut rng);
        for p in &series {
            assert!((0.85..=1.0).contains(&p.confidence));
            let tod = time_of_day_factor(p.hour);
            assert!(p.emission >= 400.0 * 0.8 * tod - 0.01);
            assert!(p.emission <= 400.0 * 1.2 * tod + 0.01);
        }
    }

    #[test]
    fn daily_series_is_chronological_and_uses_daily_rule() {
        let mut rng = ScriptedRandom::constant(0.5);
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let series = generate_daily_predictions("pp_boryeong_1", date, &mut rng);
        let hours: Vec<u32> = series.iter().map(|p| p.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<_>>());
        let clean: Vec<u32> = series
            .iter()
            .filter(|p| p.is_clean_period)
            .map(|p| p.hour)
            .collect();
        // factor 1.0; intensity 0.95 except 0.57 in hours 2..=5
        assert_eq!(clean, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn daily_low_intensity_plant_is_clean_all_day() {
        let mut rng = SeededRandom::seeded(3);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let series = generate_daily_predictions("pp_seocheon_gas", date, &mut rng);
        assert!(series.iter().all(|p| p.is_clean_period));
    }

    #[test]
    fn daily_rule_compares_intensity_before_rounding() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        // factor 0.9994 -> intensity 0.69958, stored as 0.700 but still clean
        let mut rng = ScriptedRandom::constant(0.498);
        let series = generate_daily_predictions("pp_unlisted", date, &mut rng);
        assert_eq!(series[0].carbon_intensity, 0.7);
        assert!(series[0].is_clean_period);
        assert_eq!(series[7].carbon_intensity, 0.7);
        assert!(series[7].is_clean_period);
        assert!(!series[14].is_clean_period);

        // factor 1.003 -> intensity 0.7021
        let mut rng = ScriptedRandom::constant(0.51);
        let series = generate_daily_predictions("pp_unlisted", date, &mut rng);
        assert_eq!(series[0].carbon_intensity, 0.702);
        assert!(!series[0].is_clean_period);
        assert!(series[1].is_clean_period);
    }

    #[test]
    fn refresh_builds_one_series_per_plant() {
        let mut rng = SeededRandom::seeded(11);
        let ids = vec!["pp_boryeong_1".to_string(), "pp_solar_farm_1".to_string()];
        let data = refresh_predictions(&ids, 4, &mut rng);
        assert_eq!(data.len(), 2);
        assert_eq!(data[1].plant_id, "pp_solar_farm_1");
        assert!(data.iter().all(|d| d.hourly_predictions.len() == 24));
    }
}

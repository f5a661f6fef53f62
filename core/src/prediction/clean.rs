/// Inputs available when deciding whether an hour counts as clean.
#[derive(Debug, Clone, Copy)]
pub struct HourSample {
    pub hour: u32,
    pub random_factor: f64,
    pub time_of_day_factor: f64,
    /// Intensity before rounding.
    pub carbon_intensity: f64,
}

/// Strategy deciding the clean-period flag of a generated hour.
pub trait CleanPeriodRule {
    fn is_clean(&self, sample: &HourSample) -> bool;
}

/// Real-time rule: pre-dawn window and a low random draw.
///
/// Cleanliness depends on the draw, so two refreshes can disagree for the
/// same plant and hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeRule;

impl CleanPeriodRule for RealTimeRule {
    fn is_clean(&self, sample: &HourSample) -> bool {
        sample.random_factor < 0.9 && sample.time_of_day_factor < 0.8
    }
}

/// Daily rule: low-demand hours 1..=6, or any hour below 0.7 intensity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyRule;

impl CleanPeriodRule for DailyRule {
    fn is_clean(&self, sample: &HourSample) -> bool {
        let low_demand = (1..=6).contains(&sample.hour);
        low_demand || sample.carbon_intensity < 0.7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hour: u32, random_factor: f64, tod: f64, intensity: f64) -> HourSample {
        HourSample {
            hour,
            random_factor,
            time_of_day_factor: tod,
            carbon_intensity: intensity,
        }
    }

    #[test]
    fn real_time_rule_needs_both_thresholds() {
        assert!(RealTimeRule.is_clean(&sample(3, 0.85, 0.6, 0.5)));
        assert!(!RealTimeRule.is_clean(&sample(3, 0.95, 0.6, 0.5)));
        assert!(!RealTimeRule.is_clean(&sample(10, 0.85, 1.0, 0.01)));
    }

    #[test]
    fn daily_rule_accepts_either_condition() {
        assert!(DailyRule.is_clean(&sample(1, 1.1, 1.0, 0.95)));
        assert!(DailyRule.is_clean(&sample(6, 1.1, 1.0, 0.95)));
        assert!(DailyRule.is_clean(&sample(12, 1.1, 1.0, 0.35)));
        assert!(!DailyRule.is_clean(&sample(0, 0.85, 1.0, 0.7)));
        assert!(!DailyRule.is_clean(&sample(7, 0.85, 1.0, 0.9)));
    }
}

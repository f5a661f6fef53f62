pub mod baseline;
pub mod clean;
pub mod generator;

pub use baseline::{baseline_emission, baseline_intensity, time_of_day_factor};
pub use clean::{CleanPeriodRule, DailyRule, HourSample, RealTimeRule};
pub use generator::{
    generate_daily_predictions, generate_real_time_predictions, refresh_predictions,
    PredictionMode, HOURS_PER_DAY,
};

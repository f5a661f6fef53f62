use crate::model::{Company, PowerPlant, PredictionData};
use crate::prediction::{generate_daily_predictions, generate_real_time_predictions, PredictionMode};
use crate::random::RandomSource;
use crate::telemetry::LogManager;
use chrono::{NaiveDate, Utc};

/// Catalogs plus the latest prediction refresh.
#[derive(Debug, Clone, Default)]
pub struct MarketBoard {
    plants: Vec<PowerPlant>,
    companies: Vec<Company>,
    predictions: Vec<PredictionData>,
}

impl MarketBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both catalogs and drops predictions for the old plant set.
    pub fn load(&mut self, plants: Vec<PowerPlant>, companies: Vec<Company>) {
        self.plants = plants;
        self.companies = companies;
        self.predictions.clear();
    }

    pub fn plants(&self) -> &[PowerPlant] {
        &self.plants
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn predictions(&self) -> &[PredictionData] {
        &self.predictions
    }

    pub fn plant(&self, id: &str) -> Option<&PowerPlant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn predictions_for(&self, plant_id: &str) -> Option<&PredictionData> {
        self.predictions.iter().find(|p| p.plant_id == plant_id)
    }

    /// Regenerates every plant's series from scratch.
    pub fn refresh_predictions<R: RandomSource>(
        &mut self,
        mode: PredictionMode,
        start_hour: u32,
        date: NaiveDate,
        rng: &mut R,
    ) {
        let logger = LogManager::scoped("board");
        self.predictions = self
            .plants
            .iter()
            .map(|plant| {
                let hours = match mode {
                    PredictionMode::RealTime => {
                        generate_real_time_predictions(&plant.id, start_hour, rng)
                    }
                    PredictionMode::Daily => generate_daily_predictions(&plant.id, date, rng),
                };
                PredictionData::new(plant.id.clone(), hours)
            })
            .collect();

        let clean: usize = self.predictions.iter().map(|p| p.clean_hours().count()).sum();
        logger.record(&format!(
            "refreshed {} series ({:?}) at {}, {} clean hours",
            self.predictions.len(),
            mode,
            Utc::now().format("%H:%M:%S"),
            clean
        ));
    }
}

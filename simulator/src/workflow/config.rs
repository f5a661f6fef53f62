use anyhow::Context;
use offsetcore::model::MatchingCriteria;
use offsetcore::prediction::PredictionMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Buyer to match for; the first catalog company when absent.
    pub company_id: Option<String>,
    pub criteria: MatchingCriteria,
    pub mode: PredictionMode,
    pub seed: Option<u64>,
    pub contract_delay_ms: u64,
    pub verification_delay_ms: u64,
    pub pdf_delay_ms: u64,
    pub plants_path: Option<PathBuf>,
    pub companies_path: Option<PathBuf>,
    pub report_dir: PathBuf,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            company_id: None,
            criteria: MatchingCriteria::default(),
            mode: PredictionMode::RealTime,
            seed: None,
            contract_delay_ms: 2000,
            verification_delay_ms: 1000,
            pdf_delay_ms: 2000,
            plants_path: None,
            companies_path: None,
            report_dir: PathBuf::from("tools/data"),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        company_id: Option<String>,
        target_offset: f64,
        max_price_per_ton: f64,
        daily: bool,
    ) -> Self {
        Self {
            company_id,
            criteria: MatchingCriteria {
                target_offset,
                max_price_per_ton,
                preferred_time_slots: Vec::new(),
            },
            mode: if daily {
                PredictionMode::Daily
            } else {
                PredictionMode::RealTime
            },
            ..Default::default()
        }
    }

    pub fn contract_delay(&self) -> Duration {
        Duration::from_millis(self.contract_delay_ms)
    }

    pub fn verification_delay(&self) -> Duration {
        Duration::from_millis(self.verification_delay_ms)
    }

    pub fn pdf_delay(&self) -> Duration {
        Duration::from_millis(self.pdf_delay_ms)
    }
}

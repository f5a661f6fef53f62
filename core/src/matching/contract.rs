use crate::model::{Company, MatchResult};
use crate::prelude::{MarketError, MarketResult};
use crate::random::RandomSource;
use crate::telemetry::LogManager;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONTRACT_FAILURE_MESSAGE: &str =
    "An error occurred while processing the contract. Please try again shortly.";
pub const DEFAULT_CONTRACT_DELAY: Duration = Duration::from_millis(2000);

/// Fraction of draws at or below which a contract is rejected.
const FAILURE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractReceipt {
    pub contract_id: String,
    pub match_id: String,
    pub company_id: String,
    pub executed_at: DateTime<Utc>,
}

/// Simulated settlement desk. Each call fails once or succeeds; nothing retries.
#[derive(Debug, Clone)]
pub struct ContractDesk {
    delay: Duration,
    logger: LogManager,
}

impl ContractDesk {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            logger: LogManager::scoped("contract"),
        }
    }

    pub async fn execute_contract<R: RandomSource>(
        &self,
        result: &MatchResult,
        company: &Company,
        rng: &mut R,
    ) -> MarketResult<ContractReceipt> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if rng.next_unit() > FAILURE_THRESHOLD {
            let executed_at = Utc::now();
            let receipt = ContractReceipt {
                contract_id: format!("contract_{}", executed_at.timestamp_millis()),
                match_id: result.id.clone(),
                company_id: company.id.clone(),
                executed_at,
            };
            self.logger.record(&format!(
                "{} executed for {} on {}",
                receipt.contract_id, company.name, result.plant_name
            ));
            Ok(receipt)
        } else {
            self.logger
                .caution(&format!("contract for {} rejected", result.id));
            Err(MarketError::ContractFailed(CONTRACT_FAILURE_MESSAGE.to_string()))
        }
    }
}

impl Default for ContractDesk {
    fn default() -> Self {
        Self::new(DEFAULT_CONTRACT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::matcher::fixtures::company;
    use crate::random::testing::ScriptedRandom;
    use crate::random::SeededRandom;

    fn sample_match() -> MatchResult {
        MatchResult {
            id: "match_pp_solar_farm_1_1".into(),
            plant_id: "pp_solar_farm_1".into(),
            plant_name: "Solar Farm 1".into(),
            time_slots: vec!["03:00-04:00".into()],
            offset_amount: 20.0,
            price_per_ton: 26_460.0,
            carbon_intensity: 0.02,
            confidence: 0.9,
            estimated_savings: 5_900.0,
        }
    }

    #[tokio::test]
    async fn high_draw_executes_contract() {
        let desk = ContractDesk::new(Duration::ZERO);
        let mut rng = ScriptedRandom::constant(0.5);
        let receipt = desk
            .execute_contract(&sample_match(), &company(), &mut rng)
            .await
            .unwrap();
        assert!(receipt.contract_id.starts_with("contract_"));
        assert_eq!(receipt.company_id, "comp_samsung");
    }

    #[tokio::test]
    async fn low_draw_surfaces_fixed_message() {
        let desk = ContractDesk::new(Duration::ZERO);
        let mut rng = ScriptedRandom::constant(0.05);
        let err = desk
            .execute_contract(&sample_match(), &company(), &mut rng)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            MarketError::ContractFailed(CONTRACT_FAILURE_MESSAGE.to_string())
        );
        assert_eq!(err.to_string(), CONTRACT_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn success_rate_near_ninety_percent() {
        let desk = ContractDesk::new(Duration::ZERO);
        let mut rng = SeededRandom::seeded(2024);
        let mut successes = 0;
        for _ in 0..1000 {
            if desk
                .execute_contract(&sample_match(), &company(), &mut rng)
                .await
                .is_ok()
            {
                successes += 1;
            }
        }
        assert!((850..=950).contains(&successes), "successes {successes}");
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_configured_delay() {
        let desk = ContractDesk::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let started = tokio::time::Instant::now();
        desk.execute_contract(&sample_match(), &company(), &mut rng)
            .await
            .unwrap();
        assert!(started.elapsed() >= DEFAULT_CONTRACT_DELAY);
    }
}

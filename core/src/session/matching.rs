use crate::certificate::CertificateService;
use crate::matching::{find_matches, ContractDesk, ContractReceipt};
use crate::model::{Certificate, Company, MatchResult, MatchingCriteria};
use crate::prelude::{MarketError, MarketResult};
use crate::random::RandomSource;
use crate::session::board::MarketBoard;
use crate::telemetry::MetricsRecorder;
use serde::{Deserialize, Serialize};

/// Partial criteria edit; absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaUpdate {
    pub target_offset: Option<f64>,
    pub max_price_per_ton: Option<f64>,
    pub preferred_time_slots: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub receipt: ContractReceipt,
    pub certificate: Certificate,
}

/// Holds the in-progress flag for one contract call, clearing it even when
/// the caller drops the future mid-flight.
struct ContractInFlight<'a> {
    flag: &'a mut bool,
}

impl<'a> ContractInFlight<'a> {
    fn begin(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for ContractInFlight<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

fn check_amount(name: &str, value: f64) -> MarketResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MarketError::InvalidCriteria(format!(
            "{} must be a finite, non-negative number (got {})",
            name, value
        )));
    }
    Ok(())
}

/// Buyer-side workflow state: selection, criteria, results and issued certificates.
#[derive(Debug, Default)]
pub struct MatchingSession {
    selected_company: Option<Company>,
    criteria: MatchingCriteria,
    results: Vec<MatchResult>,
    certificates: Vec<Certificate>,
    contract_in_progress: bool,
}

impl MatchingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_company(&self) -> Option<&Company> {
        self.selected_company.as_ref()
    }

    pub fn criteria(&self) -> &MatchingCriteria {
        &self.criteria
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub fn contract_in_progress(&self) -> bool {
        self.contract_in_progress
    }

    /// Changing the buyer invalidates earlier results.
    pub fn select_company(&mut self, company: Option<Company>) {
        self.selected_company = company;
        self.results.clear();
    }

    pub fn update_criteria(&mut self, update: CriteriaUpdate) -> MarketResult<&MatchingCriteria> {
        if let Some(target) = update.target_offset {
            check_amount("targetOffset", target)?;
        }
        if let Some(ceiling) = update.max_price_per_ton {
            check_amount("maxPricePerTon", ceiling)?;
        }

        if let Some(target) = update.target_offset {
            self.criteria.target_offset = target;
        }
        if let Some(ceiling) = update.max_price_per_ton {
            self.criteria.max_price_per_ton = ceiling;
        }
        if let Some(slots) = update.preferred_time_slots {
            self.criteria.preferred_time_slots = slots;
        }
        Ok(&self.criteria)
    }

    pub fn run_matching(
        &mut self,
        board: &MarketBoard,
        metrics: &MetricsRecorder,
    ) -> MarketResult<&[MatchResult]> {
        let company = self
            .selected_company
            .clone()
            .ok_or_else(|| MarketError::InvalidInput("no company selected".into()))?;

        let results = find_matches(&company, &self.criteria, board.plants(), board.predictions());
        metrics.record_matching_run(results.len());
        self.results = results;
        Ok(&self.results)
    }

    /// Executes the contract for `match_id` and issues its certificate.
    ///
    /// A failed contract is returned unchanged and leaves the session as it was.
    pub async fn settle<R: RandomSource>(
        &mut self,
        match_id: &str,
        desk: &ContractDesk,
        certificates: &CertificateService,
        metrics: &MetricsRecorder,
        rng: &mut R,
    ) -> MarketResult<Settlement> {
        let company = self
            .selected_company
            .clone()
            .ok_or_else(|| MarketError::InvalidInput("no company selected".into()))?;
        let result = self
            .results
            .iter()
            .find(|r| r.id == match_id)
            .cloned()
            .ok_or_else(|| MarketError::InvalidInput(format!("unknown match {}", match_id)))?;

        let outcome = {
            let _in_flight = ContractInFlight::begin(&mut self.contract_in_progress);
            desk.execute_contract(&result, &company, rng).await
        };
        metrics.record_contract(outcome.is_ok());

        let receipt = outcome?;
        let certificate = certificates.issue(&result, &company, &receipt.contract_id, rng)?;
        self.certificates.push(certificate.clone());
        Ok(Settlement {
            receipt,
            certificate,
        })
    }

    pub fn record_certificate(&mut self, certificate: Certificate) {
        self.certificates.push(certificate);
    }

    /// Resets selection, results and criteria; issued certificates are kept.
    pub fn clear(&mut self) {
        self.selected_company = None;
        self.results.clear();
        self.criteria = MatchingCriteria::default();
        self.contract_in_progress = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::matcher::fixtures::{company, plant, series};
    use crate::model::PlantType;
    use crate::random::testing::ScriptedRandom;
    use std::time::Duration;

    fn board_with_series() -> MarketBoard {
        let mut board = MarketBoard::new();
        board.load(
            vec![
                plant("pp_solar_farm_1", PlantType::Renewable, 200.0),
                plant("pp_seocheon_gas", PlantType::Lng, 900.0),
            ],
            vec![company()],
        );
        board
    }

    fn session_with_results() -> (MatchingSession, MetricsRecorder) {
        // the board's own refresh is random; inject fixed series instead
        let board = board_with_series();
        let predictions = vec![
            series("pp_solar_farm_1", &[3], 0.02, 0.9),
            series("pp_seocheon_gas", &[2, 3], 0.2, 0.9),
        ];
        let mut session = MatchingSession::new();
        session.select_company(Some(company()));
        let results = find_matches(
            &company(),
            session.criteria(),
            board.plants(),
            &predictions,
        );
        session.results = results;
        (session, MetricsRecorder::new())
    }

    #[test]
    fn update_criteria_merges_fields() {
        let mut session = MatchingSession::new();
        let criteria = session
            .update_criteria(CriteriaUpdate {
                max_price_per_ton: Some(30_000.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(criteria.max_price_per_ton, 30_000.0);
        assert_eq!(criteria.target_offset, 100.0);
    }

    #[test]
    fn update_criteria_rejects_bad_values_without_partial_apply() {
        let mut session = MatchingSession::new();
        let err = session
            .update_criteria(CriteriaUpdate {
                target_offset: Some(10.0),
                max_price_per_ton: Some(f64::NAN),
                preferred_time_slots: None,
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidCriteria(_)));
        assert_eq!(session.criteria().target_offset, 100.0);
    }

    #[test]
    fn run_matching_requires_company() {
        let board = board_with_series();
        let mut session = MatchingSession::new();
        let err = session
            .run_matching(&board, &MetricsRecorder::new())
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput(_)));
    }

    #[test]
    fn run_matching_on_unrefreshed_board_is_empty() {
        let board = board_with_series();
        let metrics = MetricsRecorder::new();
        let mut session = MatchingSession::new();
        session.select_company(Some(company()));
        assert!(session.run_matching(&board, &metrics).unwrap().is_empty());
        assert_eq!(metrics.snapshot().matching_runs, 1);
    }

    #[tokio::test]
    async fn settle_issues_certificate_on_success() {
        let (mut session, metrics) = session_with_results();
        let best = session.results()[0].id.clone();
        let desk = ContractDesk::new(Duration::ZERO);
        let certs = CertificateService::new(Duration::ZERO, Duration::ZERO);
        let settlement = session
            .settle(&best, &desk, &certs, &metrics, &mut ScriptedRandom::constant(0.5))
            .await
            .unwrap();
        assert_eq!(settlement.receipt.match_id, best);
        assert_eq!(session.certificates().len(), 1);
        assert!(!session.contract_in_progress());
        assert_eq!(metrics.snapshot().contracts_executed, 1);
    }

    #[tokio::test]
    async fn settle_failure_leaves_ledger_untouched() {
        let (mut session, metrics) = session_with_results();
        let best = session.results()[0].id.clone();
        let desk = ContractDesk::new(Duration::ZERO);
        let certs = CertificateService::new(Duration::ZERO, Duration::ZERO);
        let err = session
            .settle(&best, &desk, &certs, &metrics, &mut ScriptedRandom::constant(0.01))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::ContractFailed(_)));
        assert!(session.certificates().is_empty());
        assert_eq!(metrics.snapshot().contracts_failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_settlement_clears_in_progress_flag() {
        let (mut session, metrics) = session_with_results();
        let best = session.results()[0].id.clone();
        let desk = ContractDesk::new(Duration::from_secs(2));
        let certs = CertificateService::new(Duration::ZERO, Duration::ZERO);
        let mut rng = ScriptedRandom::constant(0.5);

        let outcome = tokio::time::timeout(
            Duration::from_millis(10),
            session.settle(&best, &desk, &certs, &metrics, &mut rng),
        )
        .await;

        assert!(outcome.is_err());
        assert!(!session.contract_in_progress());
        assert!(session.certificates().is_empty());
        assert_eq!(metrics.snapshot().contracts_executed, 0);
    }

    #[test]
    fn clear_restores_defaults_but_keeps_certificates() {
        let (mut session, _) = session_with_results();
        let certificate = CertificateService::default()
            .issue(
                &session.results()[0].clone(),
                &company(),
                "contract_9",
                &mut ScriptedRandom::constant(0.4),
            )
            .unwrap();
        session.record_certificate(certificate);
        session.clear();
        assert!(session.selected_company().is_none());
        assert!(session.results().is_empty());
        assert_eq!(session.criteria(), &MatchingCriteria::default());
        assert_eq!(session.certificates().len(), 1);
    }
}

use crate::workflow::config::WorkflowConfig;
use anyhow::{anyhow, Context};
use chrono::{Local, Timelike};
use offsetcore::certificate::{CertificateService, Verification};
use offsetcore::matching::ContractDesk;
use offsetcore::model::{MatchResult, MatchingCriteria, PredictionData};
use offsetcore::random::RandomSource;
use offsetcore::session::{CriteriaUpdate, MarketBoard, MatchingSession, Settlement};
use offsetcore::telemetry::MetricsRecorder;
use std::sync::Arc;

pub struct WorkflowResult {
    pub company_name: String,
    pub predictions: Vec<PredictionData>,
    pub matches: Vec<MatchResult>,
    pub clean_hours: usize,
}

pub struct SettlementReport {
    pub settlement: Settlement,
    pub verification: Verification,
    pub pdf_url: String,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    desk: ContractDesk,
    certificates: CertificateService,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            desk: ContractDesk::new(config.contract_delay()),
            certificates: CertificateService::new(config.verification_delay(), config.pdf_delay()),
            metrics: Arc::new(MetricsRecorder::new()),
            config,
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn execute<R: RandomSource>(
        &self,
        board: &mut MarketBoard,
        session: &mut MatchingSession,
        rng: &mut R,
    ) -> anyhow::Result<WorkflowResult> {
        self.execute_with(board, session, &self.config.criteria, rng)
    }

    /// Refreshes predictions from the current local hour and ranks matches.
    pub fn execute_with<R: RandomSource>(
        &self,
        board: &mut MarketBoard,
        session: &mut MatchingSession,
        criteria: &MatchingCriteria,
        rng: &mut R,
    ) -> anyhow::Result<WorkflowResult> {
        let now = Local::now();
        board.refresh_predictions(self.config.mode, now.hour(), now.date_naive(), rng);

        if session.selected_company().is_none() {
            let company = match self.config.company_id.as_deref() {
                Some(id) => board
                    .company(id)
                    .cloned()
                    .with_context(|| format!("company {} not in catalog", id))?,
                None => board
                    .companies()
                    .first()
                    .cloned()
                    .context("company catalog is empty")?,
            };
            session.select_company(Some(company));
        }

        session
            .update_criteria(CriteriaUpdate {
                target_offset: Some(criteria.target_offset),
                max_price_per_ton: Some(criteria.max_price_per_ton),
                preferred_time_slots: Some(criteria.preferred_time_slots.clone()),
            })
            .context("applying matching criteria")?;

        let matches = session
            .run_matching(board, &self.metrics)
            .context("running matcher")?
            .to_vec();

        Ok(WorkflowResult {
            company_name: session
                .selected_company()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            clean_hours: board
                .predictions()
                .iter()
                .map(|p| p.clean_hours().count())
                .sum(),
            predictions: board.predictions().to_vec(),
            matches,
        })
    }

    /// Contracts the cheapest match, then verifies and renders its certificate.
    pub async fn settle<R: RandomSource>(
        &self,
        session: &mut MatchingSession,
        rng: &mut R,
    ) -> anyhow::Result<SettlementReport> {
        let best = session
            .results()
            .first()
            .map(|m| m.id.clone())
            .ok_or_else(|| anyhow!("no match to settle"))?;

        let settlement = session
            .settle(&best, &self.desk, &self.certificates, &self.metrics, rng)
            .await
            .with_context(|| format!("settling {}", best))?;
        let verification = self
            .certificates
            .verify(&settlement.certificate.id, rng)
            .await;
        let pdf_url = self.certificates.render_pdf(&settlement.certificate).await;

        Ok(SettlementReport {
            settlement,
            verification,
            pdf_url,
        })
    }
}

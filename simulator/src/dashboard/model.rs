use crate::workflow::runner::WorkflowResult;
use offsetcore::model::{Certificate, MatchResult, MatchingCriteria, PredictionData};
use serde::{Deserialize, Serialize};

/// Snapshot served to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardModel {
    pub company_name: String,
    pub criteria: MatchingCriteria,
    pub matches: Vec<MatchResult>,
    pub predictions: Vec<PredictionData>,
    pub certificates: Vec<Certificate>,
    pub clean_hours: usize,
}

impl DashboardModel {
    pub fn from_result(
        result: &WorkflowResult,
        criteria: &MatchingCriteria,
        certificates: &[Certificate],
    ) -> Self {
        Self {
            company_name: result.company_name.clone(),
            criteria: criteria.clone(),
            matches: result.matches.clone(),
            predictions: result.predictions.clone(),
            certificates: certificates.to_vec(),
            clean_hours: result.clean_hours,
        }
    }
}

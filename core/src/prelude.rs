pub use crate::model::{
    Certificate, CertificateStatus, Company, HourlyPrediction, MatchResult, MatchingCriteria,
    PlantType, PowerPlant, PredictionData,
};
pub use crate::random::{RandomSource, SeededRandom};

/// Common error type for market operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    ContractFailed(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type MarketResult<T> = Result<T, MarketError>;

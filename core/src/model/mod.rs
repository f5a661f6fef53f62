pub mod certificate;
pub mod company;
pub mod matching;
pub mod plant;
pub mod prediction;

pub use certificate::{Certificate, CertificateStatus};
pub use company::{Company, EsgManager, UsagePattern};
pub use matching::{MatchResult, MatchingCriteria};
pub use plant::{FuelMix, PlantStatus, PlantType, PowerPlant};
pub use prediction::{HourlyPrediction, PredictionData};

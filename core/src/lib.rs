//! Matching, pricing and prediction core for the carbon-offset platform.
//!
//! Plants publish synthetic hourly predictions, buyers submit matching
//! criteria, and the matcher ranks the clean-hour blocks it can price under
//! the buyer's ceiling. Randomness is always borrowed from a caller-owned
//! [`random::RandomSource`] so every stage stays reproducible under test.

pub mod certificate;
pub mod matching;
pub mod math;
pub mod model;
pub mod prediction;
pub mod prelude;
pub mod pricing;
pub mod random;
pub mod session;
pub mod telemetry;

pub use prelude::{MarketError, MarketResult};

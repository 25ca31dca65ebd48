//! hs-uncertainty: Monte Carlo sensitivity of the design load.
//!
//! The random source is always passed in, so a seeded generator gives
//! repeatable runs.

pub mod engine;
pub mod noise;
pub mod perturb;

pub use engine::{MonteCarlo, MonteCarloSample, MonteCarloSummary, percentile_index, run_monte_carlo};
pub use noise::{multiplicative_factor, standard_normal};
pub use perturb::{PerturbationProfile, PerturbedRecords};

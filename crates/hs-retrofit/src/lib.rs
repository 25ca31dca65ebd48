//! hs-retrofit: rank retrofit measures by simple payback.

pub mod catalog;
pub mod evaluate;

pub use catalog::{CostBasis, ImprovementAction, Modification, improvement_catalog};
pub use evaluate::{
    ImprovementCandidate, TOP_N, evaluate_action, evaluate_all, evaluate_improvements,
    evaluate_improvements_with, rank_candidates,
};

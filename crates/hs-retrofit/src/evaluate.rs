//! Improvement evaluation and payback ranking.

use hs_load::{LoadModel, LoadResult, Payback, payback_from_power};
use hs_project::BuildingRecord;
use serde::Serialize;

use crate::catalog::{ImprovementAction, improvement_catalog};

/// Number of candidates [`evaluate_improvements`] returns at most.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementCandidate {
    pub key: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub e_year_improved_kwh: f64,
    /// Annual energy saved, never negative (kWh/yr).
    pub saving_kwh: f64,
    /// `saving_kwh` at the flat tariff (currency/yr).
    pub saving_per_year: f64,
    /// Design-load reduction (W).
    pub delta_q_w: f64,
    pub payback: Payback,
    /// Payback estimated from `delta_q_w` over the heating period.
    pub power_payback: Payback,
}

pub fn evaluate_action(
    model: &LoadModel,
    record: &BuildingRecord,
    base: &LoadResult,
    action: &ImprovementAction,
) -> ImprovementCandidate {
    let price = model.config().tariffs.flat_price_per_kwh;
    let improved = model.compute(&action.modification.apply(model, record, base));

    let cost = action.cost.cost(base);
    let saving_kwh = (base.e_year_kwh - improved.e_year_kwh).max(0.0);
    let saving_per_year = saving_kwh * price;
    let delta_q_w = base.q_design_w - improved.q_design_w;

    ImprovementCandidate {
        key: action.key,
        name: action.name,
        cost,
        e_year_improved_kwh: improved.e_year_kwh,
        saving_kwh,
        saving_per_year,
        delta_q_w,
        payback: Payback::from_saving(cost, saving_per_year),
        power_payback: payback_from_power(delta_q_w, cost, base.climate.heating_hours, price),
    }
}

/// Every catalog measure in declaration order, unranked.
pub fn evaluate_all(model: &LoadModel, record: &BuildingRecord) -> Vec<ImprovementCandidate> {
    let base = model.compute(record);
    improvement_catalog()
        .iter()
        .map(|action| evaluate_action(model, record, &base, action))
        .collect()
}

/// Finite-payback candidates, shortest payback first, at most [`TOP_N`].
/// Equal paybacks keep their input order.
pub fn rank_candidates(candidates: Vec<ImprovementCandidate>) -> Vec<ImprovementCandidate> {
    let mut ranked: Vec<(f64, ImprovementCandidate)> = candidates
        .into_iter()
        .filter_map(|c| c.payback.years().map(|years| (years, c)))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().take(TOP_N).map(|(_, c)| c).collect()
}

pub fn evaluate_improvements_with(model: &LoadModel, record: &BuildingRecord) -> Vec<ImprovementCandidate> {
    let all = evaluate_all(model, record);
    let total = all.len();
    let ranked = rank_candidates(all);
    tracing::info!(
        evaluated = total,
        returned = ranked.len(),
        best = ranked.first().map(|c| c.key),
        "ranked improvements"
    );
    ranked
}

/// Top retrofit measures for `record` under the default model.
pub fn evaluate_improvements(record: &BuildingRecord) -> Vec<ImprovementCandidate> {
    evaluate_improvements_with(&LoadModel::default(), record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(key: &'static str, payback: Payback) -> ImprovementCandidate {
        ImprovementCandidate {
            key,
            name: key,
            cost: 0.0,
            e_year_improved_kwh: 0.0,
            saving_kwh: 0.0,
            saving_per_year: 0.0,
            delta_q_w: 0.0,
            payback,
            power_payback: Payback::Unbounded,
        }
    }

    #[test]
    fn ranking_drops_unbounded_and_keeps_ties_stable() {
        let ranked = rank_candidates(vec![
            candidate("a", Payback::Years(4.0)),
            candidate("b", Payback::Unbounded),
            candidate("c", Payback::Years(1.0)),
            candidate("d", Payback::Years(4.0)),
        ]);
        let keys: Vec<_> = ranked.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["c", "a", "d"]);
    }

    #[test]
    fn ranking_truncates() {
        let many = (0..8)
            .map(|i| candidate("x", Payback::Years(f64::from(i))))
            .collect();
        assert_eq!(rank_candidates(many).len(), TOP_N);
    }
}

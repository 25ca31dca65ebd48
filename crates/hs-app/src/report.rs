//! Full building report: load, economy, uncertainty and retrofit ranking.

use hs_load::{CostEstimate, LoadModel, LoadResult, MONTHS, annual_cost, compare_tariffs, monthly_energy};
use hs_project::BuildingRecord;
use hs_retrofit::{ImprovementCandidate, evaluate_improvements_with};
use hs_uncertainty::{MonteCarlo, MonteCarloSummary};
use serde::Serialize;

use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub load: LoadResult,
    /// Running cost with the record's heating system.
    pub economy: CostEstimate,
    pub tariff_comparison: Vec<CostEstimate>,
    pub monthly_energy_kwh: [f64; MONTHS],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<MonteCarloSummary>,
    pub improvements: Vec<ImprovementCandidate>,
    /// Numeric inputs that could not be read and were replaced by defaults.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unparsed_fields: Vec<&'static str>,
}

/// Options for [`build_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub monte_carlo: bool,
    pub improvements: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            monte_carlo: true,
            improvements: true,
        }
    }
}

pub fn build_report(record: &BuildingRecord, settings: &Settings, options: ReportOptions) -> Report {
    let model = LoadModel::new(settings.model.clone());
    let load = model.compute(record);
    let tariffs = &model.config().tariffs;

    let economy = annual_cost(load.e_year_kwh, load.inputs.heating_system, tariffs);
    let tariff_comparison = compare_tariffs(load.e_year_kwh, tariffs);
    let monthly_energy_kwh = monthly_energy(&load);

    let monte_carlo = options.monte_carlo.then(|| {
        let mc = &settings.monte_carlo;
        let mut rng = mc.rng();
        MonteCarlo::new(&model, mc.profile.clone()).run(record, mc.samples, &mut rng)
    });

    let improvements = if options.improvements {
        evaluate_improvements_with(&model, record)
    } else {
        Vec::new()
    };

    let unparsed_fields = crate::record_service::unparsed_fields(record);
    for field in &unparsed_fields {
        tracing::debug!(field, "numeric input not readable, default used");
    }

    Report {
        load,
        economy,
        tariff_comparison,
        monthly_energy_kwh,
        monte_carlo,
        improvements,
        unparsed_fields,
    }
}

//! Running costs and payback.

use hs_project::HeatingSystem;
use serde::Serialize;

use crate::config::Tariffs;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEstimate {
    pub system: HeatingSystem,
    pub efficiency: f64,
    /// Energy bought from the supplier (kWh/yr).
    pub delivered_kwh: f64,
    pub price_per_kwh: f64,
    pub annual_cost: f64,
    pub monthly_cost: f64,
    /// Gas consumption for gas-fired systems (m³/yr).
    pub gas_volume_m3: Option<f64>,
}

/// Cost of covering `e_year_kwh` of heat with `system`.
pub fn annual_cost(e_year_kwh: f64, system: HeatingSystem, tariffs: &Tariffs) -> CostEstimate {
    let tariff = tariffs.for_system(system);
    let heat = if e_year_kwh.is_finite() { e_year_kwh.max(0.0) } else { 0.0 };
    let delivered_kwh = if tariff.efficiency > 0.0 {
        heat / tariff.efficiency
    } else {
        heat
    };
    let annual_cost = delivered_kwh * tariff.price_per_kwh;
    let gas_volume_m3 = (system == HeatingSystem::Gas && tariffs.gas_kwh_per_m3 > 0.0)
        .then(|| delivered_kwh / tariffs.gas_kwh_per_m3);

    CostEstimate {
        system,
        efficiency: tariff.efficiency,
        delivered_kwh,
        price_per_kwh: tariff.price_per_kwh,
        annual_cost,
        monthly_cost: annual_cost / 12.0,
        gas_volume_m3,
    }
}

/// The same heat demand priced for every heating system.
pub fn compare_tariffs(e_year_kwh: f64, tariffs: &Tariffs) -> Vec<CostEstimate> {
    HeatingSystem::ALL
        .iter()
        .map(|system| annual_cost(e_year_kwh, *system, tariffs))
        .collect()
}

/// Simple payback period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    Years(f64),
    /// The measure saves nothing.
    Unbounded,
}

impl Payback {
    pub fn from_saving(cost: f64, annual_saving: f64) -> Self {
        if annual_saving > 0.0 && annual_saving.is_finite() {
            Self::Years(cost.max(0.0) / annual_saving)
        } else {
            Self::Unbounded
        }
    }

    pub fn years(&self) -> Option<f64> {
        match self {
            Self::Years(years) => Some(*years),
            Self::Unbounded => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Years(_))
    }
}

/// Payback of a design-load reduction `delta_q_w` sustained over the heating period.
pub fn payback_from_power(delta_q_w: f64, cost: f64, heating_hours: f64, price_per_kwh: f64) -> Payback {
    let saved_kwh = delta_q_w.max(0.0) * heating_hours / 1000.0;
    Payback::from_saving(cost, saved_kwh * price_per_kwh)
}

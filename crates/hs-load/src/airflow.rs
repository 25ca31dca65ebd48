//! Infiltration and ventilation.

use hs_core::constants::SECONDS_PER_HOUR;
use hs_core::{RuleTable, TextRule};
use serde::Serialize;

use crate::config::ModelConfig;
use crate::inputs::ResolvedInputs;

const TIGHTNESS_ACH: RuleTable<f64> = RuleTable::words(
    &[
        TextRule {
            keywords: &["низ", "low"],
            value: 0.8,
        },
        TextRule {
            keywords: &["выс", "high"],
            value: 0.3,
        },
        TextRule {
            keywords: &["гермет", "airtight"],
            value: 0.25,
        },
        TextRule {
            keywords: &["стар", "old"],
            value: 1.0,
        },
    ],
    0.5,
);

const HIGH_OCCUPANCY: RuleTable<bool> = RuleTable::new(
    &[TextRule {
        keywords: &["офис", "много людей", "office", "crowded"],
        value: true,
    }],
    false,
);

/// Unadjusted infiltration rate: the explicit value, else the tightness
/// descriptor, else 0.5 ACH.
pub fn base_infiltration_ach(explicit: Option<f64>, tightness: Option<&str>) -> f64 {
    if let Some(ach) = explicit.filter(|v| v.is_finite() && *v > 0.0) {
        return ach;
    }
    match tightness {
        Some(text) => TIGHTNESS_ACH.first_match(text),
        None => TIGHTNESS_ACH.default,
    }
}

/// Base rate adjusted for wind and stack effect, clamped to the model range.
pub fn effective_infiltration_ach(base_ach: f64, wind_mps: f64, floors: u32, config: &ModelConfig) -> f64 {
    let wind = config.wind_coefficient * (wind_mps - config.reference_wind_mps);
    let stack = config.floor_coefficient * (f64::from(floors) - 1.0);
    (base_ach * (1.0 + wind + stack)).clamp(config.min_ach, config.max_ach)
}

pub fn ventilation_ach(occupancy: Option<&str>, config: &ModelConfig) -> f64 {
    if occupancy.is_some_and(|text| HIGH_OCCUPANCY.first_match(text)) {
        config.high_occupancy_ventilation_ach
    } else {
        config.ventilation_ach
    }
}

/// Air mass flow for an air change rate (kg/s).
pub fn air_mass_flow(volume_m3: f64, ach: f64, config: &ModelConfig) -> f64 {
    config.air_density_kg_m3 * volume_m3 * ach / SECONDS_PER_HOUR
}

/// Sensible heat carried by an air mass flow (W).
pub fn airflow_loss(mass_flow_kg_s: f64, dt_k: f64, config: &ModelConfig) -> f64 {
    mass_flow_kg_s * config.air_cp_j_per_kg_k * dt_k
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Airflow {
    pub base_infiltration_ach: f64,
    pub infiltration_ach: f64,
    pub ventilation_ach: f64,
    pub recuperation: f64,
    pub infiltration_mass_flow_kg_s: f64,
    /// Ventilation mass flow after heat recovery (kg/s).
    pub ventilation_mass_flow_kg_s: f64,
}

impl Airflow {
    pub fn resolve(
        inputs: &ResolvedInputs,
        tightness: Option<&str>,
        occupancy: Option<&str>,
        config: &ModelConfig,
    ) -> Self {
        let volume = inputs.volume_m3();
        let base = base_infiltration_ach(inputs.infiltration_ach, tightness);
        let infiltration = effective_infiltration_ach(base, inputs.wind_mps, inputs.floors, config);
        let ventilation = ventilation_ach(occupancy, config);
        let recuperation = if inputs.recuperation.is_finite() {
            inputs.recuperation.clamp(0.0, config.max_recuperation)
        } else {
            0.0
        };

        Self {
            base_infiltration_ach: base,
            infiltration_ach: infiltration,
            ventilation_ach: ventilation,
            recuperation,
            infiltration_mass_flow_kg_s: air_mass_flow(volume, infiltration, config),
            ventilation_mass_flow_kg_s: air_mass_flow(volume, ventilation, config) * (1.0 - recuperation),
        }
    }

    pub fn infiltration_loss(&self, dt_k: f64, config: &ModelConfig) -> f64 {
        airflow_loss(self.infiltration_mass_flow_kg_s, dt_k, config)
    }

    pub fn ventilation_loss(&self, dt_k: f64, config: &ModelConfig) -> f64 {
        airflow_loss(self.ventilation_mass_flow_kg_s, dt_k, config)
    }
}

//! Model constants and tariffs.

use hs_core::constants::{AIR_CP_J_PER_KG_K, AIR_DENSITY_KG_M3};
use hs_project::HeatingSystem;
use serde::{Deserialize, Serialize};

/// Design irradiance on glazing by season (W/m²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarIrradiance {
    pub winter: f64,
    pub mid_season: f64,
    pub summer: f64,
}

impl Default for SolarIrradiance {
    fn default() -> Self {
        Self {
            winter: 150.0,
            mid_season: 250.0,
            summer: 450.0,
        }
    }
}

/// Conversion efficiency and energy price of one heating system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemTariff {
    /// Efficiency, or COP for heat pumps.
    pub efficiency: f64,
    /// Price per delivered kWh.
    pub price_per_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariffs {
    pub electric: SystemTariff,
    pub gas: SystemTariff,
    pub district: SystemTariff,
    /// Heat pumps are billed at the electricity price.
    pub heat_pump: SystemTariff,
    /// Energy content of natural gas (kWh/m³).
    pub gas_kwh_per_m3: f64,
    /// Single price used to value retrofit savings.
    pub flat_price_per_kwh: f64,
}

impl Tariffs {
    pub fn for_system(&self, system: HeatingSystem) -> SystemTariff {
        match system {
            HeatingSystem::Electric => self.electric,
            HeatingSystem::Gas => self.gas,
            HeatingSystem::District => self.district,
            HeatingSystem::HeatPump => self.heat_pump,
        }
    }
}

impl Default for Tariffs {
    fn default() -> Self {
        Self {
            electric: SystemTariff {
                efficiency: 1.0,
                price_per_kwh: 6.0,
            },
            gas: SystemTariff {
                efficiency: 0.9,
                price_per_kwh: 1.8,
            },
            district: SystemTariff {
                efficiency: 0.95,
                price_per_kwh: 2.5,
            },
            heat_pump: SystemTariff {
                efficiency: 3.0,
                price_per_kwh: 6.0,
            },
            gas_kwh_per_m3: 9.0,
            flat_price_per_kwh: 6.0,
        }
    }
}

/// Heat-balance model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Wall area per m² of floor area
    pub shape_factor: f64,
    /// Air density (kg/m³)
    pub air_density_kg_m3: f64,
    /// Specific heat of air (J/kg·K)
    pub air_cp_j_per_kg_k: f64,
    /// Temperature differences below this are treated as zero (K)
    pub dt_epsilon_k: f64,
    /// Wind speed at which infiltration is not adjusted (m/s)
    pub reference_wind_mps: f64,
    /// Relative infiltration change per m/s of wind deviation
    pub wind_coefficient: f64,
    /// Relative infiltration change per storey above the first
    pub floor_coefficient: f64,
    pub min_ach: f64,
    pub max_ach: f64,
    /// Baseline mechanical ventilation rate (ACH)
    pub ventilation_ach: f64,
    /// Ventilation rate for crowded or office occupancy (ACH)
    pub high_occupancy_ventilation_ach: f64,
    /// Upper bound on heat-recovery efficiency
    pub max_recuperation: f64,
    /// Shading factor when the record gives none
    pub default_shading: f64,
    pub irradiance: SolarIrradiance,
    /// Internal gain before occupancy/appliance adjustments (W/m²)
    pub base_internal_gain_w_m2: f64,
    /// Warm end of the load-vs-temperature curve (°C)
    pub curve_warm_limit_c: f64,
    /// The curve extends this far below the design temperature (K)
    pub curve_cold_margin_k: f64,
    /// When set, the uncertainty band also lowers the design temperature;
    /// the symmetric ± spread is applied either way.
    pub band_shifts_design_temperature: bool,
    /// Larger uncertainty bands are clamped to this (K)
    pub max_band_k: f64,
    /// Night setback depth (K)
    pub night_setback_k: f64,
    /// Night setback duration per day (h)
    pub night_setback_hours: f64,
    pub tariffs: Tariffs,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            shape_factor: 2.6,
            air_density_kg_m3: AIR_DENSITY_KG_M3,
            air_cp_j_per_kg_k: AIR_CP_J_PER_KG_K,
            dt_epsilon_k: 1e-6,
            reference_wind_mps: 3.0,
            wind_coefficient: 0.3,
            floor_coefficient: 0.05,
            min_ach: 0.1,
            max_ach: 2.0,
            ventilation_ach: 0.35,
            high_occupancy_ventilation_ach: 0.7,
            max_recuperation: 0.9,
            default_shading: 0.6,
            irradiance: SolarIrradiance::default(),
            base_internal_gain_w_m2: 3.0,
            curve_warm_limit_c: 5.0,
            curve_cold_margin_k: 5.0,
            band_shifts_design_temperature: true,
            max_band_k: 20.0,
            night_setback_k: 2.0,
            night_setback_hours: 8.0,
            tariffs: Tariffs::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ModelConfig =
            serde_json::from_str(r#"{"shape_factor": 3.0, "tariffs": {"flat_price_per_kwh": 7.5}}"#)
                .unwrap();
        assert_eq!(config.shape_factor, 3.0);
        assert_eq!(config.ventilation_ach, 0.35);
        assert_eq!(config.tariffs.flat_price_per_kwh, 7.5);
        assert_eq!(config.tariffs.gas.efficiency, 0.9);
    }

    #[test]
    fn heat_pump_billed_at_electric_price() {
        let tariffs = Tariffs::default();
        assert_eq!(
            tariffs.for_system(HeatingSystem::HeatPump).price_per_kwh,
            tariffs.electric.price_per_kwh
        );
    }
}

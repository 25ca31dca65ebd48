//! Steady-state heat balance.

use hs_climate::{ClimateDesignData, HEATING_SEASON_MEAN_DT_K, design_climate};
use hs_core::constants::HOURS_PER_DAY;
use hs_core::{in_kwh, watt_hours};
use hs_envelope::{ResolvedEnvelope, WallLayer, WindowType, resolve_wall, resolve_window};
use hs_project::BuildingRecord;
use serde::Serialize;

use crate::airflow::{Airflow, base_infiltration_ach};
use crate::condensation::{CondensationRisk, condensation_risk};
use crate::config::ModelConfig;
use crate::gains::{SolarSeason, internal_gain_w_m2, solar_gain};
use crate::inputs::ResolvedInputs;
use crate::schedule::{DailyArchetype, ProfilePoint, daily_profile};

/// Upper bound on load-curve length.
pub const MAX_CURVE_POINTS: usize = 256;

/// Material of the layer appended for `extra_insulation_m`.
pub const EXTRA_INSULATION_MATERIAL: &str = "mineral_wool";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub floors: u32,
    pub area_m2: f64,
    pub height_m: f64,
    pub volume_m3: f64,
    pub wall_area_m2: f64,
    pub window_area_m2: f64,
    /// Square-equivalent window perimeter (m).
    pub window_perimeter_m: f64,
}

impl Geometry {
    pub fn from_inputs(inputs: &ResolvedInputs, config: &ModelConfig) -> Self {
        Self {
            floors: inputs.floors,
            area_m2: inputs.area_m2,
            height_m: inputs.height_m,
            volume_m3: inputs.volume_m3(),
            wall_area_m2: config.shape_factor * inputs.area_m2,
            window_area_m2: inputs.window_area_m2,
            window_perimeter_m: 4.0 * inputs.window_area_m2.sqrt(),
        }
    }
}

/// Loss and gain components at design conditions (W).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadBreakdown {
    pub walls_w: f64,
    pub windows_w: f64,
    pub window_bridges_w: f64,
    pub infiltration_w: f64,
    pub ventilation_w: f64,
    pub solar_gain_w: f64,
    pub internal_gain_w: f64,
}

impl LoadBreakdown {
    pub fn losses_w(&self) -> f64 {
        self.walls_w + self.windows_w + self.window_bridges_w + self.infiltration_w + self.ventilation_w
    }

    pub fn gains_w(&self) -> f64 {
        self.solar_gain_w + self.internal_gain_w
    }

    pub fn net_w(&self) -> f64 {
        self.losses_w() - self.gains_w()
    }

    /// Named contributions to the design load; gains are negative.
    pub fn components(&self) -> [(&'static str, f64); 7] {
        [
            ("walls", self.walls_w),
            ("windows", self.windows_w),
            ("window bridges", self.window_bridges_w),
            ("infiltration", self.infiltration_w),
            ("ventilation", self.ventilation_w),
            ("solar gain", -self.solar_gain_w),
            ("internal gain", -self.internal_gain_w),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub t_out_c: f64,
    pub q_w: f64,
    pub q_min_w: f64,
    pub q_max_w: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadResult {
    pub inputs: ResolvedInputs,
    pub geometry: Geometry,
    pub envelope: ResolvedEnvelope,
    pub window: WindowType,
    pub climate: ClimateDesignData,
    /// Design outdoor temperature the load was computed at (°C).
    pub t_design_c: f64,
    pub delta_t_k: f64,
    /// Load per kelvin of indoor-outdoor difference (W/K).
    pub k_w_per_k: f64,
    pub q_design_w: f64,
    pub q_min_w: f64,
    pub q_max_w: f64,
    pub e_year_kwh: f64,
    pub breakdown: LoadBreakdown,
    pub airflow: Airflow,
    pub curve: Vec<CurvePoint>,
    pub daily_archetype: DailyArchetype,
    pub daily_profile: Vec<ProfilePoint>,
    pub condensation: CondensationRisk,
}

/// Heat-balance model with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadModel {
    config: ModelConfig,
}

impl LoadModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Wall envelope including any extra insulation the record asks for.
    pub fn envelope(&self, record: &BuildingRecord, inputs: &ResolvedInputs) -> ResolvedEnvelope {
        let envelope = resolve_wall(
            record.construction_key.as_deref(),
            record.wall_description.as_deref(),
        );
        match inputs.extra_insulation_m {
            Some(thickness) => envelope.with_layer(WallLayer::new(EXTRA_INSULATION_MATERIAL, thickness)),
            None => envelope,
        }
    }

    /// Infiltration rate before wind and stack adjustment (ACH).
    pub fn base_infiltration_ach(&self, record: &BuildingRecord) -> f64 {
        let inputs = ResolvedInputs::from_record(record);
        base_infiltration_ach(inputs.infiltration_ach, record.tightness.as_deref())
    }

    /// Fraction of annual energy left after a night setback.
    pub fn night_setback_factor(&self) -> f64 {
        let saving =
            self.config.night_setback_k * self.config.night_setback_hours / HOURS_PER_DAY as f64 / HEATING_SEASON_MEAN_DT_K;
        (1.0 - saving).clamp(0.0, 1.0)
    }

    /// Degree-day annual energy for a per-kelvin load (kWh).
    pub fn annual_energy_kwh(&self, k_w_per_k: f64, hdd: f64, night_setback: bool) -> f64 {
        let energy = in_kwh(watt_hours(k_w_per_k * hdd * HOURS_PER_DAY as f64));
        if night_setback {
            energy * self.night_setback_factor()
        } else {
            energy
        }
    }

    /// Load against outdoor temperature, warm end first, at most
    /// [`MAX_CURVE_POINTS`] points.
    pub fn load_curve(&self, t_in_c: f64, t_design_c: f64, k_w_per_k: f64, band_k: f64) -> Vec<CurvePoint> {
        let t_cold = t_design_c - self.config.curve_cold_margin_k;
        let warm = self.config.curve_warm_limit_c;
        (0..MAX_CURVE_POINTS)
            .map(|step| warm - step as f64)
            .take_while(|t| *t >= t_cold)
            .map(|t_out_c| {
                let dt = t_in_c - t_out_c;
                CurvePoint {
                    t_out_c,
                    q_w: k_w_per_k * dt,
                    q_min_w: k_w_per_k * (dt - band_k),
                    q_max_w: k_w_per_k * (dt + band_k),
                }
            })
            .collect()
    }

    pub fn compute(&self, record: &BuildingRecord) -> LoadResult {
        let config = &self.config;
        let mut inputs = ResolvedInputs::from_record(record);
        let max_band_k = config.max_band_k.max(0.0);
        if inputs.band_k > max_band_k {
            tracing::debug!(band_k = inputs.band_k, max_band_k, "uncertainty band clamped");
            inputs.band_k = max_band_k;
        }
        let envelope = self.envelope(record, &inputs);
        let window = *resolve_window(record.window_type.as_deref());
        let climate = design_climate(
            record.city.as_deref(),
            record.winter_severity.as_deref(),
            inputs.band_k,
        );
        let t_design_c = if config.band_shifts_design_temperature {
            climate.t_design_c
        } else {
            climate.t_design_unbanded_c
        };
        let band_k = climate.band_k;
        let geometry = Geometry::from_inputs(&inputs, config);
        let delta_t_k = inputs.indoor_c - t_design_c;

        let airflow = Airflow::resolve(
            &inputs,
            record.tightness.as_deref(),
            record.occupancy.as_deref(),
            config,
        );
        let breakdown = LoadBreakdown {
            walls_w: envelope.u_value * geometry.wall_area_m2 * delta_t_k,
            windows_w: window.u_w * geometry.window_area_m2 * delta_t_k,
            window_bridges_w: window.psi * geometry.window_perimeter_m * delta_t_k,
            infiltration_w: airflow.infiltration_loss(delta_t_k, config),
            ventilation_w: airflow.ventilation_loss(delta_t_k, config),
            solar_gain_w: solar_gain(
                geometry.window_area_m2,
                &window,
                record.orientation.as_deref(),
                inputs.shading,
                SolarSeason::Winter,
                config,
            ),
            internal_gain_w: internal_gain_w_m2(
                record.occupancy.as_deref(),
                record.appliances.as_deref(),
                config,
            ) * geometry.area_m2,
        };

        let q_design_w = breakdown.net_w();
        let dt_vanishes = delta_t_k.abs() < config.dt_epsilon_k;
        let k_w_per_k = if dt_vanishes {
            tracing::debug!(delta_t_k, "indoor equals design temperature, per-kelvin load set to zero");
            0.0
        } else {
            q_design_w / delta_t_k
        };
        let (q_min_w, q_max_w) = if band_k > 0.0 && !dt_vanishes {
            (k_w_per_k * (delta_t_k - band_k), k_w_per_k * (delta_t_k + band_k))
        } else {
            (q_design_w, q_design_w)
        };

        let e_year_kwh = self.annual_energy_kwh(k_w_per_k, climate.hdd, inputs.night_setback);
        let curve = self.load_curve(inputs.indoor_c, t_design_c, k_w_per_k, band_k);
        let daily_archetype = DailyArchetype::from_occupancy(record.occupancy.as_deref());
        let daily_profile = daily_profile(daily_archetype, q_design_w);
        let condensation = condensation_risk(inputs.indoor_c, t_design_c, inputs.indoor_rh, envelope.u_value);

        tracing::debug!(
            city = climate.city.key,
            t_design_c,
            q_design_w,
            e_year_kwh,
            "computed design load"
        );

        LoadResult {
            inputs,
            geometry,
            envelope,
            window,
            climate,
            t_design_c,
            delta_t_k,
            k_w_per_k,
            q_design_w,
            q_min_w,
            q_max_w,
            e_year_kwh,
            breakdown,
            airflow,
            curve,
            daily_archetype,
            daily_profile,
            condensation,
        }
    }
}

/// [`LoadModel::compute`] with the default configuration.
pub fn compute_load(record: &BuildingRecord) -> LoadResult {
    LoadModel::default().compute(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_record() -> BuildingRecord {
        BuildingRecord {
            area: Some(100.0.into()),
            wall_description: Some("газобетон 300".to_string()),
            city: Some("Москва".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn design_load_is_sum_of_components() {
        let result = compute_load(&simple_record());
        let sum: f64 = result.breakdown.components().iter().map(|(_, w)| w).sum();
        assert!((sum - result.q_design_w).abs() < 1e-6);
        assert_eq!(result.delta_t_k, 48.0);
    }

    #[test]
    fn no_band_means_flat_range() {
        let result = compute_load(&simple_record());
        assert_eq!(result.q_min_w, result.q_design_w);
        assert_eq!(result.q_max_w, result.q_design_w);
    }

    #[test]
    fn band_widens_range_and_lowers_design_temperature() {
        let record = BuildingRecord {
            uncertainty: Some(2.0.into()),
            ..simple_record()
        };
        let result = compute_load(&record);
        assert_eq!(result.t_design_c, -28.0);
        assert!(result.q_min_w < result.q_design_w);
        assert!(result.q_max_w > result.q_design_w);
        assert!((result.q_max_w - result.q_design_w - 2.0 * result.k_w_per_k).abs() < 1e-6);
    }

    #[test]
    fn symmetric_band_only() {
        let model = LoadModel::new(ModelConfig {
            band_shifts_design_temperature: false,
            ..ModelConfig::default()
        });
        let record = BuildingRecord {
            uncertainty: Some(2.0.into()),
            ..simple_record()
        };
        let result = model.compute(&record);
        assert_eq!(result.t_design_c, -26.0);
        assert!(result.q_min_w < result.q_design_w);
    }

    #[test]
    fn curve_spans_five_to_design_minus_five() {
        let result = compute_load(&simple_record());
        let first = result.curve.first().map(|p| p.t_out_c);
        let last = result.curve.last().map(|p| p.t_out_c);
        assert_eq!(first, Some(5.0));
        assert_eq!(last, Some(-31.0));
        assert_eq!(result.curve.len(), 37);
    }

    #[test]
    fn huge_band_is_clamped_and_curve_stays_bounded() {
        let record = BuildingRecord {
            uncertainty: Some(1e6.into()),
            ..simple_record()
        };
        let result = compute_load(&record);
        assert_eq!(result.inputs.band_k, 20.0);
        assert_eq!(result.t_design_c, -46.0);
        assert_eq!(result.curve.len(), 57);
        assert!(result.q_max_w.is_finite());

        let model = LoadModel::default();
        let curve = model.load_curve(22.0, -1e9, 10.0, 0.0);
        assert_eq!(curve.len(), MAX_CURVE_POINTS);
    }

    #[test]
    fn vanishing_dt_keeps_range_on_design_load() {
        let record = BuildingRecord {
            uncertainty: Some(2.0.into()),
            indoor_temp: Some((-28.0).into()),
            ..simple_record()
        };
        let result = compute_load(&record);
        assert_eq!(result.delta_t_k, 0.0);
        assert_eq!(result.k_w_per_k, 0.0);
        assert!(result.q_design_w < 0.0);
        assert_eq!(result.q_min_w, result.q_design_w);
        assert_eq!(result.q_max_w, result.q_design_w);
        assert_eq!(result.e_year_kwh, 0.0);
    }

    #[test]
    fn extra_insulation_adds_a_layer() {
        let base = compute_load(&simple_record());
        let record = BuildingRecord {
            extra_insulation_m: Some(100.0.into()),
            ..simple_record()
        };
        let insulated = compute_load(&record);
        assert_eq!(insulated.envelope.layers.len(), base.envelope.layers.len() + 1);
        assert!(insulated.q_design_w < base.q_design_w);
    }

    #[test]
    fn night_setback_only_touches_energy() {
        let base = compute_load(&simple_record());
        let record = BuildingRecord {
            night_setback: true,
            ..simple_record()
        };
        let setback = compute_load(&record);
        assert_eq!(setback.q_design_w, base.q_design_w);
        let ratio = setback.e_year_kwh / base.e_year_kwh;
        assert!((ratio - (1.0 - 2.0 * 8.0 / 24.0 / 20.0)).abs() < 1e-12);
    }

    #[test]
    fn degree_day_energy() {
        let model = LoadModel::default();
        let e = model.annual_energy_kwh(100.0, 5400.0, false);
        assert!((e - 100.0 * 5400.0 * 24.0 / 1000.0).abs() < 1e-6);
    }
}

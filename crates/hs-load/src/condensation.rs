//! Condensation risk on the inside wall surface.

use hs_envelope::RSI;
use serde::Serialize;

// Magnus coefficients, valid for roughly -45..60 °C.
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Dew point (°C) by the Magnus approximation; RH is clamped to 1..100 %.
pub fn dew_point(t_c: f64, rh_percent: f64) -> f64 {
    let rh = if rh_percent.is_finite() {
        rh_percent.clamp(1.0, 100.0)
    } else {
        1.0
    };
    let gamma = (rh / 100.0).ln() + MAGNUS_A * t_c / (MAGNUS_B + t_c);
    MAGNUS_B * gamma / (MAGNUS_A - gamma)
}

/// Saturation vapour pressure over water (Pa).
pub fn saturation_vapour_pressure(t_c: f64) -> f64 {
    6.112 * (17.62 * t_c / (t_c + 243.12)).exp() * 100.0
}

/// Inside surface temperature of a wall in steady state (°C).
pub fn inner_surface_temperature(t_in_c: f64, t_out_c: f64, u_value: f64) -> f64 {
    t_in_c - u_value * (t_in_c - t_out_c) * RSI
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_index(index: f64) -> Self {
        if index >= 0.7 {
            Self::High
        } else if index >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CondensationRisk {
    pub dew_point_c: f64,
    pub surface_temp_c: f64,
    /// Surface temperature above dew point (K).
    pub margin_k: f64,
    pub index: f64,
    pub level: RiskLevel,
}

pub fn risk_index(margin_k: f64) -> f64 {
    if margin_k <= 0.0 {
        1.0
    } else if margin_k < 3.0 {
        0.7
    } else if margin_k < 5.0 {
        0.4
    } else {
        0.1
    }
}

pub fn condensation_risk(t_in_c: f64, t_out_c: f64, rh_percent: f64, u_value: f64) -> CondensationRisk {
    let dew_point_c = dew_point(t_in_c, rh_percent);
    let surface_temp_c = inner_surface_temperature(t_in_c, t_out_c, u_value);
    let margin_k = surface_temp_c - dew_point_c;
    let index = risk_index(margin_k);
    CondensationRisk {
        dew_point_c,
        surface_temp_c,
        margin_k,
        index,
        level: RiskLevel::from_index(index),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tiers_follow_margin(
            t_in in 10.0f64..30.0,
            t_out in -45.0f64..10.0,
            rh in 1.0f64..100.0,
            u in 0.05f64..5.0,
        ) {
            let risk = condensation_risk(t_in, t_out, rh, u);
            prop_assert!([1.0, 0.7, 0.4, 0.1].contains(&risk.index));
            if risk.surface_temp_c <= risk.dew_point_c {
                prop_assert_eq!(risk.index, 1.0);
                prop_assert_eq!(risk.level, RiskLevel::High);
            }
            if risk.margin_k >= 5.0 {
                prop_assert_eq!(risk.index, 0.1);
                prop_assert_eq!(risk.level, RiskLevel::Low);
            }
        }

        #[test]
        fn dew_point_not_above_air_temperature(t in -40.0f64..50.0, rh in 1.0f64..100.0) {
            prop_assert!(dew_point(t, rh) <= t + 1e-9);
        }
    }
}

//! Solar and internal heat gains.

use hs_core::{RuleTable, TextRule};
use hs_envelope::WindowType;
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarSeason {
    #[default]
    Winter,
    MidSeason,
    Summer,
}

impl SolarSeason {
    pub fn irradiance_w_m2(self, config: &ModelConfig) -> f64 {
        match self {
            Self::Winter => config.irradiance.winter,
            Self::MidSeason => config.irradiance.mid_season,
            Self::Summer => config.irradiance.summer,
        }
    }
}

// Diagonal directions come before the plain ones they contain.
const ORIENTATION_FACTORS: RuleTable<f64> = RuleTable::new(
    &[
        TextRule {
            keywords: &[
                "юго-вост",
                "юго вост",
                "юго-зап",
                "юго зап",
                "south-east",
                "southeast",
                "south-west",
                "southwest",
            ],
            value: 0.9,
        },
        TextRule {
            keywords: &["юг", "south"],
            value: 1.0,
        },
        TextRule {
            keywords: &["вост", "запад", "east", "west"],
            value: 0.7,
        },
        TextRule {
            keywords: &["север", "north"],
            value: 0.3,
        },
    ],
    0.7,
);

const OCCUPANCY_GAINS: RuleTable<f64> = RuleTable::new(
    &[
        TextRule {
            keywords: &["выход", "всегда", "away", "always"],
            value: 2.0,
        },
        TextRule {
            keywords: &["вечер", "evening"],
            value: 1.0,
        },
    ],
    0.0,
);

const APPLIANCE_GAINS: RuleTable<f64> = RuleTable::new(
    &[
        TextRule {
            keywords: &["выс", "high"],
            value: 4.0,
        },
        TextRule {
            keywords: &["низ", "low"],
            value: -1.0,
        },
    ],
    0.0,
);

pub fn orientation_factor(orientation: Option<&str>) -> f64 {
    match orientation {
        Some(text) => ORIENTATION_FACTORS.first_match(text),
        None => ORIENTATION_FACTORS.default,
    }
}

/// Solar gain through glazing (W).
pub fn solar_gain(
    window_area_m2: f64,
    window: &WindowType,
    orientation: Option<&str>,
    shading: Option<f64>,
    season: SolarSeason,
    config: &ModelConfig,
) -> f64 {
    let shading = shading.unwrap_or(config.default_shading);
    let irradiance = season.irradiance_w_m2(config) * orientation_factor(orientation) * shading;
    window_area_m2 * window.g_value * irradiance
}

/// Specific internal gain from occupancy and appliance descriptors (W/m²),
/// never negative.
pub fn internal_gain_w_m2(occupancy: Option<&str>, appliances: Option<&str>, config: &ModelConfig) -> f64 {
    let occupancy = occupancy.map(|t| OCCUPANCY_GAINS.accumulate(t)).unwrap_or(0.0);
    let appliances = appliances.map(|t| APPLIANCE_GAINS.accumulate(t)).unwrap_or(0.0);
    (config.base_internal_gain_w_m2 + occupancy + appliances).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_envelope::resolve_window;

    #[test]
    fn orientation_table() {
        assert_eq!(orientation_factor(Some("Юг")), 1.0);
        assert_eq!(orientation_factor(Some("юго-восток")), 0.9);
        assert_eq!(orientation_factor(Some("South-West")), 0.9);
        assert_eq!(orientation_factor(Some("west")), 0.7);
        assert_eq!(orientation_factor(Some("север")), 0.3);
        assert_eq!(orientation_factor(Some("")), 0.7);
        assert_eq!(orientation_factor(None), 0.7);
    }

    #[test]
    fn winter_solar_gain() {
        let config = ModelConfig::default();
        let window = resolve_window(None);
        let q = solar_gain(10.0, window, Some("south"), None, SolarSeason::Winter, &config);
        assert!((q - 10.0 * 0.55 * 150.0 * 0.6).abs() < 1e-9);

        let summer = solar_gain(10.0, window, Some("south"), None, SolarSeason::Summer, &config);
        assert!(summer > q);
    }

    #[test]
    fn internal_gain_rules() {
        let config = ModelConfig::default();
        assert_eq!(internal_gain_w_m2(None, None, &config), 3.0);
        assert_eq!(internal_gain_w_m2(Some("всегда дома"), None, &config), 5.0);
        assert_eq!(internal_gain_w_m2(Some("вечером"), Some("высокая"), &config), 8.0);
        assert_eq!(internal_gain_w_m2(None, Some("low"), &config), 2.0);
    }

    #[test]
    fn internal_gain_never_negative() {
        let config = ModelConfig {
            base_internal_gain_w_m2: 0.5,
            ..ModelConfig::default()
        };
        assert_eq!(internal_gain_w_m2(None, Some("низкая"), &config), 0.0);
    }
}

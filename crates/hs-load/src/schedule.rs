//! Daily load profile archetypes.

use std::f64::consts::TAU;

use hs_core::constants::HOURS_PER_DAY;
use hs_core::{RuleTable, TextRule};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyArchetype {
    /// Peaks in the morning, dips in the afternoon.
    Daytime,
    Evening,
    NightShift,
    AlwaysHome,
}

const ARCHETYPES: RuleTable<DailyArchetype> = RuleTable::new(
    &[
        TextRule {
            keywords: &["ноч", "смен", "night", "shift"],
            value: DailyArchetype::NightShift,
        },
        TextRule {
            keywords: &["всегда", "always", "home all day"],
            value: DailyArchetype::AlwaysHome,
        },
        TextRule {
            keywords: &["вечер", "evening"],
            value: DailyArchetype::Evening,
        },
    ],
    DailyArchetype::Daytime,
);

impl DailyArchetype {
    pub fn from_occupancy(occupancy: Option<&str>) -> Self {
        match occupancy {
            Some(text) => ARCHETYPES.first_match(text),
            None => ARCHETYPES.default,
        }
    }

    /// Load multiplier for `hour` (0..24).
    pub fn multiplier(self, hour: usize) -> f64 {
        let h = hour as f64;
        let phase = |offset: f64| TAU * (h - offset) / HOURS_PER_DAY as f64;
        match self {
            Self::Daytime => 0.85 + 0.3 * phase(6.0).sin() - 0.2 * phase(14.0).sin(),
            Self::Evening => 0.85 + 0.3 * phase(20.0).cos(),
            Self::NightShift => 0.85 + 0.3 * phase(3.0).cos(),
            Self::AlwaysHome => 1.0 + 0.05 * phase(19.0).cos(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub hour: usize,
    pub multiplier: f64,
    /// Design load scaled by the multiplier, clamped at zero (W).
    pub load_w: f64,
}

pub fn daily_profile(archetype: DailyArchetype, q_design_w: f64) -> Vec<ProfilePoint> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let multiplier = archetype.multiplier(hour);
            ProfilePoint {
                hour,
                multiplier,
                load_w: (q_design_w * multiplier).max(0.0),
            }
        })
        .collect()
}

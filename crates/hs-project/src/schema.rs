//! Building record schema definitions.
//!
//! The record mirrors what a non-expert types into a questionnaire: every field
//! is optional, numbers may arrive as text, and descriptive fields are free text.
//! Defaults are applied later, when the load model resolves the record.

use hs_core::{RuleTable, TextRule, parse_number};
use serde::{Deserialize, Serialize};

/// A numeric field that may have been typed as text ("2,7", "450 m²").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Parsed value, `None` when the text holds no usable number.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            Self::Number(_) => None,
            Self::Text(text) => parse_number(text),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<u32> for NumericInput {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for NumericInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Heat generator serving the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum HeatingSystem {
    #[default]
    Electric,
    Gas,
    District,
    HeatPump,
}

const HEATING_SYSTEM_RULES: RuleTable<HeatingSystem> = RuleTable::new(
    &[
        TextRule {
            keywords: &["pump", "hpump", "насос"],
            value: HeatingSystem::HeatPump,
        },
        TextRule {
            keywords: &["district", "центр", "тэц", "цтп"],
            value: HeatingSystem::District,
        },
        TextRule {
            keywords: &["gas", "газ"],
            value: HeatingSystem::Gas,
        },
        TextRule {
            keywords: &["electric", "электр"],
            value: HeatingSystem::Electric,
        },
    ],
    HeatingSystem::Electric,
);

impl HeatingSystem {
    pub const ALL: [HeatingSystem; 4] = [
        HeatingSystem::Electric,
        HeatingSystem::Gas,
        HeatingSystem::District,
        HeatingSystem::HeatPump,
    ];

    /// Interpret free text; unknown text means electric heating.
    pub fn from_text(text: &str) -> Self {
        HEATING_SYSTEM_RULES.first_match(text)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Electric => "electric",
            Self::Gas => "gas",
            Self::District => "district",
            Self::HeatPump => "heat pump",
        }
    }
}

impl From<String> for HeatingSystem {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

/// User description of one building.
///
/// Field aliases accept the camel-case names used by web frontends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors: Option<NumericInput>,
    /// Floor area per storey (m²).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<NumericInput>,
    /// Storey height (m).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<NumericInput>,

    #[serde(
        alias = "wallDescription",
        alias = "wallMaterial",
        skip_serializing_if = "Option::is_none"
    )]
    pub wall_description: Option<String>,
    #[serde(alias = "constructionKey", skip_serializing_if = "Option::is_none")]
    pub construction_key: Option<String>,
    /// Extra mineral wool added on top of the described wall (m, or mm if ≥ 10).
    #[serde(alias = "additionalInsulation", skip_serializing_if = "Option::is_none")]
    pub extra_insulation_m: Option<NumericInput>,

    #[serde(alias = "windowArea", skip_serializing_if = "Option::is_none")]
    pub window_area: Option<NumericInput>,
    #[serde(
        alias = "windowTypeKey",
        alias = "windowType",
        skip_serializing_if = "Option::is_none"
    )]
    pub window_type: Option<String>,

    /// Explicit infiltration rate (ACH).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infiltration: Option<NumericInput>,
    /// Airtightness in words ("low", "высокая герметичность").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tightness: Option<String>,
    #[serde(alias = "windSpeed", skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    /// Fraction of unobstructed sun reaching the glazing.
    #[serde(alias = "shadingFactor", skip_serializing_if = "Option::is_none")]
    pub shading: Option<NumericInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(alias = "winterType", skip_serializing_if = "Option::is_none")]
    pub winter_severity: Option<String>,
    /// Design temperature uncertainty band (±°C).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<NumericInput>,

    #[serde(alias = "tempInside", skip_serializing_if = "Option::is_none")]
    pub indoor_temp: Option<NumericInput>,
    #[serde(alias = "humidity", alias = "rhInside", skip_serializing_if = "Option::is_none")]
    pub indoor_rh: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appliances: Option<String>,

    #[serde(alias = "heatingType", skip_serializing_if = "Option::is_none")]
    pub heating_system: Option<HeatingSystem>,
    /// Heat-recovery efficiency of mechanical ventilation (fraction).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recuperation: Option<NumericInput>,
    #[serde(alias = "nightSchedule", skip_serializing_if = "std::ops::Not::not")]
    pub night_setback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_text_is_lenient() {
        assert_eq!(NumericInput::from("2,7").value(), Some(2.7));
        assert_eq!(NumericInput::from("n/a").value(), None);
        assert_eq!(NumericInput::Number(f64::NAN).value(), None);
        assert_eq!(NumericInput::from(9_u32).value(), Some(9.0));
    }

    #[test]
    fn heating_system_from_text() {
        assert_eq!(HeatingSystem::from_text("Газовый котёл"), HeatingSystem::Gas);
        assert_eq!(HeatingSystem::from_text("heat_pump"), HeatingSystem::HeatPump);
        assert_eq!(HeatingSystem::from_text("hpump"), HeatingSystem::HeatPump);
        assert_eq!(HeatingSystem::from_text("district"), HeatingSystem::District);
        assert_eq!(HeatingSystem::from_text("???"), HeatingSystem::Electric);
    }

    #[test]
    fn record_defaults_are_empty() {
        let record = BuildingRecord::default();
        assert!(record.area.is_none());
        assert!(!record.night_setback);
    }
}

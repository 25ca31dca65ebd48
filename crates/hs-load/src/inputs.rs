//! Building record resolution: every optional field becomes a number.

use hs_envelope::normalize_thickness;
use hs_project::{BuildingRecord, HeatingSystem, NumericInput};
use serde::Serialize;

pub const DEFAULT_FLOORS: u32 = 1;
pub const DEFAULT_AREA_M2: f64 = 100.0;
pub const DEFAULT_HEIGHT_M: f64 = 2.7;
pub const DEFAULT_INDOOR_C: f64 = 22.0;
pub const DEFAULT_WIND_MPS: f64 = 3.0;
pub const DEFAULT_INDOOR_RH: f64 = 50.0;
/// Window area as a fraction of floor area when none is given.
pub const DEFAULT_WINDOW_RATIO: f64 = 0.2;

/// Numeric view of a [`BuildingRecord`] with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedInputs {
    pub floors: u32,
    pub area_m2: f64,
    pub height_m: f64,
    pub indoor_c: f64,
    pub band_k: f64,
    pub window_area_m2: f64,
    pub wind_mps: f64,
    /// Explicit infiltration rate, when the record states one (ACH).
    pub infiltration_ach: Option<f64>,
    pub shading: Option<f64>,
    pub indoor_rh: f64,
    pub recuperation: f64,
    pub extra_insulation_m: Option<f64>,
    pub heating_system: HeatingSystem,
    pub night_setback: bool,
}

fn number(input: &Option<NumericInput>, field: &'static str) -> Option<f64> {
    let input = input.as_ref()?;
    let value = input.value();
    if value.is_none() {
        tracing::debug!(field, ?input, "unparsable number, using default");
    }
    value
}

fn positive_or(input: &Option<NumericInput>, field: &'static str, default: f64) -> f64 {
    match number(input, field) {
        Some(v) if v > 0.0 => v,
        Some(v) => {
            tracing::debug!(field, value = v, "non-positive value, using default");
            default
        }
        None => default,
    }
}

fn non_negative(input: &Option<NumericInput>, field: &'static str) -> Option<f64> {
    number(input, field).filter(|v| *v >= 0.0)
}

impl ResolvedInputs {
    pub fn from_record(record: &BuildingRecord) -> Self {
        let floors = positive_or(&record.floors, "floors", f64::from(DEFAULT_FLOORS))
            .round()
            .max(1.0) as u32;
        let area_m2 = positive_or(&record.area, "area", DEFAULT_AREA_M2);

        Self {
            floors,
            area_m2,
            height_m: positive_or(&record.height, "height", DEFAULT_HEIGHT_M),
            indoor_c: number(&record.indoor_temp, "indoor_temp").unwrap_or(DEFAULT_INDOOR_C),
            band_k: non_negative(&record.uncertainty, "uncertainty").unwrap_or(0.0),
            window_area_m2: non_negative(&record.window_area, "window_area")
                .unwrap_or(DEFAULT_WINDOW_RATIO * area_m2),
            wind_mps: non_negative(&record.wind_speed, "wind_speed").unwrap_or(DEFAULT_WIND_MPS),
            infiltration_ach: number(&record.infiltration, "infiltration").filter(|v| *v > 0.0),
            shading: non_negative(&record.shading, "shading").map(|v| v.min(1.0)),
            indoor_rh: number(&record.indoor_rh, "indoor_rh").unwrap_or(DEFAULT_INDOOR_RH),
            recuperation: number(&record.recuperation, "recuperation").unwrap_or(0.0),
            extra_insulation_m: number(&record.extra_insulation_m, "extra_insulation_m")
                .filter(|v| *v > 0.0)
                .map(normalize_thickness),
            heating_system: record.heating_system.unwrap_or_default(),
            night_setback: record.night_setback,
        }
    }

    pub fn volume_m3(&self) -> f64 {
        self.area_m2 * f64::from(self.floors) * self.height_m
    }
}

//! Design climate data.

use hs_core::{RuleTable, TextRule};
use serde::Serialize;

use crate::catalog::{ClimateRecord, lookup_city};

/// Mean indoor-outdoor difference over the heating season (K).
pub const HEATING_SEASON_MEAN_DT_K: f64 = 20.0;

const SEVERITY_OFFSETS: RuleTable<f64> = RuleTable::new(
    &[
        TextRule {
            keywords: &["холод", "cold"],
            value: -3.0,
        },
        TextRule {
            keywords: &["аном", "anomal"],
            value: -5.0,
        },
    ],
    0.0,
);

/// Additive design temperature offset for a winter-severity descriptor.
pub fn severity_offset(text: Option<&str>) -> f64 {
    text.map(|t| SEVERITY_OFFSETS.accumulate(t)).unwrap_or(0.0)
}

/// Heating period length derived from degree-days.
pub fn heating_hours(hdd: f64) -> f64 {
    (hdd * 24.0 / HEATING_SEASON_MEAN_DT_K).round()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateDesignData {
    pub city: &'static ClimateRecord,
    /// Catalog design temperature plus severity offset (°C).
    pub t_design_unbanded_c: f64,
    /// [`Self::t_design_unbanded_c`] lowered by the uncertainty band (°C).
    pub t_design_c: f64,
    pub severity_offset_k: f64,
    pub band_k: f64,
    pub hdd: f64,
    pub heating_hours: f64,
}

impl ClimateDesignData {
    pub fn from_record(record: &'static ClimateRecord, severity: Option<&str>, band_k: f64) -> Self {
        let band_k = if band_k.is_finite() { band_k.max(0.0) } else { 0.0 };
        let severity_offset_k = severity_offset(severity);
        let t_design_unbanded_c = record.t_design_c + severity_offset_k;
        Self {
            city: record,
            t_design_unbanded_c,
            t_design_c: t_design_unbanded_c - band_k,
            severity_offset_k,
            band_k,
            hdd: record.hdd,
            heating_hours: heating_hours(record.hdd),
        }
    }
}

/// Design climate for a city descriptor; unmatched cities use the reference city.
pub fn design_climate(city: Option<&str>, severity: Option<&str>, band_k: f64) -> ClimateDesignData {
    ClimateDesignData::from_record(lookup_city(city), severity, band_k)
}

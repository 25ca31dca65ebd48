//! Retrofit measures.

use hs_load::{LoadModel, LoadResult};
use hs_project::BuildingRecord;
use serde::Serialize;

/// How the capital cost of a measure scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBasis {
    /// Per m² of wall area.
    PerWallArea(f64),
    /// Per m² of window area.
    PerWindowArea(f64),
    Fixed(f64),
}

impl CostBasis {
    pub fn cost(&self, base: &LoadResult) -> f64 {
        match *self {
            Self::PerWallArea(rate) => rate * base.geometry.wall_area_m2,
            Self::PerWindowArea(rate) => rate * base.geometry.window_area_m2,
            Self::Fixed(cost) => cost,
        }
    }
}

/// Change a measure makes to the building record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modification {
    /// Mineral wool added outside the existing wall (m).
    AddWallInsulation { thickness_m: f64 },
    UpgradeWindows { window_key: &'static str },
    /// Lower the base infiltration rate, not below `min_ach`.
    ReduceInfiltration { delta_ach: f64, min_ach: f64 },
    HeatRecovery { efficiency: f64 },
    NightSetback,
}

impl Modification {
    /// Modified copy of `record`; `base` is the unmodified result.
    pub fn apply(&self, model: &LoadModel, record: &BuildingRecord, base: &LoadResult) -> BuildingRecord {
        let mut modified = record.clone();
        match *self {
            Self::AddWallInsulation { thickness_m } => {
                let existing = base.inputs.extra_insulation_m.unwrap_or(0.0);
                modified.extra_insulation_m = Some((existing + thickness_m).into());
            }
            Self::UpgradeWindows { window_key } => {
                modified.window_type = Some(window_key.to_string());
            }
            Self::ReduceInfiltration { delta_ach, min_ach } => {
                let ach = (model.base_infiltration_ach(record) - delta_ach).max(min_ach);
                modified.infiltration = Some(ach.into());
            }
            Self::HeatRecovery { efficiency } => {
                let current = base.airflow.recuperation;
                modified.recuperation = Some(current.max(efficiency).into());
            }
            Self::NightSetback => {
                modified.night_setback = true;
            }
        }
        modified
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImprovementAction {
    pub key: &'static str,
    pub name: &'static str,
    pub cost: CostBasis,
    pub modification: Modification,
}

// Declaration order breaks payback ties.
static IMPROVEMENTS: [ImprovementAction; 6] = [
    ImprovementAction {
        key: "wall_mw_50",
        name: "Wall insulation +50 mm mineral wool",
        cost: CostBasis::PerWallArea(950.0),
        modification: Modification::AddWallInsulation { thickness_m: 0.05 },
    },
    ImprovementAction {
        key: "wall_mw_100",
        name: "Wall insulation +100 mm mineral wool",
        cost: CostBasis::PerWallArea(1400.0),
        modification: Modification::AddWallInsulation { thickness_m: 0.10 },
    },
    ImprovementAction {
        key: "windows_triple",
        name: "Triple-glazed energy-saving windows",
        cost: CostBasis::PerWindowArea(6000.0),
        modification: Modification::UpgradeWindows {
            window_key: "std_3ch",
        },
    },
    ImprovementAction {
        key: "airtightness",
        name: "Air sealing (-0.2 ACH)",
        cost: CostBasis::Fixed(20_000.0),
        modification: Modification::ReduceInfiltration {
            delta_ach: 0.2,
            min_ach: 0.1,
        },
    },
    ImprovementAction {
        key: "heat_recovery",
        name: "Ventilation heat recovery 80 %",
        cost: CostBasis::Fixed(120_000.0),
        modification: Modification::HeatRecovery { efficiency: 0.8 },
    },
    ImprovementAction {
        key: "night_setback",
        name: "Night temperature setback",
        cost: CostBasis::Fixed(0.0),
        modification: Modification::NightSetback,
    },
];

pub fn improvement_catalog() -> &'static [ImprovementAction] {
    &IMPROVEMENTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_load::compute_load;

    #[test]
    fn insulation_stacks_on_existing_extra_layer() {
        let model = LoadModel::default();
        let record = BuildingRecord {
            extra_insulation_m: Some(0.05.into()),
            ..Default::default()
        };
        let base = model.compute(&record);
        let modified = Modification::AddWallInsulation { thickness_m: 0.1 }.apply(&model, &record, &base);
        let thickness = modified.extra_insulation_m.and_then(|v| v.value()).unwrap();
        assert!((thickness - 0.15).abs() < 1e-12);
    }

    #[test]
    fn infiltration_reduction_has_a_floor() {
        let model = LoadModel::default();
        let record = BuildingRecord {
            tightness: Some("airtight".to_string()),
            ..Default::default()
        };
        let base = model.compute(&record);
        let action = Modification::ReduceInfiltration {
            delta_ach: 0.2,
            min_ach: 0.1,
        };
        let modified = action.apply(&model, &record, &base);
        assert_eq!(modified.infiltration.and_then(|v| v.value()), Some(0.1));
    }

    #[test]
    fn heat_recovery_never_worsens() {
        let model = LoadModel::default();
        let record = BuildingRecord {
            recuperation: Some(0.85.into()),
            ..Default::default()
        };
        let base = model.compute(&record);
        let modified = Modification::HeatRecovery { efficiency: 0.8 }.apply(&model, &record, &base);
        assert_eq!(modified.recuperation.and_then(|v| v.value()), Some(0.85));
    }

    #[test]
    fn costs_scale_with_geometry() {
        let base = compute_load(&BuildingRecord {
            area: Some(100.0.into()),
            window_area: Some(10.0.into()),
            ..Default::default()
        });
        assert!((CostBasis::PerWallArea(950.0).cost(&base) - 950.0 * 260.0).abs() < 1e-6);
        assert_eq!(CostBasis::PerWindowArea(6000.0).cost(&base), 60_000.0);
        assert_eq!(CostBasis::Fixed(20_000.0).cost(&base), 20_000.0);
    }
}

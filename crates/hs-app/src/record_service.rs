//! Building record loading, saving and input checks.

use std::path::Path;

use hs_core::{HsError, HsResult, Real, ensure_finite, parse_number_strict};
use hs_load::LoadModel;
use hs_project::{BuildingRecord, NumericInput};

use crate::error::AppResult;

/// Load a building record from a YAML or JSON file.
pub fn load_building(path: &Path) -> AppResult<BuildingRecord> {
    Ok(hs_project::load_record(path)?)
}

/// Save a building record; the extension picks the format (YAML unless `.json`).
pub fn save_building(path: &Path, record: &BuildingRecord) -> AppResult<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        hs_project::save_json(path, record)?;
    } else {
        hs_project::save_yaml(path, record)?;
    }
    Ok(())
}

/// Numeric fields that were given but could not be read.
///
/// The model substitutes defaults for these; frontends may want to tell
/// the user.
pub fn unparsed_fields(record: &BuildingRecord) -> Vec<&'static str> {
    numeric_fields(record)
        .into_iter()
        .filter(|(_, input)| input.as_ref().is_some_and(|i| i.value().is_none()))
        .map(|(name, _)| name)
        .collect()
}

/// Geometry fields that must be strictly positive.
const POSITIVE_FIELDS: [&str; 3] = ["floors", "area", "height"];

/// Strict check of a record: every given number must parse, geometry must
/// be positive and the resulting design load must be finite.
///
/// The load model itself never fails; this is for frontends that want to
/// reject bad input instead of silently using defaults.
pub fn validate_record(model: &LoadModel, record: &BuildingRecord) -> AppResult<()> {
    for (name, input) in numeric_fields(record) {
        let Some(input) = input else { continue };
        let value = strict_value(input, name)?;
        if POSITIVE_FIELDS.contains(&name) && value <= 0.0 {
            return Err(HsError::InvalidArg { what: name }.into());
        }
    }
    let result = model.compute(record);
    ensure_finite(result.q_design_w, "design load")?;
    ensure_finite(result.e_year_kwh, "annual energy")?;
    Ok(())
}

fn strict_value(input: &NumericInput, name: &'static str) -> HsResult<Real> {
    match input {
        NumericInput::Number(v) => ensure_finite(*v, name),
        NumericInput::Text(text) => parse_number_strict(text, name),
    }
}

fn numeric_fields(record: &BuildingRecord) -> [(&'static str, &Option<NumericInput>); 12] {
    [
        ("floors", &record.floors),
        ("area", &record.area),
        ("height", &record.height),
        ("extra_insulation_m", &record.extra_insulation_m),
        ("window_area", &record.window_area),
        ("infiltration", &record.infiltration),
        ("wind_speed", &record.wind_speed),
        ("shading", &record.shading),
        ("uncertainty", &record.uncertainty),
        ("indoor_temp", &record.indoor_temp),
        ("indoor_rh", &record.indoor_rh),
        ("recuperation", &record.recuperation),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn reports_unreadable_numbers() {
        let record = BuildingRecord {
            area: Some("много".into()),
            height: Some("2,7".into()),
            indoor_temp: Some("тепло".into()),
            ..Default::default()
        };
        assert_eq!(unparsed_fields(&record), vec!["area", "indoor_temp"]);
        assert!(unparsed_fields(&BuildingRecord::default()).is_empty());
    }

    #[test]
    fn validation_rejects_unreadable_text() {
        let model = LoadModel::default();
        assert!(validate_record(&model, &BuildingRecord::default()).is_ok());

        let record = BuildingRecord {
            window_area: Some("около 20".into()),
            ..Default::default()
        };
        let err = validate_record(&model, &record).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("window_area"));
    }

    #[test]
    fn validation_rejects_non_positive_geometry() {
        let model = LoadModel::default();
        let record = BuildingRecord {
            area: Some("-5".into()),
            ..Default::default()
        };
        let err = validate_record(&model, &record).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("area"));

        let record = BuildingRecord {
            floors: Some(0_u32.into()),
            ..Default::default()
        };
        assert!(validate_record(&model, &record).is_err());
    }
}

//! Perturbed building records.

use hs_load::{LoadModel, ResolvedInputs};
use hs_project::BuildingRecord;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::noise::{multiplicative_factor, standard_normal};

/// Relative standard deviations per input (fractions of the base value),
/// except `band_k` and `indoor_temp_k` which are absolute (K).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbationProfile {
    pub area: f64,
    pub height: f64,
    pub floors: f64,
    pub window_area: f64,
    /// Airflow is the least certain input.
    pub infiltration: f64,
    pub wind: f64,
    /// Additive noise on the uncertainty band, so a zero band still spreads.
    pub band_k: f64,
    pub indoor_temp_k: f64,
    /// Lower bound on any multiplicative factor.
    pub min_factor: f64,
}

impl Default for PerturbationProfile {
    fn default() -> Self {
        Self {
            area: 0.03,
            height: 0.05,
            floors: 0.03,
            window_area: 0.05,
            infiltration: 0.3,
            wind: 0.2,
            band_k: 1.0,
            indoor_temp_k: 0.5,
            min_factor: 0.1,
        }
    }
}

/// Resolved values the perturbations are applied to.
#[derive(Debug, Clone, PartialEq)]
struct BaseValues {
    inputs: ResolvedInputs,
    infiltration_ach: f64,
}

/// Endless stream of perturbed copies of one record.
pub struct PerturbedRecords<'a, R: Rng + ?Sized> {
    record: &'a BuildingRecord,
    base: BaseValues,
    profile: &'a PerturbationProfile,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> PerturbedRecords<'a, R> {
    pub fn new(
        model: &LoadModel,
        record: &'a BuildingRecord,
        profile: &'a PerturbationProfile,
        rng: &'a mut R,
    ) -> Self {
        let base = BaseValues {
            inputs: ResolvedInputs::from_record(record),
            infiltration_ach: model.base_infiltration_ach(record),
        };
        Self {
            record,
            base,
            profile,
            rng,
        }
    }

    fn factor(&mut self, sigma: f64) -> f64 {
        multiplicative_factor(&mut *self.rng, sigma, self.profile.min_factor)
    }
}

impl<R: Rng + ?Sized> Iterator for PerturbedRecords<'_, R> {
    type Item = BuildingRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let p = self.profile;
        let base = self.base.inputs.clone();

        let area = base.area_m2 * self.factor(p.area);
        let height = base.height_m * self.factor(p.height);
        let floors = f64::from(base.floors) * self.factor(p.floors);
        let window_area = base.window_area_m2 * self.factor(p.window_area);
        let infiltration = self.base.infiltration_ach * self.factor(p.infiltration);
        let wind = base.wind_mps * self.factor(p.wind);
        let band = (base.band_k + p.band_k * standard_normal(&mut *self.rng)).max(0.0);
        let indoor = base.indoor_c + p.indoor_temp_k * standard_normal(&mut *self.rng);

        Some(BuildingRecord {
            area: Some(area.into()),
            height: Some(height.into()),
            floors: Some(floors.into()),
            window_area: Some(window_area.into()),
            infiltration: Some(infiltration.into()),
            wind_speed: Some(wind.into()),
            uncertainty: Some(band.into()),
            indoor_temp: Some(indoor.into()),
            ..self.record.clone()
        })
    }
}

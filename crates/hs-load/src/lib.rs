//! hs-load: steady-state heat balance of a building.
//!
//! [`LoadModel::compute`] turns a free-form [`hs_project::BuildingRecord`] into a
//! [`LoadResult`]: design load with its uncertainty range, degree-day annual
//! energy, load-vs-temperature curve, daily profile and condensation risk.
//! Every input has a default and every denominator is guarded, so the
//! computation itself cannot fail.

pub mod airflow;
pub mod condensation;
pub mod config;
pub mod economy;
pub mod gains;
pub mod inputs;
pub mod model;
pub mod schedule;
pub mod series;

pub use airflow::Airflow;
pub use condensation::{
    CondensationRisk, RiskLevel, condensation_risk, dew_point, inner_surface_temperature,
    saturation_vapour_pressure,
};
pub use config::{ModelConfig, SolarIrradiance, SystemTariff, Tariffs};
pub use economy::{CostEstimate, Payback, annual_cost, compare_tariffs, payback_from_power};
pub use gains::SolarSeason;
pub use inputs::ResolvedInputs;
pub use model::{
    CurvePoint, Geometry, LoadBreakdown, LoadModel, LoadResult, MAX_CURVE_POINTS, compute_load,
};
pub use schedule::{DailyArchetype, ProfilePoint};
pub use series::{HourlyLoad, MONTHS, hourly_load, monthly_energy};

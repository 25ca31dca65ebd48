//! hs-climate: climate catalog, design conditions and synthetic hourly data.

pub mod catalog;
pub mod design;
pub mod hourly;

pub use catalog::{
    ClimateRecord, DEFAULT_CITY_KEY, climate_by_key, climate_catalog, default_climate,
    lookup_city, match_city,
};
pub use design::{
    ClimateDesignData, HEATING_SEASON_MEAN_DT_K, design_climate, heating_hours, severity_offset,
};
pub use hourly::{HourlyPoint, HourlySeries, hourly_series, hourly_temperature};

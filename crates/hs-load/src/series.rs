//! Hourly load over the synthetic year and monthly totals.

use hs_climate::{HourlyPoint, HourlySeries};
use hs_core::constants::HOURS_PER_YEAR;
use serde::Serialize;

use crate::model::LoadResult;

pub const MONTHS: usize = 12;
const HOURS_PER_MONTH_BLOCK: usize = HOURS_PER_YEAR / MONTHS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyLoad {
    pub index: usize,
    pub day: usize,
    pub hour: usize,
    pub t_out_c: f64,
    /// Heating load, zero when no heating is needed (W).
    pub load_w: f64,
}

/// Hourly heating load `max(0, k·(Tin − T))` for the result's city.
pub fn hourly_load(result: &LoadResult) -> impl ExactSizeIterator<Item = HourlyLoad> + use<> {
    let k = result.k_w_per_k;
    let t_in = result.inputs.indoor_c;
    HourlySeries::new(result.climate.city).map(move |point: HourlyPoint| HourlyLoad {
        index: point.index,
        day: point.day,
        hour: point.hour,
        t_out_c: point.t_out_c,
        load_w: (k * (t_in - point.t_out_c)).max(0.0),
    })
}

/// Heating energy per 730-hour block of the year (kWh).
pub fn monthly_energy(result: &LoadResult) -> [f64; MONTHS] {
    let mut months = [0.0; MONTHS];
    for load in hourly_load(result) {
        let month = (load.index / HOURS_PER_MONTH_BLOCK).min(MONTHS - 1);
        months[month] += load.load_w / 1000.0;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::compute_load;
    use hs_project::BuildingRecord;

    #[test]
    fn one_value_per_hour() {
        let result = compute_load(&BuildingRecord::default());
        let series = hourly_load(&result);
        assert_eq!(series.len(), HOURS_PER_YEAR);
        assert!(series.into_iter().all(|h| h.load_w >= 0.0));
    }

    #[test]
    fn monthly_blocks_sum_to_hourly_total() {
        let result = compute_load(&BuildingRecord::default());
        let hourly_kwh: f64 = hourly_load(&result).map(|h| h.load_w / 1000.0).sum();
        let monthly = monthly_energy(&result);
        assert!((monthly.iter().sum::<f64>() - hourly_kwh).abs() < 1e-6 * hourly_kwh.max(1.0));
    }

    #[test]
    fn warm_indoor_equal_to_climate_gives_zero_load() {
        let record = BuildingRecord {
            indoor_temp: Some((-26.0).into()),
            ..Default::default()
        };
        let result = compute_load(&record);
        assert!(monthly_energy(&result).iter().all(|e| *e == 0.0));
    }
}

//! Synthetic hourly outdoor temperature series.
//!
//! A stand-in for a weather file: an annual sinusoid around the mean
//! temperature plus a fixed 3 K diurnal swing.

use std::f64::consts::TAU;

use hs_core::constants::{DAYS_PER_YEAR, HOURS_PER_DAY, HOURS_PER_YEAR};
use serde::Serialize;

use crate::catalog::{ClimateRecord, lookup_city};

const DIURNAL_AMPLITUDE_K: f64 = 3.0;
const SEASONAL_PHASE_DAYS: f64 = 20.0;
const DIURNAL_PHASE_HOURS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPoint {
    /// Hour of the year, from 0.
    pub index: usize,
    /// Day of the year, from 1.
    pub day: usize,
    pub hour: usize,
    pub t_out_c: f64,
}

/// Outdoor temperature at hour `index` of the year.
pub fn hourly_temperature(climate: &ClimateRecord, index: usize) -> f64 {
    let day_fraction = index as f64 / HOURS_PER_DAY as f64;
    let hour = (index % HOURS_PER_DAY) as f64;
    climate.mean_annual_c
        + climate.seasonal_amplitude_k
            * (TAU * (day_fraction - SEASONAL_PHASE_DAYS) / DAYS_PER_YEAR).sin()
        + DIURNAL_AMPLITUDE_K * (TAU * (hour - DIURNAL_PHASE_HOURS) / HOURS_PER_DAY as f64).sin()
}

/// Iterator over the 8 760 hours of a synthetic year.
#[derive(Debug, Clone)]
pub struct HourlySeries {
    climate: &'static ClimateRecord,
    next: usize,
}

impl HourlySeries {
    pub fn new(climate: &'static ClimateRecord) -> Self {
        Self { climate, next: 0 }
    }

    pub fn climate(&self) -> &'static ClimateRecord {
        self.climate
    }
}

impl Iterator for HourlySeries {
    type Item = HourlyPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= HOURS_PER_YEAR {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(HourlyPoint {
            index,
            day: index / HOURS_PER_DAY + 1,
            hour: index % HOURS_PER_DAY,
            t_out_c: hourly_temperature(self.climate, index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = HOURS_PER_YEAR.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HourlySeries {}

/// Hourly series for a city descriptor (reference city when unmatched).
pub fn hourly_series(city: Option<&str>) -> HourlySeries {
    HourlySeries::new(lookup_city(city))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_year_of_hours() {
        let series = hourly_series(Some("Москва"));
        assert_eq!(series.len(), HOURS_PER_YEAR);

        let points: Vec<_> = series.collect();
        assert_eq!(points.len(), 8760);
        assert_eq!(points[0].day, 1);
        assert_eq!(points[0].hour, 0);
        assert_eq!(points[8759].day, 365);
        assert_eq!(points[8759].hour, 23);
    }

    #[test]
    fn deterministic() {
        let a: Vec<_> = hourly_series(Some("spb")).collect();
        let b: Vec<_> = hourly_series(Some("spb")).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_by_amplitudes() {
        let climate = lookup_city(Some("novosibirsk"));
        let limit = climate.seasonal_amplitude_k + DIURNAL_AMPLITUDE_K + 1e-9;
        for p in HourlySeries::new(climate) {
            assert!((p.t_out_c - climate.mean_annual_c).abs() <= limit);
        }
    }

    #[test]
    fn restartable_midway() {
        let mut series = hourly_series(None);
        series.nth(99);
        assert_eq!(series.len(), HOURS_PER_YEAR - 100);
        assert_eq!(series.next().map(|p| p.index), Some(100));
    }
}

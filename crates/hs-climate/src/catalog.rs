//! Climate catalog.

use hs_core::normalize_text;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimateRecord {
    pub key: &'static str,
    pub name: &'static str,
    #[serde(skip)]
    pub names: &'static [&'static str],
    /// Design outdoor temperature (°C).
    pub t_design_c: f64,
    /// Heating degree-days (K·day).
    pub hdd: f64,
    /// Mean annual outdoor temperature (°C).
    pub mean_annual_c: f64,
    /// Half the peak-to-peak seasonal swing (K).
    pub seasonal_amplitude_k: f64,
}

impl ClimateRecord {
    pub fn matches_text(&self, normalized: &str) -> bool {
        self.names.iter().any(|name| normalized.contains(name))
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = normalize_text(query);
        query.is_empty()
            || self.key.contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self.matches_text(&query)
    }
}

pub const DEFAULT_CITY_KEY: &str = "moscow";

static CLIMATES: [ClimateRecord; 5] = [
    ClimateRecord {
        key: "moscow",
        name: "Moscow",
        names: &["москва", "moscow", "moskva"],
        t_design_c: -26.0,
        hdd: 5400.0,
        mean_annual_c: 5.0,
        seasonal_amplitude_k: 18.0,
    },
    ClimateRecord {
        key: "spb",
        name: "Saint Petersburg",
        names: &[
            "санкт-петербург",
            "петербург",
            "питер",
            "спб",
            "spb",
            "petersburg",
        ],
        t_design_c: -24.0,
        hdd: 5000.0,
        mean_annual_c: 4.0,
        seasonal_amplitude_k: 17.0,
    },
    ClimateRecord {
        key: "kazan",
        name: "Kazan",
        names: &["казань", "kazan"],
        t_design_c: -29.0,
        hdd: 5600.0,
        mean_annual_c: 3.0,
        seasonal_amplitude_k: 19.0,
    },
    ClimateRecord {
        key: "ekb",
        name: "Yekaterinburg",
        names: &["екатеринбург", "екб", "yekaterinburg", "ekaterinburg"],
        t_design_c: -31.0,
        hdd: 5800.0,
        mean_annual_c: 2.0,
        seasonal_amplitude_k: 20.0,
    },
    ClimateRecord {
        key: "novosibirsk",
        name: "Novosibirsk",
        names: &["новосибирск", "novosibirsk"],
        t_design_c: -32.0,
        hdd: 6200.0,
        mean_annual_c: 1.0,
        seasonal_amplitude_k: 21.0,
    },
];

pub fn climate_catalog() -> &'static [ClimateRecord] {
    &CLIMATES
}

pub fn climate_by_key(key: &str) -> Option<&'static ClimateRecord> {
    CLIMATES.iter().find(|c| c.key == key)
}

pub fn default_climate() -> &'static ClimateRecord {
    &CLIMATES[0]
}

/// First catalog city named in `text`, if any.
pub fn match_city(text: &str) -> Option<&'static ClimateRecord> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return None;
    }
    CLIMATES.iter().find(|c| c.matches_text(&normalized))
}

/// Like [`match_city`] but falls back to the reference city.
pub fn lookup_city(text: Option<&str>) -> &'static ClimateRecord {
    match text.and_then(match_city) {
        Some(record) => record,
        None => {
            tracing::debug!(city = ?text, "unmatched city, using {DEFAULT_CITY_KEY}");
            default_climate()
        }
    }
}

//! Settings file: model constants, tariffs and Monte Carlo options.

use std::path::Path;

use hs_load::ModelConfig;
use hs_uncertainty::PerturbationProfile;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    pub samples: usize,
    /// Fixed seed for repeatable runs; fresh entropy when absent.
    pub seed: Option<u64>,
    pub profile: PerturbationProfile,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            samples: 500,
            seed: None,
            profile: PerturbationProfile::default(),
        }
    }
}

impl MonteCarloSettings {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelConfig,
    pub monte_carlo: MonteCarloSettings,
}

pub fn load_settings(path: &Path) -> AppResult<Settings> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::SettingsRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let settings: Settings = serde_yaml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Settings from `path`, or the defaults when no path is given.
pub fn load_settings_or_default(path: Option<&Path>) -> AppResult<Settings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}

//! Shared application service layer for heatscope.
//!
//! Frontends load building records and settings through this crate and get
//! back one [`Report`] combining the load model, running costs, Monte Carlo
//! spread and retrofit ranking.

pub mod error;
pub mod export;
pub mod record_service;
pub mod report;
pub mod settings;

pub use error::{AppError, AppResult};
pub use export::{write_hourly_csv, write_json};
pub use record_service::{load_building, save_building, unparsed_fields, validate_record};
pub use report::{Report, ReportOptions, build_report};
pub use settings::{MonteCarloSettings, Settings, load_settings, load_settings_or_default};

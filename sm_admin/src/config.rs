//! Admin configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use sports_meet::roster::{Category, parse_grade_range};
use sports_meet::{CategoryBands, MeetSettings, StoreConfig};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Complete admin configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Snapshot store location and format
    pub store: StoreConfig,
    /// Grade bands and winner policy
    pub settings: MeetSettings,
    /// Fixed seed for automatic pairing, random when unset
    pub shuffle_seed: Option<u64>,
}

impl AdminConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `data_dir_override` - Optional snapshot directory (from CLI args)
    /// * `seed_override` - Optional shuffle seed (from CLI args)
    /// * `strict_override` - Force strict winner declaration (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed, or the grade
    /// bands do not line up
    pub fn from_env(
        data_dir_override: Option<PathBuf>,
        seed_override: Option<u64>,
        strict_override: bool,
    ) -> Result<Self, ConfigError> {
        let mut store = StoreConfig::from_env();
        if let Some(data_dir) = data_dir_override {
            store.data_dir = data_dir;
        }

        let shuffle_seed = match seed_override {
            Some(seed) => Some(seed),
            None => parse_env_opt("MEET_SHUFFLE_SEED")?,
        };

        let settings = MeetSettings {
            bands: bands_from_env()?,
            strict_winner_declaration: strict_override
                || parse_env_or("MEET_STRICT_WINNERS", false),
        };

        Ok(AdminConfig {
            store,
            settings,
            shuffle_seed,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

const BAND_VARS: [(&str, Category); 3] = [
    ("MEET_JUNIOR_GRADES", Category::Junior),
    ("MEET_MIDDLE_GRADES", Category::Middle),
    ("MEET_SENIOR_GRADES", Category::Senior),
];

// Unset band variables keep the default range for that category
fn bands_from_env() -> Result<CategoryBands, ConfigError> {
    let defaults = CategoryBands::default();
    let mut ranges: Vec<RangeInclusive<i32>> = Vec::with_capacity(BAND_VARS.len());

    for (var, category) in BAND_VARS {
        let range = match std::env::var(var) {
            Ok(value) => parse_grade_range(&value).map_err(|e| ConfigError::Invalid {
                var: var.to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => defaults
                .range_for(category)
                .cloned()
                .ok_or_else(|| ConfigError::Invalid {
                    var: var.to_string(),
                    reason: format!("no default range for {category}"),
                })?,
        };
        ranges.push(range);
    }

    bands_from_ranges(ranges)
}

fn bands_from_ranges(ranges: Vec<RangeInclusive<i32>>) -> Result<CategoryBands, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "MEET_*_GRADES".to_string(),
        reason,
    };

    let [junior, middle, senior]: [RangeInclusive<i32>; 3] = ranges
        .try_into()
        .map_err(|_| invalid("expected three grade ranges".to_string()))?;

    CategoryBands::new(junior, middle, senior).map_err(|e| invalid(e.to_string()))
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Helper to parse an optional environment variable, rejecting bad values
fn parse_env_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

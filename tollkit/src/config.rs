//! Settings for the transformations.
//!
//! Sources, later overriding earlier:
//!
//! 1. built-in defaults (the fixed constants of each transformation)
//! 2. a JSON settings file (`--config settings.json`), any subset of fields
//! 3. `TOLLKIT_*` environment variables, with `.env` loaded by `dotenvy`
//!
//! ```json
//! { "percentage": 0.05, "toll_rates": { "truck": 4.0 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::transform::category::BucketBounds;
use crate::transform::scale::ScalingRule;
use crate::transform::toll::TollRates;

/// All tunable constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bucket boundaries of the category counter
    pub buckets: BucketBounds,
    /// Multiple of the mean a value must exceed in the index filter
    pub index_factor: f64,
    /// Group mean a route must exceed in the group filter
    pub route_threshold: f64,
    /// Conditional scaling of matrix cells
    pub scaling: ScalingRule,
    /// Half-width of the band around the reference mean (0.10 = ±10%)
    pub percentage: f64,
    /// Per-vehicle toll multipliers
    pub toll_rates: TollRates,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            buckets: BucketBounds::default(),
            index_factor: 2.0,
            route_threshold: 7.0,
            scaling: ScalingRule::default(),
            percentage: 0.10,
            toll_rates: TollRates::default(),
        }
    }
}

impl Settings {
    /// Load defaults, then the optional JSON file, then the environment.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        // Load .env file (if present)
        dotenvy::dotenv().ok();

        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Parse a JSON settings file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `TOLLKIT_*` overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        let fields: [(&str, &mut f64); 13] = [
            ("TOLLKIT_MEDIUM_FROM", &mut self.buckets.medium_from),
            ("TOLLKIT_HIGH_FROM", &mut self.buckets.high_from),
            ("TOLLKIT_INDEX_FACTOR", &mut self.index_factor),
            ("TOLLKIT_ROUTE_THRESHOLD", &mut self.route_threshold),
            ("TOLLKIT_SCALE_PIVOT", &mut self.scaling.pivot),
            ("TOLLKIT_SCALE_ABOVE", &mut self.scaling.above_factor),
            ("TOLLKIT_SCALE_BELOW", &mut self.scaling.below_factor),
            ("TOLLKIT_PERCENTAGE", &mut self.percentage),
            ("TOLLKIT_RATE_MOTO", &mut self.toll_rates.moto),
            ("TOLLKIT_RATE_CAR", &mut self.toll_rates.car),
            ("TOLLKIT_RATE_RV", &mut self.toll_rates.rv),
            ("TOLLKIT_RATE_BUS", &mut self.toll_rates.bus),
            ("TOLLKIT_RATE_TRUCK", &mut self.toll_rates.truck),
        ];

        for (key, slot) in fields {
            if let Some(raw) = lookup(key) {
                *slot = parse_f64(key, &raw)?;
            }
        }

        Ok(())
    }
}

fn parse_f64(key: &str, raw: &str) -> ConfigResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

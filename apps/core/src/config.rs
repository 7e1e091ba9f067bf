//! Engine configuration.
//!
//! Every knob has a default; `COACH_*` environment variables (optionally from a `.env`
//! file) override them. The result is validated before any component sees it.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::CoachError;
use crate::memory::MemoryLimits;
use crate::respond::Tone;
use crate::risk::RiskWeights;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CoachConfig {
    /// Turns retained per user
    #[validate(range(min = 1, max = 10_000))]
    pub history_cap: usize,
    /// Analyzed person turns considered for the emotional pattern
    #[validate(range(min = 2, max = 100))]
    pub trend_window: usize,
    #[validate(range(min = 1, max = 3))]
    pub suggestion_limit: usize,
    #[validate(range(min = 1, max = 20))]
    pub recommendation_limit: usize,
    /// Users kept in memory before the least recently used one is dropped
    #[validate(range(min = 1))]
    pub max_resident_users: usize,
    pub default_tone: Tone,
    /// Fixed seed for template selection; random when absent
    pub rng_seed: Option<u64>,
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
    /// Directory for JSON memory snapshots; persistence is off when absent
    pub storage_dir: Option<PathBuf>,
    #[validate(nested)]
    pub risk: RiskWeights,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            history_cap: 100,
            trend_window: 10,
            suggestion_limit: 3,
            recommendation_limit: 5,
            max_resident_users: 10_000,
            default_tone: Tone::Gentle,
            rng_seed: None,
            request_timeout_secs: 5,
            storage_dir: None,
            risk: RiskWeights::default(),
        }
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, CoachError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| CoachError::Config(format!("{}={:?}: {}", key, value, e)))
}

impl CoachConfig {
    /// Load from the process environment after reading `.env` if present.
    pub fn from_env() -> Result<Self, CoachError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source, then validate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoachError> {
        let mut config = Self::default();

        if let Some(v) = lookup("COACH_HISTORY_CAP") {
            config.history_cap = parse("COACH_HISTORY_CAP", &v)?;
        }
        if let Some(v) = lookup("COACH_TREND_WINDOW") {
            config.trend_window = parse("COACH_TREND_WINDOW", &v)?;
        }
        if let Some(v) = lookup("COACH_SUGGESTION_LIMIT") {
            config.suggestion_limit = parse("COACH_SUGGESTION_LIMIT", &v)?;
        }
        if let Some(v) = lookup("COACH_RECOMMENDATION_LIMIT") {
            config.recommendation_limit = parse("COACH_RECOMMENDATION_LIMIT", &v)?;
        }
        if let Some(v) = lookup("COACH_MAX_RESIDENT_USERS") {
            config.max_resident_users = parse("COACH_MAX_RESIDENT_USERS", &v)?;
        }
        if let Some(v) = lookup("COACH_DEFAULT_TONE") {
            config.default_tone = v.parse()?;
        }
        if let Some(v) = lookup("COACH_RNG_SEED") {
            config.rng_seed = Some(parse("COACH_RNG_SEED", &v)?);
        }
        if let Some(v) = lookup("COACH_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse("COACH_REQUEST_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("COACH_STORAGE_DIR").filter(|v| !v.trim().is_empty()) {
            config.storage_dir = Some(PathBuf::from(v.trim()));
        }
        if let Some(v) = lookup("COACH_RISK_WEIGHTS") {
            config.risk = serde_json::from_str(&v)?;
        }

        config.validate()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    pub fn memory_limits(&self) -> MemoryLimits {
        MemoryLimits {
            history_cap: self.history_cap,
            trend_window: self.trend_window,
        }
    }

    pub fn max_users(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_resident_users).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

//! Relapse risk scoring.
//!
//! A transparent additive score: every rule that fires adds (risk) or subtracts
//! (protective) its weight and records a human-readable factor. The weights are
//! configuration, see [`RiskWeights`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::brain::NumericContext;
use crate::memory::{EmotionalPattern, Trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        f.write_str(label)
    }
}

/// Everything the scorer looks at besides the emotional pattern.
///
/// Counters left unset are unknown, and the rules that read them do not fire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskContext {
    #[serde(flatten)]
    pub numeric: NumericContext,
    pub sober_days: Option<u32>,
    pub completed_techniques: Option<u32>,
    pub read_articles: Option<u32>,
}

impl RiskContext {
    pub fn new(numeric: NumericContext) -> Self {
        Self {
            numeric,
            ..Self::default()
        }
    }

    pub fn with_sober_days(mut self, days: u32) -> Self {
        self.sober_days = Some(days);
        self
    }

    pub fn with_completed_techniques(mut self, count: u32) -> Self {
        self.completed_techniques = Some(count);
        self
    }

    pub fn with_read_articles(mut self, count: u32) -> Self {
        self.read_articles = Some(count);
        self
    }
}

/// Tunable weights and thresholds.
///
/// Protective weights are magnitudes: they are subtracted from the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_thresholds"))]
pub struct RiskWeights {
    #[validate(range(min = 0, max = 20))]
    pub low_mood: i32,
    #[validate(range(min = 0, max = 20))]
    pub high_craving: i32,
    #[validate(range(min = 0, max = 20))]
    pub high_stress: i32,
    #[validate(range(min = 0, max = 20))]
    pub early_recovery: i32,
    #[validate(range(min = 0, max = 20))]
    pub low_engagement: i32,
    #[validate(range(min = 0, max = 20))]
    pub declining_trend: i32,

    #[validate(range(min = 0, max = 20))]
    pub long_streak: i32,
    #[validate(range(min = 0, max = 20))]
    pub good_mood: i32,
    #[validate(range(min = 0, max = 20))]
    pub high_engagement: i32,
    #[validate(range(min = 0, max = 20))]
    pub educational_engagement: i32,
    #[validate(range(min = 0, max = 20))]
    pub improving_trend: i32,

    /// Score at or above which the level is high
    #[validate(range(min = 1, max = 100))]
    pub high_threshold: i32,
    /// Score at or above which the level is medium
    #[validate(range(min = 1, max = 100))]
    pub medium_threshold: i32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            low_mood: 2,
            high_craving: 3,
            high_stress: 1,
            early_recovery: 2,
            low_engagement: 1,
            declining_trend: 1,
            long_streak: 2,
            good_mood: 1,
            high_engagement: 1,
            educational_engagement: 1,
            improving_trend: 1,
            high_threshold: 4,
            medium_threshold: 2,
        }
    }
}

fn validate_thresholds(weights: &RiskWeights) -> Result<(), ValidationError> {
    if weights.medium_threshold >= weights.high_threshold {
        return Err(ValidationError::new("medium_threshold_must_be_below_high"));
    }
    Ok(())
}

/// Scored risk with the factors that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RiskProfile {
    pub level: RiskLevel,
    /// Raw additive total
    pub score: i32,
    pub risk_factors: Vec<String>,
    pub protective_factors: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    weights: RiskWeights,
}

impl RiskScorer {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    pub fn score(&self, context: &RiskContext, pattern: &EmotionalPattern) -> RiskProfile {
        let w = &self.weights;
        let numeric = context.numeric.normalized();
        let mut score = 0;
        let mut risk_factors = Vec::new();
        let mut protective_factors = Vec::new();

        let mut risk = |applies: bool, weight: i32, factor: String| {
            if applies {
                score += weight;
                risk_factors.push(factor);
            }
        };
        risk(
            numeric.mood <= 2.0,
            w.low_mood,
            format!("Низкое настроение ({}/5)", numeric.mood),
        );
        risk(
            numeric.craving_level >= 4.0,
            w.high_craving,
            format!("Сильная тяга ({}/5)", numeric.craving_level),
        );
        risk(
            numeric.stress_level >= 4.0,
            w.high_stress,
            format!("Высокий стресс ({}/5)", numeric.stress_level),
        );
        if let Some(days) = context.sober_days {
            risk(
                days < 30,
                w.early_recovery,
                format!("Ранний этап восстановления ({} дн.)", days),
            );
        }
        risk(
            context.completed_techniques.is_some_and(|n| n < 3),
            w.low_engagement,
            "Мало освоенных техник".to_string(),
        );
        risk(
            pattern.trend == Trend::Declining,
            w.declining_trend,
            "Настроение ухудшается".to_string(),
        );

        let mut protect = |applies: bool, weight: i32, factor: String| {
            if applies {
                score -= weight;
                protective_factors.push(factor);
            }
        };
        if let Some(days) = context.sober_days {
            protect(
                days >= 90,
                w.long_streak,
                format!("Длительная трезвость ({} дн.)", days),
            );
        }
        protect(
            numeric.mood >= 4.0,
            w.good_mood,
            format!("Хорошее настроение ({}/5)", numeric.mood),
        );
        protect(
            context.completed_techniques.is_some_and(|n| n >= 10),
            w.high_engagement,
            "Регулярная практика техник".to_string(),
        );
        protect(
            context.read_articles.is_some_and(|n| n >= 5),
            w.educational_engagement,
            "Интерес к обучающим материалам".to_string(),
        );
        protect(
            pattern.trend == Trend::Improving,
            w.improving_trend,
            "Настроение улучшается".to_string(),
        );

        let level = if score >= w.high_threshold {
            RiskLevel::High
        } else if score >= w.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        debug!(
            score,
            level = %level,
            risk_factors = risk_factors.len(),
            protective_factors = protective_factors.len(),
            "Risk scored"
        );

        RiskProfile {
            level,
            score,
            risk_factors,
            protective_factors,
        }
    }
}

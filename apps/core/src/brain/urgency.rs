//! Urgency assessment over tiered keyword tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{first_match, CRITICAL_KEYWORDS, HIGH_KEYWORDS, MEDIUM_KEYWORDS};

/// Severity tier. Ordered: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }

    pub fn is_urgent(&self) -> bool {
        *self >= Urgency::High
    }
}

/// Result of urgency assessment, with the keyword that decided the tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UrgencyResult {
    pub urgency: Urgency,
    pub matched_keyword: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UrgencyAssessor;

impl UrgencyAssessor {
    pub fn new() -> Self {
        Self
    }

    /// Check tiers in strict priority order; the first tier with a match wins.
    pub fn assess(&self, normalized: &str) -> UrgencyResult {
        let tiers: [(Urgency, &[&'static str]); 3] = [
            (Urgency::Critical, CRITICAL_KEYWORDS),
            (Urgency::High, HIGH_KEYWORDS),
            (Urgency::Medium, MEDIUM_KEYWORDS),
        ];

        for (urgency, keywords) in tiers {
            if let Some(keyword) = first_match(normalized, keywords) {
                return UrgencyResult {
                    urgency,
                    matched_keyword: Some(keyword.to_string()),
                };
            }
        }

        UrgencyResult::default()
    }
}

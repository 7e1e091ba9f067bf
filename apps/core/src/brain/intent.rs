//! Intent Classification using keyword tables.
//!
//! Deterministic substring scoring over [`INTENT_LEXICON`]. No ML model required.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{scan, INTENT_LEXICON};

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asking to be heard or helped ("поддержи", "нужна помощь")
    SeekingSupport,
    /// Reporting a win or a streak ("получилось", "дней без")
    SharingProgress,
    /// Asking what to do ("что делать", "посоветуй")
    AskingAdvice,
    /// Describing a hard moment ("тяжело", "сорвался")
    ExpressingStruggle,
    /// Small talk, also the default when nothing matches
    #[default]
    CasualChat,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::SeekingSupport => "seeking_support",
            Intent::SharingProgress => "sharing_progress",
            Intent::AskingAdvice => "asking_advice",
            Intent::ExpressingStruggle => "expressing_struggle",
            Intent::CasualChat => "casual_chat",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Keywords that matched
    pub matched_keywords: Vec<String>,
}

impl Default for IntentResult {
    fn default() -> Self {
        Self {
            intent: Intent::CasualChat,
            confidence: 0.0,
            matched_keywords: vec![],
        }
    }
}

/// Intent classifier using keyword tables
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the intent of already-normalized text
    pub fn classify(&self, normalized: &str) -> IntentResult {
        if normalized.is_empty() {
            return IntentResult::default();
        }

        let mut best = IntentResult::default();
        let mut best_score = 0;

        for (intent, keywords) in INTENT_LEXICON {
            let (score, matched) = scan(normalized, keywords);
            // strict comparison keeps the earlier table entry on ties
            if score > best_score {
                best_score = score;
                best = IntentResult {
                    intent: *intent,
                    confidence: (score as f32 / 3.0).min(1.0),
                    matched_keywords: matched.into_iter().map(String::from).collect(),
                };
            }
        }

        best
    }
}

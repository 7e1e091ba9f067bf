//! Multi-label trigger and theme detection.
//!
//! Unlike emotion and intent, any number of categories may fire for one message.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{scan, THEME_LEXICON, TRIGGER_LEXICON};

/// Lexical category associated with relapse risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Alcohol,
    Drugs,
    Stress,
    Social,
    Emotional,
    Work,
    Family,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Trigger {
    pub fn label(&self) -> &'static str {
        match self {
            Trigger::Alcohol => "alcohol",
            Trigger::Drugs => "drugs",
            Trigger::Stress => "stress",
            Trigger::Social => "social",
            Trigger::Emotional => "emotional",
            Trigger::Work => "work",
            Trigger::Family => "family",
        }
    }

    /// Russian display name used in response templates
    pub fn display_name(&self) -> &'static str {
        match self {
            Trigger::Alcohol => "алкоголь",
            Trigger::Drugs => "вещества",
            Trigger::Stress => "стресс",
            Trigger::Social => "компания и праздники",
            Trigger::Emotional => "тяжелые чувства",
            Trigger::Work => "работа",
            Trigger::Family => "семья",
        }
    }

    /// Triggers that point at the substance itself
    pub fn is_substance(&self) -> bool {
        matches!(self, Trigger::Alcohol | Trigger::Drugs)
    }
}

/// Topical tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Recovery,
    Relationships,
    Work,
    Health,
    Emotions,
    Goals,
    Spirituality,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Recovery => "recovery",
            Theme::Relationships => "relationships",
            Theme::Work => "work",
            Theme::Health => "health",
            Theme::Emotions => "emotions",
            Theme::Goals => "goals",
            Theme::Spirituality => "spirituality",
        }
    }
}

/// Scans for triggers and themes in table order
#[derive(Debug, Default, Clone, Copy)]
pub struct SignalScanner;

impl SignalScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn triggers(&self, normalized: &str) -> Vec<Trigger> {
        TRIGGER_LEXICON
            .iter()
            .filter(|(_, keywords)| scan(normalized, keywords).0 > 0)
            .map(|(trigger, _)| *trigger)
            .collect()
    }

    pub fn themes(&self, normalized: &str) -> Vec<Theme> {
        THEME_LEXICON
            .iter()
            .filter(|(_, keywords)| scan(normalized, keywords).0 > 0)
            .map(|(theme, _)| *theme)
            .collect()
    }
}

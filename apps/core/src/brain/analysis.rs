//! Analysis - Output structure of the Message Analyzer.
//!
//! Contains everything extracted from one message plus the optional numeric context that
//! came with it.

use serde::{Deserialize, Serialize};

use super::emotion::Emotion;
use super::intent::Intent;
use super::signals::{Theme, Trigger};
use super::urgency::Urgency;

/// Mid-scale value used when a 1-5 rating is missing
pub const MID_SCALE: f32 = 3.0;

/// Numeric self-report that may accompany a message.
///
/// Every field is optional; [`NumericContext::normalized`] fills gaps with mid-scale
/// values and clamps out-of-range input instead of rejecting it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericContext {
    /// Mood, 1 (very low) to 5 (very good)
    pub mood: Option<f32>,
    /// Craving, 1 (none) to 5 (overwhelming)
    pub craving_level: Option<f32>,
    /// Stress, 1 (calm) to 5 (overwhelmed)
    pub stress_level: Option<f32>,
    /// Hour of day, 0-23
    pub time_of_day: Option<u8>,
}

/// [`NumericContext`] with every field resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedContext {
    pub mood: f32,
    pub craving_level: f32,
    pub stress_level: f32,
    pub time_of_day: u8,
}

fn scale(value: Option<f32>) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(1.0, 5.0),
        _ => MID_SCALE,
    }
}

impl NumericContext {
    pub fn with_mood(mut self, mood: f32) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_craving(mut self, craving: f32) -> Self {
        self.craving_level = Some(craving);
        self
    }

    pub fn with_stress(mut self, stress: f32) -> Self {
        self.stress_level = Some(stress);
        self
    }

    pub fn with_time_of_day(mut self, hour: u8) -> Self {
        self.time_of_day = Some(hour);
        self
    }

    /// Substitute safe defaults for missing or out-of-range values
    pub fn normalized(&self) -> ResolvedContext {
        ResolvedContext {
            mood: scale(self.mood),
            craving_level: scale(self.craving_level),
            stress_level: scale(self.stress_level),
            time_of_day: self.time_of_day.map(|h| h.min(23)).unwrap_or(12),
        }
    }
}

/// Complete result of analyzing one message.
///
/// Every field defaults, so a partially specified record deserializes to the neutral
/// analysis rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub emotion: Emotion,
    /// Emotion intensity (0.0 - 1.0)
    pub intensity: f32,
    pub intent: Intent,
    /// Intent confidence (0.0 - 1.0)
    pub confidence: f32,
    pub urgency: Urgency,
    pub triggers: Vec<Trigger>,
    pub themes: Vec<Theme>,
    pub needs_support: bool,
    /// Estimated mood on the 1-5 scale
    pub mood: f32,
    /// Lexicon entries that fired, for explainability
    pub matched_keywords: Vec<String>,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            emotion: Emotion::Neutral,
            intensity: 0.0,
            intent: Intent::CasualChat,
            confidence: 0.0,
            urgency: Urgency::Low,
            triggers: vec![],
            themes: vec![],
            needs_support: false,
            mood: MID_SCALE,
            matched_keywords: vec![],
        }
    }
}

impl Analysis {
    /// Neutral analysis, used for empty input
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn primary_trigger(&self) -> Option<Trigger> {
        self.triggers.first().copied()
    }

    /// Get a summary for logging. Never contains the message text.
    pub fn summary(&self) -> String {
        format!(
            "Emotion: {} ({:.0}%), Intent: {} ({:.0}%), Urgency: {}, Triggers: {}, Support: {}",
            self.emotion,
            self.intensity * 100.0,
            self.intent,
            self.confidence * 100.0,
            self.urgency,
            self.triggers.len(),
            if self.needs_support { "yes" } else { "no" }
        )
    }
}

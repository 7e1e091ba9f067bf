//! Message Analyzer - Main orchestrator for the Brain module.
//!
//! Coordinates emotion detection, intent classification, urgency assessment and
//! trigger/theme scanning into a single [`Analysis`]. Pure and deterministic: the same
//! text and context always produce the same result.

use std::collections::HashSet;
use tracing::debug;

use super::analysis::{Analysis, NumericContext, MID_SCALE};
use super::emotion::{Emotion, EmotionDetector};
use super::intent::IntentClassifier;
use super::lexicon::{normalize, scan, DISTRESS_PHRASES};
use super::signals::SignalScanner;
use super::urgency::UrgencyAssessor;

/// Intensity above which a negative emotion alone means the person needs support
const SUPPORT_INTENSITY_THRESHOLD: f32 = 0.7;

/// Main analyzer that orchestrates all lexical components
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageAnalyzer {
    emotion_detector: EmotionDetector,
    intent_classifier: IntentClassifier,
    urgency_assessor: UrgencyAssessor,
    signal_scanner: SignalScanner,
}

impl MessageAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a message and produce an [`Analysis`]. Never fails.
    pub fn analyze(&self, text: &str, context: Option<&NumericContext>) -> Analysis {
        let normalized = normalize(text);

        if normalized.is_empty() {
            let mut analysis = Analysis::neutral();
            analysis.mood = context.map(|c| c.normalized().mood).unwrap_or(MID_SCALE);
            return analysis;
        }

        // 1. Emotion
        let emotion = self.emotion_detector.detect(&normalized);

        // 2. Intent
        let intent = self.intent_classifier.classify(&normalized);

        // 3. Urgency (critical short-circuits lower tiers)
        let urgency = self.urgency_assessor.assess(&normalized);

        // 4. Triggers and themes
        let triggers = self.signal_scanner.triggers(&normalized);
        let themes = self.signal_scanner.themes(&normalized);

        // 5. Support flag
        let (distress_hits, distress_matched) = scan(&normalized, DISTRESS_PHRASES);
        let needs_support = distress_hits > 0
            || (emotion.intensity > SUPPORT_INTENSITY_THRESHOLD && emotion.emotion.is_negative());

        let mood = match context {
            Some(ctx) if ctx.mood.is_some() => ctx.normalized().mood,
            _ => estimate_mood(emotion.emotion, emotion.intensity),
        };

        let mut matched_keywords = emotion.matched_keywords;
        matched_keywords.extend(intent.matched_keywords);
        matched_keywords.extend(urgency.matched_keyword);
        matched_keywords.extend(distress_matched.into_iter().map(String::from));
        let mut seen = HashSet::new();
        matched_keywords.retain(|keyword| seen.insert(keyword.clone()));

        let analysis = Analysis {
            emotion: emotion.emotion,
            intensity: emotion.intensity,
            intent: intent.intent,
            confidence: intent.confidence,
            urgency: urgency.urgency,
            triggers,
            themes,
            needs_support,
            mood,
            matched_keywords,
        };

        debug!("Message analyzed: {}", analysis.summary());
        analysis
    }
}

/// Mood estimate from emotion alone: `3 + valence * (1 + intensity)`, clamped to 1-5.
fn estimate_mood(emotion: Emotion, intensity: f32) -> f32 {
    (MID_SCALE + emotion.valence() * (1.0 + intensity)).clamp(1.0, 5.0)
}

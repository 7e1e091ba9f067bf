//! Emotion detection by keyword counting.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{scan, EMOTION_LEXICON};

/// Fixed emotion vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Sad,
    Angry,
    Anxious,
    Happy,
    Frustrated,
    Hopeful,
    #[default]
    Neutral,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Emotion {
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Anxious => "anxious",
            Emotion::Happy => "happy",
            Emotion::Frustrated => "frustrated",
            Emotion::Hopeful => "hopeful",
            Emotion::Neutral => "neutral",
        }
    }

    /// Emotions that, when intense, mean the person needs support
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Emotion::Sad | Emotion::Angry | Emotion::Anxious | Emotion::Frustrated
        )
    }

    /// +1 for positive, -1 for negative, 0 for neutral
    pub fn valence(&self) -> f32 {
        match self {
            Emotion::Happy | Emotion::Hopeful => 1.0,
            Emotion::Neutral => 0.0,
            _ => -1.0,
        }
    }
}

/// Result of emotion detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    pub emotion: Emotion,
    /// Intensity (0.0 - 1.0)
    pub intensity: f32,
    pub matched_keywords: Vec<String>,
}

impl Default for EmotionResult {
    fn default() -> Self {
        Self {
            emotion: Emotion::Neutral,
            intensity: 0.0,
            matched_keywords: vec![],
        }
    }
}

/// Single-label emotion detector over [`EMOTION_LEXICON`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EmotionDetector;

impl EmotionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the dominant emotion in already-normalized text.
    ///
    /// The category with the highest keyword count wins; ties keep the earlier table
    /// entry. Intensity is `min(count / 2, 1)`.
    pub fn detect(&self, normalized: &str) -> EmotionResult {
        let mut best = EmotionResult::default();
        let mut best_count = 0;

        for (emotion, keywords) in EMOTION_LEXICON {
            let (count, matched) = scan(normalized, keywords);
            if count > best_count {
                best_count = count;
                best = EmotionResult {
                    emotion: *emotion,
                    intensity: (count as f32 / 2.0).min(1.0),
                    matched_keywords: matched.into_iter().map(String::from).collect(),
                };
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_is_neutral() {
        let result = EmotionDetector::new().detect("просто сижу дома");
        assert_eq!(result.emotion, Emotion::Neutral);
        assert_eq!(result.intensity, 0.0);
    }

    #[test]
    fn test_single_keyword_half_intensity() {
        let result = EmotionDetector::new().detect("мне грустно");
        assert_eq!(result.emotion, Emotion::Sad);
        assert_eq!(result.intensity, 0.5);
    }

    #[test]
    fn test_intensity_saturates() {
        let result = EmotionDetector::new().detect("тревожно, паника, боюсь");
        assert_eq!(result.emotion, Emotion::Anxious);
        assert_eq!(result.intensity, 1.0);
    }

    #[test]
    fn test_tie_uses_table_order() {
        // one sad keyword, one happy keyword: sad is declared first
        let result = EmotionDetector::new().detect("грустно, но здорово");
        assert_eq!(result.emotion, Emotion::Sad);
    }

    #[test]
    fn test_valence() {
        assert_eq!(Emotion::Happy.valence(), 1.0);
        assert_eq!(Emotion::Neutral.valence(), 0.0);
        assert_eq!(Emotion::Frustrated.valence(), -1.0);
        assert!(Emotion::Angry.is_negative());
        assert!(!Emotion::Hopeful.is_negative());
    }
}

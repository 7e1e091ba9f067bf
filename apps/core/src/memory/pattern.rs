//! Emotional pattern derived from the most recent analyzed turns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::brain::analysis::MID_SCALE;
use crate::brain::Emotion;

/// Minimum half-to-half mood difference that counts as a trend
pub const TREND_DELTA: f32 = 0.5;

/// Number of dominant emotions reported
pub const DOMINANT_EMOTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalPattern {
    pub average_mood: f32,
    pub trend: Trend,
    /// Most frequent emotions, most frequent first
    pub dominant_emotions: Vec<Emotion>,
}

impl Default for EmotionalPattern {
    fn default() -> Self {
        Self {
            average_mood: MID_SCALE,
            trend: Trend::Stable,
            dominant_emotions: vec![],
        }
    }
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

impl EmotionalPattern {
    /// Compute the pattern from `(mood, emotion)` samples, oldest first.
    ///
    /// The caller passes the window already trimmed to its size. An empty window yields
    /// the default pattern.
    pub fn from_window(window: &[(f32, Emotion)]) -> Self {
        if window.is_empty() {
            return Self::default();
        }

        let moods: Vec<f32> = window.iter().map(|(mood, _)| *mood).collect();
        let average_mood = mean(&moods);

        let trend = if moods.len() < 2 {
            Trend::Stable
        } else {
            let (earlier, later) = moods.split_at(moods.len() / 2);
            let delta = mean(later) - mean(earlier);
            if delta > TREND_DELTA {
                Trend::Improving
            } else if delta < -TREND_DELTA {
                Trend::Declining
            } else {
                Trend::Stable
            }
        };

        // (emotion, count) in first-seen order
        let mut counts: Vec<(Emotion, usize)> = Vec::new();
        for (_, emotion) in window {
            match counts.iter_mut().find(|(e, _)| e == emotion) {
                Some((_, count)) => *count += 1,
                None => counts.push((*emotion, 1)),
            }
        }
        // stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            average_mood,
            trend,
            dominant_emotions: counts
                .into_iter()
                .take(DOMINANT_EMOTIONS)
                .map(|(emotion, _)| emotion)
                .collect(),
        }
    }
}

//! # Brain Module
//!
//! Fast, deterministic analysis of a single message. No ML model: every classification
//! is a lexical scan over the tables in [`lexicon`].
//!
//! ## Components
//! - `lexicon`: static keyword tables
//! - `emotion`: single-label emotion detection with intensity
//! - `intent`: single-label intent classification with confidence
//! - `urgency`: tiered urgency assessment (critical short-circuits)
//! - `signals`: multi-label trigger and theme scanning
//! - `analysis`: output data structures
//! - `analyzer`: main orchestrator

pub mod analysis;
pub mod analyzer;
pub mod emotion;
pub mod intent;
pub mod lexicon;
pub mod signals;
pub mod urgency;

pub use analysis::{Analysis, NumericContext, ResolvedContext};
pub use analyzer::MessageAnalyzer;
pub use emotion::{Emotion, EmotionDetector, EmotionResult};
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use signals::{SignalScanner, Theme, Trigger};
pub use urgency::{Urgency, UrgencyAssessor, UrgencyResult};

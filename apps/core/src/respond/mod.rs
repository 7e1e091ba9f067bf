//! # Respond Module
//!
//! Builds the coach's reply from an analysis and a risk profile.
//!
//! ## Components
//! - `templates`: per-segment template pools
//! - `suggestions`: built-in suggestions and rule-based aggregation
//! - `tone`: deterministic personalization rewrites
//! - `resolver`: primary path selection and final assembly

pub mod resolver;
pub mod suggestions;
pub mod templates;
pub mod tone;

pub use resolver::{CoachResponse, ResponseResolver, ResponseSegment};
pub use suggestions::{Suggestion, SuggestionCategory, MAX_SUGGESTIONS};
pub use templates::SegmentKind;
pub use tone::Tone;

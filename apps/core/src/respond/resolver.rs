//! Response resolution.
//!
//! Turns an analysis and a risk profile into response segments and suggestions. The
//! primary path is exclusive (critical, then high urgency, then intent); supportive,
//! trigger and risk segments are added on top of whichever path ran.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::suggestions::{
    aggregate, builtins, finalize, Suggestion, CRISIS_HOTLINE, GROUNDING, MAX_SUGGESTIONS,
    TRUSTED_CONTACT,
};
use super::templates::{self, SegmentKind};
use super::tone::Tone;
use crate::brain::{Analysis, Emotion, Intent, Urgency};
use crate::memory::TurnCategory;
use crate::risk::{RiskLevel, RiskProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Ordered segments plus at most three suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CoachResponse {
    pub segments: Vec<ResponseSegment>,
    pub suggestions: Vec<Suggestion>,
}

impl CoachResponse {
    /// Segments joined into one message
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_segment(&self, kind: SegmentKind) -> bool {
        self.segments.iter().any(|s| s.kind == kind)
    }

    /// Category of the engine turn that records this response
    pub fn category(&self) -> TurnCategory {
        if self.has_segment(SegmentKind::Emergency) || self.has_segment(SegmentKind::UrgentSupport) {
            TurnCategory::Emergency
        } else if self.has_segment(SegmentKind::Celebration) {
            TurnCategory::Celebration
        } else if !self.suggestions.is_empty() {
            TurnCategory::Suggestion
        } else {
            TurnCategory::Plain
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseResolver {
    suggestion_limit: usize,
}

impl Default for ResponseResolver {
    fn default() -> Self {
        Self::new(MAX_SUGGESTIONS)
    }
}

fn regular_kind(analysis: &Analysis) -> SegmentKind {
    match analysis.intent {
        Intent::SeekingSupport => SegmentKind::Support,
        Intent::SharingProgress => SegmentKind::Celebration,
        Intent::AskingAdvice => SegmentKind::Advice,
        Intent::ExpressingStruggle => SegmentKind::Struggle,
        Intent::CasualChat if analysis.confidence == 0.0 && analysis.emotion == Emotion::Neutral => {
            SegmentKind::Default
        }
        Intent::CasualChat => SegmentKind::Casual,
    }
}

impl ResponseResolver {
    pub fn new(suggestion_limit: usize) -> Self {
        Self {
            suggestion_limit: suggestion_limit.clamp(1, MAX_SUGGESTIONS),
        }
    }

    pub fn respond<R: Rng + ?Sized>(
        &self,
        analysis: &Analysis,
        risk: &RiskProfile,
        tone: Tone,
        rng: &mut R,
    ) -> CoachResponse {
        // Critical ids lead the list; high-path ids only fill slots the ranked rules leave.
        let (primary_kind, leading_ids, trailing_ids): (SegmentKind, &[&str], &[&str]) =
            match analysis.urgency {
                Urgency::Critical => (
                    SegmentKind::Emergency,
                    &[CRISIS_HOTLINE, GROUNDING, TRUSTED_CONTACT][..],
                    &[][..],
                ),
                Urgency::High => (
                    SegmentKind::UrgentSupport,
                    &[][..],
                    &[GROUNDING, TRUSTED_CONTACT][..],
                ),
                _ => (regular_kind(analysis), &[][..], &[][..]),
            };

        let mut segments = vec![(
            primary_kind,
            templates::pick(templates::pool(primary_kind), rng).to_string(),
        )];

        if analysis.needs_support {
            segments.push((
                SegmentKind::Supportive,
                templates::pick(templates::pool(SegmentKind::Supportive), rng).to_string(),
            ));
        }

        if let Some(trigger) = analysis.primary_trigger() {
            let text = templates::pick(templates::trigger_pool(trigger), rng)
                .replace("{trigger}", trigger.display_name());
            segments.push((SegmentKind::TriggerManagement, text));
        }

        if risk.level == RiskLevel::High && !analysis.urgency.is_urgent() {
            let factor = risk
                .risk_factors
                .first()
                .map(|f| f.to_lowercase())
                .unwrap_or_else(|| "риск срыва сейчас повышен".to_string());
            let text = templates::pick(templates::pool(SegmentKind::RiskCheckIn), rng)
                .replace("{factor}", &factor);
            segments.push((SegmentKind::RiskCheckIn, text));
        }

        let mut ranked = aggregate(analysis);
        ranked.extend(builtins(trailing_ids));
        let suggestions = finalize(builtins(leading_ids), ranked, self.suggestion_limit);

        debug!(
            primary = ?primary_kind,
            segments = segments.len(),
            suggestions = suggestions.len(),
            tone = %tone,
            "Response resolved"
        );

        CoachResponse {
            segments: segments
                .into_iter()
                .map(|(kind, text)| ResponseSegment {
                    kind,
                    text: tone.apply(&text),
                })
                .collect(),
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Trigger;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn respond(analysis: &Analysis, risk: &RiskProfile) -> CoachResponse {
        ResponseResolver::default().respond(analysis, risk, Tone::Gentle, &mut StdRng::seed_from_u64(1))
    }

    fn kinds(response: &CoachResponse) -> Vec<SegmentKind> {
        response.segments.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_default_analysis_is_regular() {
        let response = respond(&Analysis::default(), &RiskProfile::default());
        assert_eq!(kinds(&response), vec![SegmentKind::Default]);
        assert_eq!(response.category(), TurnCategory::Suggestion);
        assert!(!response.suggestions.is_empty());
    }

    #[test]
    fn test_critical_forces_emergency() {
        let analysis = Analysis {
            urgency: Urgency::Critical,
            intent: Intent::SharingProgress,
            ..Analysis::default()
        };
        let response = respond(&analysis, &RiskProfile::default());

        assert_eq!(kinds(&response), vec![SegmentKind::Emergency]);
        assert_eq!(response.suggestions[0].id, CRISIS_HOTLINE);
        assert!(response.suggestions[0].is_emergency());
        assert_eq!(response.category(), TurnCategory::Emergency);
    }

    #[test]
    fn test_emergency_survives_limit_of_one() {
        let analysis = Analysis {
            urgency: Urgency::Critical,
            ..Analysis::default()
        };
        let response = ResponseResolver::new(1).respond(
            &analysis,
            &RiskProfile::default(),
            Tone::Practical,
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(response.suggestions.len(), 1);
        assert!(response.suggestions[0].is_emergency());
    }

    #[test]
    fn test_needs_support_adds_supportive_segment() {
        let analysis = Analysis {
            intent: Intent::AskingAdvice,
            needs_support: true,
            ..Analysis::default()
        };
        let response = respond(&analysis, &RiskProfile::default());
        assert_eq!(kinds(&response), vec![SegmentKind::Advice, SegmentKind::Supportive]);
    }

    #[test]
    fn test_generic_trigger_names_trigger() {
        let analysis = Analysis {
            triggers: vec![Trigger::Work],
            ..Analysis::default()
        };
        let response = respond(&analysis, &RiskProfile::default());
        let segment = &response.segments[1];

        assert_eq!(segment.kind, SegmentKind::TriggerManagement);
        assert!(segment.text.contains(Trigger::Work.display_name()));
        assert!(!segment.text.contains("{trigger}"));
    }

    #[test]
    fn test_high_risk_check_in_only_off_urgent_path() {
        let risk = RiskProfile {
            level: RiskLevel::High,
            score: 6,
            risk_factors: vec!["Сильная тяга (5/5)".to_string()],
            protective_factors: vec![],
        };

        let calm = respond(&Analysis::default(), &risk);
        assert!(calm.has_segment(SegmentKind::RiskCheckIn));
        assert!(calm.text().contains("сильная тяга"));

        let urgent = respond(
            &Analysis {
                urgency: Urgency::High,
                ..Analysis::default()
            },
            &risk,
        );
        assert!(!urgent.has_segment(SegmentKind::RiskCheckIn));
        assert_eq!(urgent.segments[0].kind, SegmentKind::UrgentSupport);
    }

    #[test]
    fn test_high_urgency_keeps_crisis_hotline_and_rules() {
        let analysis = Analysis {
            urgency: Urgency::High,
            emotion: Emotion::Anxious,
            intensity: 1.0,
            intent: Intent::SeekingSupport,
            triggers: vec![Trigger::Alcohol],
            ..Analysis::default()
        };
        let response = respond(&analysis, &RiskProfile::default());
        let ids: Vec<&str> = response.suggestions.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["breathing_4_7_8", "urge_surfing", CRISIS_HOTLINE]);
    }

    #[test]
    fn test_high_urgency_fills_with_grounding() {
        let analysis = Analysis {
            urgency: Urgency::High,
            ..Analysis::default()
        };
        let response = respond(&analysis, &RiskProfile::default());
        let ids: Vec<&str> = response.suggestions.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec![CRISIS_HOTLINE, GROUNDING, TRUSTED_CONTACT]);
    }

    #[test]
    fn test_same_seed_same_response() {
        let analysis = Analysis {
            intent: Intent::ExpressingStruggle,
            triggers: vec![Trigger::Stress],
            ..Analysis::default()
        };
        let a = ResponseResolver::default().respond(
            &analysis,
            &RiskProfile::default(),
            Tone::Direct,
            &mut StdRng::seed_from_u64(42),
        );
        let b = ResponseResolver::default().respond(
            &analysis,
            &RiskProfile::default(),
            Tone::Direct,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_tone_applied_to_every_segment() {
        let analysis = Analysis {
            intent: Intent::SharingProgress,
            confidence: 1.0,
            needs_support: true,
            ..Analysis::default()
        };
        let response = ResponseResolver::default().respond(
            &analysis,
            &RiskProfile::default(),
            Tone::Gentle,
            &mut StdRng::seed_from_u64(9),
        );
        assert!(response.segments.iter().all(|s| !s.text.contains('!')));
    }
}

//! Brain Module Tests
//!
//! Analyzer behavior on realistic messages: the reference scenarios, urgency dominance
//! and determinism.

use crate::brain::{Emotion, Intent, MessageAnalyzer, NumericContext, Theme, Trigger, Urgency};

const ORDINARY_MESSAGES: &[&str] = &[
    "привет, как дела?",
    "сегодня был отличный день, все получилось",
    "на работе стресс, начальник давит",
    "мне грустно и одиноко",
    "посоветуй, что делать вечером",
    "хочется выпить, не могу сдержаться",
    "",
];

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_critical_message() {
        let analysis = MessageAnalyzer::new().analyze("я хочу покончить с собой", None);
        assert_eq!(analysis.urgency, Urgency::Critical);
        assert!(analysis.matched_keywords.iter().any(|k| k == "покончить с собой"));
    }

    #[test]
    fn test_progress_message() {
        let context = NumericContext::default().with_mood(5.0).with_craving(1.0);
        let analysis = MessageAnalyzer::new()
            .analyze("сегодня был отличный день, все получилось", Some(&context));

        assert_eq!(analysis.intent, Intent::SharingProgress);
        assert_eq!(analysis.emotion, Emotion::Happy);
        assert_eq!(analysis.urgency, Urgency::Low);
        assert!(!analysis.needs_support);
        assert_eq!(analysis.mood, 5.0);
    }

    #[test]
    fn test_craving_message() {
        let analysis = MessageAnalyzer::new().analyze("хочется выпить, не могу сдержаться", None);

        assert_eq!(analysis.triggers, vec![Trigger::Alcohol]);
        assert!(analysis.urgency >= Urgency::High);
        assert_eq!(analysis.intent, Intent::ExpressingStruggle);
    }

    #[test]
    fn test_work_stress_message() {
        let analysis = MessageAnalyzer::new().analyze("на работе стресс, начальник давит", None);

        assert!(analysis.triggers.contains(&Trigger::Stress));
        assert!(analysis.triggers.contains(&Trigger::Work));
        assert!(analysis.themes.contains(&Theme::Work));
        assert_eq!(analysis.urgency, Urgency::Medium);
    }

    #[test]
    fn test_distress_phrase_sets_support() {
        let analysis = MessageAnalyzer::new().analyze("Мне плохо, помогите", None);
        assert!(analysis.needs_support);
        assert_eq!(analysis.urgency, Urgency::Medium);
    }

    #[test]
    fn test_yo_is_folded() {
        let analyzer = MessageAnalyzer::new();
        assert_eq!(
            analyzer.analyze("Всё ещё тревожно", None),
            analyzer.analyze("все еще тревожно", None)
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_critical_phrase_dominates_any_message() {
        let analyzer = MessageAnalyzer::new();
        for message in ORDINARY_MESSAGES {
            let text = format!("{} не хочу жить", message);
            assert_eq!(
                analyzer.analyze(&text, None).urgency,
                Urgency::Critical,
                "Expected critical for '{}'",
                text
            );
        }
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = MessageAnalyzer::new();
        let context = NumericContext::default().with_stress(4.0);
        for message in ORDINARY_MESSAGES {
            assert_eq!(
                analyzer.analyze(message, Some(&context)),
                analyzer.analyze(message, Some(&context))
            );
        }
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let analyzer = MessageAnalyzer::new();
        let loud = "тревожно тревожно тревожно, паника, боюсь, помоги помоги помоги помоги";
        for message in ORDINARY_MESSAGES.iter().chain(std::iter::once(&loud)) {
            let analysis = analyzer.analyze(message, None);
            assert!((0.0..=1.0).contains(&analysis.intensity));
            assert!((0.0..=1.0).contains(&analysis.confidence));
            assert!((1.0..=5.0).contains(&analysis.mood));
        }
    }
}

//! Suggestions and the rule-based aggregation that ranks them.
//!
//! Rules are evaluated in a fixed order (emotion, trigger, intent, urgency, fallback) and
//! that order is the ranking. Deduplication keeps the first occurrence of an id.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::brain::{Analysis, Emotion, Intent, Trigger, Urgency};

/// Hard upper bound on suggestions carried by one response
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Technique,
    Exercise,
    Contact,
    Distraction,
    Emergency,
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuggestionCategory::Technique => "technique",
            SuggestionCategory::Exercise => "exercise",
            SuggestionCategory::Contact => "contact",
            SuggestionCategory::Distraction => "distraction",
            SuggestionCategory::Emergency => "emergency",
        };
        f.write_str(label)
    }
}

/// A recommended action returned alongside a response.
///
/// `action` is an opaque reference resolved by the UI layer (e.g. `open_technique:urge_surfing`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub category: SuggestionCategory,
    pub title: String,
    pub description: String,
    pub action: String,
}

struct SuggestionSpec {
    id: &'static str,
    category: SuggestionCategory,
    title: &'static str,
    description: &'static str,
    action: &'static str,
}

pub const CRISIS_HOTLINE: &str = "crisis_hotline";
pub const GROUNDING: &str = "grounding_5_4_3_2_1";
pub const TRUSTED_CONTACT: &str = "trusted_contact";
pub const URGE_SURFING: &str = "urge_surfing";
pub const BREATHING: &str = "breathing_4_7_8";
pub const SELF_COMPASSION: &str = "self_compassion";
pub const PHYSICAL_ACTIVITY: &str = "physical_activity";
pub const HALT_CHECK: &str = "halt_check";
pub const PROGRESSIVE_RELAXATION: &str = "progressive_relaxation";
pub const REFUSAL_SCRIPT: &str = "refusal_script";
pub const JOURNALING: &str = "journaling";
pub const SHORT_WALK: &str = "short_walk";
pub const FAMILY_BOUNDARIES: &str = "family_boundaries";
pub const PROGRESS_JOURNAL: &str = "progress_journal";
pub const REMEMBER_REASONS: &str = "remember_reasons";
pub const FAVORITE_ACTIVITY: &str = "favorite_activity";

const BUILTIN: &[SuggestionSpec] = &[
    SuggestionSpec {
        id: CRISIS_HOTLINE,
        category: SuggestionCategory::Emergency,
        title: "Телефон доверия",
        description: "Позвони на бесплатный телефон доверия 8-800-2000-122 или в экстренную службу 112. Тебе не нужно справляться с этим в одиночку.",
        action: "call:crisis_hotline",
    },
    SuggestionSpec {
        id: GROUNDING,
        category: SuggestionCategory::Technique,
        title: "Заземление 5-4-3-2-1",
        description: "Назови 5 вещей, которые видишь, 4 вещи, которые можешь потрогать, 3 звука, 2 запаха и 1 вкус.",
        action: "open_technique:grounding_5_4_3_2_1",
    },
    SuggestionSpec {
        id: TRUSTED_CONTACT,
        category: SuggestionCategory::Contact,
        title: "Связаться с близким человеком",
        description: "Напиши или позвони тому, кому доверяешь: наставнику, другу или терапевту.",
        action: "open_contacts:trusted",
    },
    SuggestionSpec {
        id: URGE_SURFING,
        category: SuggestionCategory::Technique,
        title: "Серфинг на волне тяги",
        description: "Тяга похожа на волну: она нарастает, достигает пика и спадает. Понаблюдай за ней 15-20 минут, ничего не предпринимая.",
        action: "open_technique:urge_surfing",
    },
    SuggestionSpec {
        id: BREATHING,
        category: SuggestionCategory::Technique,
        title: "Дыхание 4-7-8",
        description: "Вдох на 4 счета, задержка на 7, медленный выдох на 8. Повтори четыре раза.",
        action: "open_technique:breathing_4_7_8",
    },
    SuggestionSpec {
        id: SELF_COMPASSION,
        category: SuggestionCategory::Exercise,
        title: "Упражнение на самосострадание",
        description: "Скажи себе то, что сказал бы близкому другу в такой же ситуации.",
        action: "open_exercise:self_compassion",
    },
    SuggestionSpec {
        id: PHYSICAL_ACTIVITY,
        category: SuggestionCategory::Distraction,
        title: "Физическая активность",
        description: "Десять минут быстрой ходьбы, отжимания или приседания помогут выпустить напряжение.",
        action: "open_distraction:physical_activity",
    },
    SuggestionSpec {
        id: HALT_CHECK,
        category: SuggestionCategory::Technique,
        title: "Проверка HALT",
        description: "Спроси себя: я голоден, зол, одинок или устал? Сначала позаботься об этой потребности.",
        action: "open_technique:halt_check",
    },
    SuggestionSpec {
        id: PROGRESSIVE_RELAXATION,
        category: SuggestionCategory::Technique,
        title: "Прогрессивная мышечная релаксация",
        description: "Поочередно напрягай и расслабляй группы мышц, начиная со стоп и заканчивая лицом.",
        action: "open_technique:progressive_relaxation",
    },
    SuggestionSpec {
        id: REFUSAL_SCRIPT,
        category: SuggestionCategory::Exercise,
        title: "Как сказать «нет»",
        description: "Подготовь короткую фразу отказа заранее и потренируйся произносить ее вслух.",
        action: "open_exercise:refusal_script",
    },
    SuggestionSpec {
        id: JOURNALING,
        category: SuggestionCategory::Exercise,
        title: "Дневник чувств",
        description: "Запиши, что ты сейчас чувствуешь и что к этому привело. Не оценивай, просто опиши.",
        action: "open_exercise:journaling",
    },
    SuggestionSpec {
        id: SHORT_WALK,
        category: SuggestionCategory::Distraction,
        title: "Короткая прогулка",
        description: "Выйди на пятнадцать минут на свежий воздух, без телефона и рабочих мыслей.",
        action: "open_distraction:short_walk",
    },
    SuggestionSpec {
        id: FAMILY_BOUNDARIES,
        category: SuggestionCategory::Exercise,
        title: "Личные границы в семье",
        description: "Определи одну ситуацию, в которой тебе важно сказать близким о своих границах, и продумай слова.",
        action: "open_exercise:family_boundaries",
    },
    SuggestionSpec {
        id: PROGRESS_JOURNAL,
        category: SuggestionCategory::Exercise,
        title: "Дневник достижений",
        description: "Запиши сегодняшнюю победу, чтобы перечитать ее в трудный день.",
        action: "open_exercise:progress_journal",
    },
    SuggestionSpec {
        id: REMEMBER_REASONS,
        category: SuggestionCategory::Exercise,
        title: "Вспомни свои причины",
        description: "Перечитай список причин, по которым ты выбрал трезвость.",
        action: "open_exercise:remember_reasons",
    },
    SuggestionSpec {
        id: FAVORITE_ACTIVITY,
        category: SuggestionCategory::Distraction,
        title: "Любимое занятие",
        description: "Займись тем, что приносит удовольствие: музыка, книга, готовка.",
        action: "open_distraction:favorite_activity",
    },
];

impl Suggestion {
    /// Look up a built-in suggestion by id
    pub fn builtin(id: &str) -> Option<Suggestion> {
        BUILTIN.iter().find(|spec| spec.id == id).map(|spec| Suggestion {
            id: spec.id.to_string(),
            category: spec.category,
            title: spec.title.to_string(),
            description: spec.description.to_string(),
            action: spec.action.to_string(),
        })
    }

    pub fn is_emergency(&self) -> bool {
        self.category == SuggestionCategory::Emergency
    }
}

/// Resolve built-in ids, skipping any unknown ones
pub fn builtins(ids: &[&str]) -> Vec<Suggestion> {
    ids.iter().filter_map(|id| Suggestion::builtin(id)).collect()
}

fn emotion_rules(analysis: &Analysis) -> Vec<&'static str> {
    let mut ids = Vec::new();
    match analysis.emotion {
        Emotion::Anxious if analysis.intensity > 0.6 => ids.push(BREATHING),
        Emotion::Sad if analysis.intensity > 0.5 => ids.push(SELF_COMPASSION),
        Emotion::Angry if analysis.intensity > 0.5 => ids.push(PHYSICAL_ACTIVITY),
        Emotion::Frustrated if analysis.intensity > 0.5 => ids.push(HALT_CHECK),
        _ => {}
    }
    ids
}

fn trigger_rules(analysis: &Analysis) -> Vec<&'static str> {
    analysis
        .triggers
        .iter()
        .map(|trigger| match trigger {
            Trigger::Alcohol | Trigger::Drugs => URGE_SURFING,
            Trigger::Stress => PROGRESSIVE_RELAXATION,
            Trigger::Social => REFUSAL_SCRIPT,
            Trigger::Emotional => JOURNALING,
            Trigger::Work => SHORT_WALK,
            Trigger::Family => FAMILY_BOUNDARIES,
        })
        .collect()
}

fn intent_rules(analysis: &Analysis) -> Vec<&'static str> {
    match analysis.intent {
        Intent::SeekingSupport => vec![TRUSTED_CONTACT],
        Intent::AskingAdvice => vec![HALT_CHECK],
        Intent::ExpressingStruggle => vec![URGE_SURFING],
        Intent::SharingProgress => vec![PROGRESS_JOURNAL],
        Intent::CasualChat => vec![],
    }
}

fn urgency_rules(analysis: &Analysis) -> Vec<&'static str> {
    if analysis.urgency >= Urgency::High {
        vec![CRISIS_HOTLINE]
    } else {
        vec![]
    }
}

/// Run every rule in priority order. Falls back to motivational suggestions when
/// nothing matched.
pub fn aggregate(analysis: &Analysis) -> Vec<Suggestion> {
    let mut ids = emotion_rules(analysis);
    ids.extend(trigger_rules(analysis));
    ids.extend(intent_rules(analysis));
    ids.extend(urgency_rules(analysis));

    if ids.is_empty() {
        ids = vec![REMEMBER_REASONS, FAVORITE_ACTIVITY];
    }

    builtins(&ids)
}

/// Deduplicate by id, keeping first occurrences, and cap the list.
///
/// An emergency suggestion ranked past the cap takes the last kept slot.
pub fn finalize(
    primary: Vec<Suggestion>,
    aggregated: Vec<Suggestion>,
    limit: usize,
) -> Vec<Suggestion> {
    let limit = limit.clamp(1, MAX_SUGGESTIONS);
    let mut seen = HashSet::new();

    let mut ranked: Vec<Suggestion> = primary
        .into_iter()
        .chain(aggregated)
        .filter(|s| seen.insert(s.id.clone()))
        .collect();

    match ranked.iter().position(Suggestion::is_emergency) {
        Some(index) if index >= limit => {
            let emergency = ranked.swap_remove(index);
            ranked.truncate(limit - 1);
            ranked.push(emergency);
        }
        _ => ranked.truncate(limit),
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_every_rule_target_is_builtin() {
        for id in [
            CRISIS_HOTLINE,
            GROUNDING,
            TRUSTED_CONTACT,
            URGE_SURFING,
            BREATHING,
            SELF_COMPASSION,
            PHYSICAL_ACTIVITY,
            HALT_CHECK,
            PROGRESSIVE_RELAXATION,
            REFUSAL_SCRIPT,
            JOURNALING,
            SHORT_WALK,
            FAMILY_BOUNDARIES,
            PROGRESS_JOURNAL,
            REMEMBER_REASONS,
            FAVORITE_ACTIVITY,
        ] {
            assert!(Suggestion::builtin(id).is_some(), "missing builtin {}", id);
        }
        assert!(Suggestion::builtin("nope").is_none());
    }

    #[test]
    fn test_rule_order_is_priority() {
        let analysis = Analysis {
            emotion: Emotion::Anxious,
            intensity: 1.0,
            intent: Intent::SeekingSupport,
            urgency: Urgency::High,
            triggers: vec![Trigger::Stress],
            ..Analysis::default()
        };

        assert_eq!(
            ids(&aggregate(&analysis)),
            vec![BREATHING, PROGRESSIVE_RELAXATION, TRUSTED_CONTACT, CRISIS_HOTLINE]
        );
    }

    #[test]
    fn test_anxiety_threshold() {
        let analysis = Analysis {
            emotion: Emotion::Anxious,
            intensity: 0.5,
            ..Analysis::default()
        };
        assert!(!ids(&aggregate(&analysis)).contains(&BREATHING));
    }

    #[test]
    fn test_fallback_is_motivational() {
        assert_eq!(
            ids(&aggregate(&Analysis::default())),
            vec![REMEMBER_REASONS, FAVORITE_ACTIVITY]
        );
    }

    #[test]
    fn test_finalize_dedupes_and_caps() {
        let primary = builtins(&[GROUNDING, TRUSTED_CONTACT]);
        let aggregated = builtins(&[TRUSTED_CONTACT, URGE_SURFING, JOURNALING]);

        let result = finalize(primary, aggregated, 3);
        assert_eq!(ids(&result), vec![GROUNDING, TRUSTED_CONTACT, URGE_SURFING]);

        let result = finalize(builtins(&[GROUNDING]), builtins(&[JOURNALING]), 10);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_finalize_keeps_emergency_past_cap() {
        let aggregated = builtins(&[BREATHING, URGE_SURFING, TRUSTED_CONTACT, CRISIS_HOTLINE]);

        let result = finalize(Vec::new(), aggregated.clone(), 3);
        assert_eq!(ids(&result), vec![BREATHING, URGE_SURFING, CRISIS_HOTLINE]);

        let result = finalize(Vec::new(), aggregated, 1);
        assert_eq!(ids(&result), vec![CRISIS_HOTLINE]);
    }

    #[test]
    fn test_finalize_leaves_ranked_emergency_in_place() {
        let aggregated = builtins(&[URGE_SURFING, CRISIS_HOTLINE, GROUNDING, TRUSTED_CONTACT]);
        let result = finalize(Vec::new(), aggregated, 3);
        assert_eq!(ids(&result), vec![URGE_SURFING, CRISIS_HOTLINE, GROUNDING]);
    }
}

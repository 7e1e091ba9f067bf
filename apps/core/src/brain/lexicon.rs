//! Lexicon Tables.
//!
//! Static keyword-to-category tables for the Russian-language analyzer. Every keyword is
//! matched as a substring of the normalized (lower-cased, `ё` folded to `е`) message, so
//! stems like `"тревож"` cover all inflections.
//!
//! Within one table a keyword must never be preceded by a keyword that is a prefix of it:
//! longer phrases come first. Matching sums every occurrence of every keyword, so an
//! overlapping pair still contributes twice; the ordering only keeps the tables readable
//! and the matched-keyword lists stable.

use super::emotion::Emotion;
use super::intent::Intent;
use super::signals::{Theme, Trigger};

/// Emotion keywords. Table order is the tie-break priority.
pub const EMOTION_LEXICON: &[(Emotion, &[&str])] = &[
    (
        Emotion::Sad,
        &[
            "грустн", "грущу", "печаль", "тоскл", "тоска", "одиноко", "одиночеств", "плачу",
            "слезы", "пустот", "уныни", "депресс",
        ],
    ),
    (
        Emotion::Angry,
        &[
            "злюсь", "злость", "злит", "бесит", "раздража", "ярост", "ненавиж", "в бешенстве",
        ],
    ),
    (
        Emotion::Anxious,
        &[
            "тревож", "тревога", "волнуюсь", "беспоко", "боюсь", "страшно", "паник", "нервнича",
            "на нервах",
        ],
    ),
    (
        Emotion::Happy,
        &[
            "отличн", "замечательн", "прекрасн", "счастлив", "радуюсь", "радост", "здорово",
            "хорошее настроение", "весел",
        ],
    ),
    (
        Emotion::Frustrated,
        &[
            "надоело", "достало", "разочарова", "ничего не выходит", "ничего не получается",
            "задолбал",
        ],
    ),
    (
        Emotion::Hopeful,
        &[
            "надеюсь", "надежд", "верю", "получится", "будет лучше", "справлюсь", "новый день",
            "шанс",
        ],
    ),
];

/// Intent keywords. Table order is the tie-break priority.
pub const INTENT_LEXICON: &[(Intent, &[&str])] = &[
    (
        Intent::SeekingSupport,
        &[
            "нужна поддержка", "поддержи", "помоги", "нужна помощь", "выслушай",
            "не с кем поговорить", "поговорить", "мне нужен кто-то",
        ],
    ),
    (
        Intent::SharingProgress,
        &[
            "получилось", "удалось", "отличный день", "горжусь", "дней без", "дня без", "трезв",
            "справился", "справилась", "прогресс", "я смогла", "я смог", "держусь",
        ],
    ),
    (
        Intent::AskingAdvice,
        &[
            "как мне", "что делать", "посоветуй", "совет", "подскажи", "как справиться",
            "как быть", "как лучше",
        ],
    ),
    (
        Intent::ExpressingStruggle,
        &[
            "тяжело", "трудно", "сложно", "не справляюсь", "сорвался", "сорвалась", "тянет",
            "ломает", "плохо", "не могу",
        ],
    ),
    (
        Intent::CasualChat,
        &[
            "привет", "как дела", "доброе утро", "добрый вечер", "спасибо", "до встречи",
            "до завтра",
        ],
    ),
];

/// Self-harm and suicide phrasing. Any match resolves urgency to critical.
pub const CRITICAL_KEYWORDS: &[&str] = &[
    "покончить с собой",
    "покончить с жизнью",
    "убить себя",
    "убью себя",
    "суицид",
    "самоубийств",
    "не хочу больше жить",
    "не хочу жить",
    "лучше бы меня не было",
    "наложить на себя руки",
    "порезать себя",
    "режу себя",
    "передоз",
    "выпрыгнуть из окна",
];

/// Explicit relapse or craving-act phrasing.
pub const HIGH_KEYWORDS: &[&str] = &[
    "сорвался",
    "сорвалась",
    "срыв",
    "не могу сдержаться",
    "не могу остановиться",
    "хочется выпить",
    "хочу выпить",
    "тянет выпить",
    "хочется употребить",
    "хочу употребить",
    "хочу уколоться",
    "купил бутылку",
    "купила бутылку",
    "очень сильная тяга",
    "сильная тяга",
    "уже выпил",
];

/// General distress.
pub const MEDIUM_KEYWORDS: &[&str] = &[
    "тревож", "стресс", "плохо", "тяжело", "тяга", "тянет", "одиноко", "устал", "не спал",
    "нервы", "депресс", "паник", "грустно",
];

/// Explicit requests for help or statements of not coping.
pub const DISTRESS_PHRASES: &[&str] = &[
    "мне плохо",
    "помогите",
    "помоги",
    "нужна помощь",
    "не справляюсь",
    "очень тяжело",
    "больше не могу",
    "сил нет",
    "нет сил",
];

/// Relapse-risk trigger keywords, scanned multi-label in table order.
pub const TRIGGER_LEXICON: &[(Trigger, &[&str])] = &[
    (
        Trigger::Alcohol,
        &[
            "алкогол", "выпить", "выпивк", "выпил", "пиво", "пива", "водк", "коньяк", "бутылк",
            "бухать", "бухл", "спиртн", "запой", "бокал",
        ],
    ),
    (
        Trigger::Drugs,
        &[
            "наркот", "употребить", "употреблени", "доза", "дозу", "уколоться", "травк",
            "кокаин", "героин", "таблетк", "закладк", "мефедрон",
        ],
    ),
    (
        Trigger::Stress,
        &["стресс", "напряжени", "дедлайн", "давлени", "нервы", "на нервах", "перегруз"],
    ),
    (
        Trigger::Social,
        &[
            "вечеринк", "друзья зовут", "компани", "праздник", "корпоратив", "день рождения",
            "в гостях", "тусовк",
        ],
    ),
    (
        Trigger::Emotional,
        &[
            "одиноко", "одиночеств", "грустно", "тоска", "обида", "обидно", "чувство вины",
            "стыдно", "пустот",
        ],
    ),
    (
        Trigger::Work,
        &["на работе", "работ", "начальник", "коллег", "уволи", "зарплат", "проект"],
    ),
    (
        Trigger::Family,
        &[
            "семье", "семья", "семьи", "жена", "с женой", "мужем", "мужу", "мужа", "родител",
            "мама", "мамой", "папа", "отец", "дети", "ребенок", "развод",
        ],
    ),
];

/// Topical tags, scanned multi-label in table order.
pub const THEME_LEXICON: &[(Theme, &[&str])] = &[
    (
        Theme::Recovery,
        &[
            "трезв", "выздоровлени", "реабилитац", "группа поддержки", "анонимн", "12 шагов",
            "ремисси", "зависимост",
        ],
    ),
    (
        Theme::Relationships,
        &["отношени", "друзья", "друзей", "другом", "подруг", "партнер", "близки"],
    ),
    (
        Theme::Work,
        &["работ", "карьер", "начальник", "коллег", "учеб"],
    ),
    (
        Theme::Health,
        &[
            "здоровье", "здоровья", "бессонниц", "спать", "врач", "болит",
            "болезн", "спорт", "зарядк", "питани",
        ],
    ),
    (
        Theme::Emotions,
        &["чувств", "эмоци", "настроени", "переживани", "ощущени"],
    ),
    (
        Theme::Goals,
        &["цель", "цели", "мечт", "план", "хочу достичь", "достиж"],
    ),
    (
        Theme::Spirituality,
        &[
            "бога", "богу", "молит", "молюсь", "вера в", "духовн", "медитац", "высшая сила",
            "высшей силы", "высшей силе", "смысл жизни",
        ],
    ),
];

/// Lower-cases the text and folds `ё` into `е` so keywords can be written once.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace('ё', "е")
}

/// Counts every occurrence of every keyword and returns the keywords that fired.
pub fn scan(text: &str, keywords: &[&'static str]) -> (usize, Vec<&'static str>) {
    let mut total = 0;
    let mut matched = Vec::new();

    for keyword in keywords {
        let count = text.matches(keyword).count();
        if count > 0 {
            total += count;
            matched.push(*keyword);
        }
    }

    (total, matched)
}

/// Returns the first keyword found in the text, if any.
pub fn first_match(text: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_prefix_order(table: &str, keywords: &[&str]) {
        for (i, earlier) in keywords.iter().enumerate() {
            for later in &keywords[i + 1..] {
                assert!(
                    !later.starts_with(earlier),
                    "{}: '{}' is listed before its extension '{}'",
                    table,
                    earlier,
                    later
                );
            }
        }
    }

    #[test]
    fn test_longer_phrases_precede_their_prefixes() {
        for (emotion, keywords) in EMOTION_LEXICON {
            assert_prefix_order(emotion.label(), keywords);
        }
        for (intent, keywords) in INTENT_LEXICON {
            assert_prefix_order(intent.label(), keywords);
        }
        for (trigger, keywords) in TRIGGER_LEXICON {
            assert_prefix_order(trigger.label(), keywords);
        }
        for (theme, keywords) in THEME_LEXICON {
            assert_prefix_order(theme.label(), keywords);
        }
        assert_prefix_order("critical", CRITICAL_KEYWORDS);
        assert_prefix_order("high", HIGH_KEYWORDS);
        assert_prefix_order("medium", MEDIUM_KEYWORDS);
        assert_prefix_order("distress", DISTRESS_PHRASES);
    }

    #[test]
    fn test_keywords_are_normalized() {
        let mut tables: Vec<&[&str]> = vec![
            CRITICAL_KEYWORDS,
            HIGH_KEYWORDS,
            MEDIUM_KEYWORDS,
            DISTRESS_PHRASES,
        ];
        tables.extend(EMOTION_LEXICON.iter().map(|(_, k)| *k));
        tables.extend(INTENT_LEXICON.iter().map(|(_, k)| *k));
        tables.extend(TRIGGER_LEXICON.iter().map(|(_, k)| *k));
        tables.extend(THEME_LEXICON.iter().map(|(_, k)| *k));

        for keyword in tables.into_iter().flatten() {
            assert_eq!(normalize(keyword), *keyword, "keyword '{}' is not normalized", keyword);
        }
    }

    #[test]
    fn test_normalize_folds_yo_and_case() {
        assert_eq!(normalize("  ЕЩЁ Тяжелее  "), "еще тяжелее");
    }

    #[test]
    fn test_scan_counts_every_occurrence() {
        let (count, matched) = scan("тревожно и тревожно, паника", &["тревож", "паник", "злюсь"]);
        assert_eq!(count, 3);
        assert_eq!(matched, vec!["тревож", "паник"]);
    }

    #[test]
    fn test_first_match() {
        assert_eq!(first_match("я сорвался вчера", HIGH_KEYWORDS), Some("сорвался"));
        assert_eq!(first_match("все спокойно", HIGH_KEYWORDS), None);
    }
}

//! Response template pools.
//!
//! One pool per [`SegmentKind`]. A pool always has at least one entry, so selection never
//! fails. `{trigger}` and `{factor}` are the only placeholders.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::brain::Trigger;

/// Role of one piece of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Emergency,
    UrgentSupport,
    Support,
    Celebration,
    Advice,
    Struggle,
    Casual,
    Default,
    Supportive,
    TriggerManagement,
    RiskCheckIn,
}

impl SegmentKind {
    /// Whether the segment tells the person they are not alone
    pub fn is_supportive(&self) -> bool {
        matches!(
            self,
            SegmentKind::Emergency
                | SegmentKind::UrgentSupport
                | SegmentKind::Support
                | SegmentKind::Supportive
        )
    }
}

const EMERGENCY: &[&str] = &[
    "Мне очень важно, что ты написал об этом. Прямо сейчас позвони на телефон доверия 8-800-2000-122 (бесплатно, круглосуточно) или в скорую 112. Ты не один!",
    "Я слышу, насколько тебе тяжело. Пожалуйста, свяжись с кризисной линией 8-800-2000-122 или позвони 112 прямо сейчас. Тебе помогут!",
    "Твоя жизнь важна. Позвони на телефон доверия 8-800-2000-122 или 112, а пока оставайся рядом с кем-то из близких. Ты не один!",
];

const URGENT_SUPPORT: &[&str] = &[
    "Я вижу, что сейчас очень трудно. Давай остановимся на минуту и сделаем несколько медленных вдохов вместе.",
    "Этот момент пройдёт, даже если сейчас кажется иначе. Пожалуйста, побудь здесь и не принимай решений в спешке.",
    "Тяга бывает сильной, но она похожа на волну: поднимается и спадает. Давай переждём её вместе.",
];

const SUPPORT: &[&str] = &[
    "Я рядом и готов выслушать. Расскажи, что происходит.",
    "Спасибо, что делишься. Мне кажется, тебе сейчас важно почувствовать поддержку, и она у тебя есть.",
    "Ты не обязан справляться со всем в одиночку. Я здесь.",
];

const CELEBRATION: &[&str] = &[
    "Это отличная новость! Ты проделал большую работу 🎉",
    "Здорово! Каждый такой день приближает тебя к цели 💪",
    "Горжусь тобой! Запомни это ощущение, оно ещё пригодится 🌟",
];

const ADVICE: &[&str] = &[
    "Хороший вопрос. Возможно, стоит начать с простого: заметь, что ты чувствуешь прямо сейчас.",
    "Давай разберёмся вместе. Пожалуйста, попробуй описать ситуацию чуть подробнее.",
    "Есть несколько техник, которые могут помочь. Возможно, одна из предложенных ниже подойдёт тебе.",
];

const STRUGGLE: &[&str] = &[
    "Похоже, сейчас непросто. То, что ты говоришь об этом, уже шаг вперёд.",
    "Трудности это часть пути, а не его конец. Давай подумаем, что поможет прямо сейчас.",
    "Я слышу тебя. Мне кажется, сейчас стоит позаботиться о себе в первую очередь.",
];

const CASUAL: &[&str] = &[
    "Рад тебя слышать! Как проходит твой день?",
    "Привет! О чём хочешь поговорить?",
    "Спасибо, что заглянул. Я здесь, если захочешь поделиться.",
];

const DEFAULT: &[&str] = &[
    "Я тебя слушаю. Расскажи подробнее.",
    "Понимаю. Продолжай, пожалуйста.",
];

const SUPPORTIVE: &[&str] = &[
    "Ты не один, и твои чувства важны.",
    "Что бы ни происходило, ты заслуживаешь поддержки.",
    "Я здесь, и я на твоей стороне.",
];

const ALCOHOL: &[&str] = &[
    "Тяга к алкоголю сильна, но она пройдёт. Попробуй технику «сёрфинг на волне желания»: наблюдай за тягой, не действуя.",
    "Если хочется выпить, выпей стакан воды и смени обстановку. Через 15 минут желание ослабнет.",
];

const DRUGS: &[&str] = &[
    "Тяга к веществам пройдёт, даже если сейчас кажется иначе. Уйди из ситуации и свяжись с тем, кому доверяешь.",
    "Вспомни, ради чего ты начал этот путь. Пожалуйста, не оставайся сейчас один.",
];

const STRESS: &[&str] = &[
    "Стресс сейчас высокий. Попробуй прогрессивную мышечную релаксацию: напряги и расслабь мышцы по очереди.",
    "Когда давит стресс, помогает короткая пауза: пять медленных вдохов и выдохов.",
];

const SOCIAL: &[&str] = &[
    "Компания может подталкивать к срыву. Заранее подготовь фразу для отказа, например: «Спасибо, я не пью».",
    "Ты имеешь право уйти с любой встречи, если чувствуешь давление.",
];

const GENERIC_TRIGGER: &[&str] = &[
    "Похоже, на тебя влияет {trigger}. Давай подумаем, как снизить это влияние.",
    "Я заметил, что тема «{trigger}» для тебя сейчас важна. Что обычно помогает тебе в таких случаях?",
];

const RISK_CHECK_IN: &[&str] = &[
    "Я обратил внимание: {factor}. Как ты сейчас себя чувствуешь?",
    "Хочу уточнить, потому что вижу: {factor}. Может, стоит связаться с близким человеком сегодня?",
];

/// Template pool for a segment kind. Trigger segments use [`trigger_pool`].
pub fn pool(kind: SegmentKind) -> &'static [&'static str] {
    match kind {
        SegmentKind::Emergency => EMERGENCY,
        SegmentKind::UrgentSupport => URGENT_SUPPORT,
        SegmentKind::Support => SUPPORT,
        SegmentKind::Celebration => CELEBRATION,
        SegmentKind::Advice => ADVICE,
        SegmentKind::Struggle => STRUGGLE,
        SegmentKind::Casual => CASUAL,
        SegmentKind::Default => DEFAULT,
        SegmentKind::Supportive => SUPPORTIVE,
        SegmentKind::TriggerManagement => GENERIC_TRIGGER,
        SegmentKind::RiskCheckIn => RISK_CHECK_IN,
    }
}

/// Bespoke pool for a trigger, or the generic one naming it
pub fn trigger_pool(trigger: Trigger) -> &'static [&'static str] {
    match trigger {
        Trigger::Alcohol => ALCOHOL,
        Trigger::Drugs => DRUGS,
        Trigger::Stress => STRESS,
        Trigger::Social => SOCIAL,
        _ => GENERIC_TRIGGER,
    }
}

/// Pick one template from a pool
pub fn pick<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_KINDS: [SegmentKind; 11] = [
        SegmentKind::Emergency,
        SegmentKind::UrgentSupport,
        SegmentKind::Support,
        SegmentKind::Celebration,
        SegmentKind::Advice,
        SegmentKind::Struggle,
        SegmentKind::Casual,
        SegmentKind::Default,
        SegmentKind::Supportive,
        SegmentKind::TriggerManagement,
        SegmentKind::RiskCheckIn,
    ];

    #[test]
    fn test_every_pool_is_non_empty() {
        for kind in ALL_KINDS {
            assert!(!pool(kind).is_empty(), "{:?} has no templates", kind);
        }
    }

    #[test]
    fn test_emergency_templates_name_a_hotline() {
        assert!(EMERGENCY.iter().all(|t| t.contains("8-800-2000-122")));
    }

    #[test]
    fn test_generic_trigger_templates_have_placeholder() {
        assert!(GENERIC_TRIGGER.iter().all(|t| t.contains("{trigger}")));
        assert!(RISK_CHECK_IN.iter().all(|t| t.contains("{factor}")));
    }

    #[test]
    fn test_bespoke_trigger_pools() {
        assert_eq!(trigger_pool(Trigger::Alcohol), ALCOHOL);
        assert_eq!(trigger_pool(Trigger::Work), GENERIC_TRIGGER);
        assert_eq!(trigger_pool(Trigger::Family), GENERIC_TRIGGER);
    }

    #[test]
    fn test_pick_is_seed_deterministic() {
        let a = pick(CASUAL, &mut StdRng::seed_from_u64(7));
        let b = pick(CASUAL, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}

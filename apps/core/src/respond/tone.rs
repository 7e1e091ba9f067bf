//! Tone personalization.
//!
//! Deterministic string rewrites applied to finished response segments. No transform
//! changes meaning; they only adjust punctuation, softeners and decoration.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::CoachError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Gentle,
    Direct,
    Inspirational,
    Practical,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tone::Gentle => "gentle",
            Tone::Direct => "direct",
            Tone::Inspirational => "inspirational",
            Tone::Practical => "practical",
        };
        f.write_str(label)
    }
}

impl FromStr for Tone {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gentle" => Ok(Tone::Gentle),
            "direct" => Ok(Tone::Direct),
            "inspirational" => Ok(Tone::Inspirational),
            "practical" => Ok(Tone::Practical),
            other => Err(CoachError::Config(format!("Unknown tone: {}", other))),
        }
    }
}

static EXCLAMATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!+").expect("Invalid regex: exclamation pattern"));

static SOFTENERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Возможно|Пожалуйста|Мне кажется),\s+(\p{L})")
        .expect("Invalid regex: softener pattern")
});

static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\x{FE0F}\x{200D}]").expect("Invalid regex: emoji pattern")
});

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid regex: whitespace pattern"));

impl Tone {
    /// Rewrite one segment in this tone
    pub fn apply(&self, text: &str) -> String {
        match self {
            Tone::Gentle => EXCLAMATIONS.replace_all(text, ".").into_owned(),
            Tone::Direct => SOFTENERS
                .replace_all(text, |caps: &Captures| caps[1].to_uppercase())
                .into_owned(),
            Tone::Inspirational => match text.strip_suffix('.') {
                Some(stem) if !stem.ends_with('.') => format!("{}!", stem),
                _ => text.to_string(),
            },
            Tone::Practical => {
                let stripped = EMOJI.replace_all(text, "");
                SPACES.replace_all(stripped.trim(), " ").into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gentle_replaces_exclamations() {
        assert_eq!(Tone::Gentle.apply("Ты молодец!! Так держать!"), "Ты молодец. Так держать.");
    }

    #[test]
    fn test_direct_drops_softeners() {
        assert_eq!(
            Tone::Direct.apply("Возможно, стоит позвонить другу. Пожалуйста, подыши."),
            "Стоит позвонить другу. Подыши."
        );
    }

    #[test]
    fn test_inspirational_ends_with_exclamation() {
        assert_eq!(Tone::Inspirational.apply("Ты справишься."), "Ты справишься!");
        assert_eq!(Tone::Inspirational.apply("Подожди..."), "Подожди...");
        assert_eq!(Tone::Inspirational.apply("Вопрос?"), "Вопрос?");
    }

    #[test]
    fn test_practical_strips_emoji() {
        assert_eq!(Tone::Practical.apply("Отличный шаг 🎉  Продолжай 💪"), "Отличный шаг Продолжай");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Direct".parse::<Tone>().unwrap(), Tone::Direct);
        assert!("loud".parse::<Tone>().is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brain::Analysis;
use crate::respond::Suggestion;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Originator {
    Person,
    Engine,
}

/// Presentation category of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TurnCategory {
    #[default]
    Plain,
    Suggestion,
    Emergency,
    Celebration,
}

/// One message exchange, from either the person or the engine.
///
/// Fields are private: a turn is immutable once built and is owned by the memory of the
/// user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: Uuid,
    timestamp: DateTime<Utc>,
    originator: Originator,
    content: String,
    category: TurnCategory,
    analysis: Option<Analysis>,
    suggestions: Option<Vec<Suggestion>>,
}

impl Turn {
    /// A message written by the person, with its analysis snapshot.
    pub fn from_person(content: impl Into<String>, analysis: Analysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            originator: Originator::Person,
            content: content.into(),
            category: TurnCategory::Plain,
            analysis: Some(analysis),
            suggestions: None,
        }
    }

    /// A reply produced by the engine.
    pub fn from_engine(
        content: impl Into<String>,
        category: TurnCategory,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            originator: Originator::Engine,
            content: content.into(),
            category,
            analysis: None,
            suggestions: if suggestions.is_empty() {
                None
            } else {
                Some(suggestions)
            },
        }
    }

    /// Override the creation time, e.g. when importing history.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn originator(&self) -> Originator {
        self.originator
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> TurnCategory {
        self.category
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.as_deref().unwrap_or(&[])
    }

    /// Whether this turn feeds the emotional pattern
    pub fn is_analyzed_person_turn(&self) -> bool {
        self.originator == Originator::Person && self.analysis.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::respond::suggestions::{builtins, GROUNDING};

    #[test]
    fn test_person_turn() {
        let turn = Turn::from_person("привет", Analysis::default());
        assert_eq!(turn.originator(), Originator::Person);
        assert_eq!(turn.category(), TurnCategory::Plain);
        assert!(turn.is_analyzed_person_turn());
        assert!(turn.suggestions().is_empty());
    }

    #[test]
    fn test_engine_turn() {
        let turn = Turn::from_engine("ответ", TurnCategory::Suggestion, builtins(&[GROUNDING]));
        assert_eq!(turn.originator(), Originator::Engine);
        assert!(!turn.is_analyzed_person_turn());
        assert_eq!(turn.suggestions().len(), 1);

        let empty = Turn::from_engine("ответ", TurnCategory::Plain, vec![]);
        assert!(empty.suggestions().is_empty());
    }

    #[test]
    fn test_serde_round_trip_preserves_identity() {
        let turn = Turn::from_person("тест", Analysis::default());
        let json = serde_json::to_string(&turn).unwrap();
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }
}

//! Content recommendations.
//!
//! Tag rules fire from the numeric context, the risk profile and the emotional pattern.
//! Every catalog item carrying a fired tag is recommended, with the reasons that matched.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

use crate::memory::{EmotionalPattern, Trend};
use crate::risk::{RiskContext, RiskLevel, RiskScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Technique,
    Exercise,
    Article,
    Sound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One piece of content the host application can show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub tags: Vec<String>,
}

impl CatalogItem {
    pub fn new(id: &str, kind: ContentKind, title: &str, tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn has_any_tag(&self, tags: &[&str]) -> bool {
        self.tags.iter().any(|t| tags.contains(&t.as_str()))
    }
}

/// Source of recommendable content, owned by the host application
pub trait ContentCatalog: Send + Sync {
    fn items(&self) -> &[CatalogItem];
}

/// Catalog backed by a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Small starter catalog covering every rule tag
    pub fn builtin() -> Self {
        use ContentKind::*;
        Self::new(vec![
            CatalogItem::new("urge_surfing", Technique, "Сёрфинг на волне желания", &["craving", "crisis", "beginner"]),
            CatalogItem::new("breathing_4_7_8", Exercise, "Дыхание 4-7-8", &["stress", "relaxation", "beginner"]),
            CatalogItem::new("progressive_relaxation", Exercise, "Прогрессивная релаксация", &["relaxation", "sleep"]),
            CatalogItem::new("gratitude_journal", Technique, "Дневник благодарности", &["mood", "maintenance"]),
            CatalogItem::new("relapse_stages", Article, "Стадии срыва и как их заметить", &["education", "crisis"]),
            CatalogItem::new("sleep_hygiene", Article, "Гигиена сна в восстановлении", &["education", "sleep"]),
            CatalogItem::new("rain_sounds", Sound, "Шум дождя", &["sleep", "relaxation"]),
            CatalogItem::new("relapse_prevention_plan", Technique, "План профилактики срыва", &["maintenance"]),
        ])
    }
}

impl ContentCatalog for StaticCatalog {
    fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub catalog_id: String,
    pub kind: ContentKind,
    pub priority: Priority,
    pub score: f32,
    pub reasons: Vec<String>,
}

struct TagRule {
    tags: &'static [&'static str],
    priority: Priority,
    weight: f32,
    reason: String,
}

fn is_night(hour: u8) -> bool {
    hour >= 22 || hour <= 5
}

#[derive(Debug, Clone)]
pub struct Recommender {
    scorer: RiskScorer,
    limit: usize,
}

impl Recommender {
    pub const DEFAULT_LIMIT: usize = 5;

    pub fn new(scorer: RiskScorer, limit: usize) -> Self {
        Self {
            scorer,
            limit: limit.max(1),
        }
    }

    fn rules(&self, context: &RiskContext, pattern: &EmotionalPattern) -> Vec<TagRule> {
        let numeric = context.numeric.normalized();
        let risk = self.scorer.score(context, pattern);
        let mut rules = Vec::new();

        if risk.level == RiskLevel::High || numeric.craving_level >= 4.0 {
            rules.push(TagRule {
                tags: &["crisis", "craving"],
                priority: Priority::High,
                weight: 3.0,
                reason: if risk.level == RiskLevel::High {
                    "Высокий риск срыва".to_string()
                } else {
                    format!("Сильная тяга ({}/5)", numeric.craving_level)
                },
            });
        }
        if numeric.stress_level >= 4.0 {
            rules.push(TagRule {
                tags: &["stress", "relaxation"],
                priority: Priority::High,
                weight: 2.0,
                reason: format!("Высокий стресс ({}/5)", numeric.stress_level),
            });
        }
        if numeric.mood <= 2.0 || pattern.trend == Trend::Declining {
            rules.push(TagRule {
                tags: &["mood"],
                priority: Priority::Medium,
                weight: 2.0,
                reason: "Поддержка настроения".to_string(),
            });
        }
        if is_night(numeric.time_of_day) {
            rules.push(TagRule {
                tags: &["sleep"],
                priority: Priority::Medium,
                weight: 1.0,
                reason: "Вечернее время, помощь со сном".to_string(),
            });
        }
        if context.read_articles.unwrap_or_default() < 3 {
            rules.push(TagRule {
                tags: &["education"],
                priority: Priority::Low,
                weight: 1.0,
                reason: "Полезно узнать больше о восстановлении".to_string(),
            });
        }
        if context.completed_techniques.unwrap_or_default() < 3 {
            rules.push(TagRule {
                tags: &["beginner"],
                priority: Priority::Medium,
                weight: 1.0,
                reason: "Простые техники для начала".to_string(),
            });
        } else {
            rules.push(TagRule {
                tags: &["maintenance"],
                priority: Priority::Low,
                weight: 1.0,
                reason: "Поддержание достигнутого".to_string(),
            });
        }

        rules
    }

    /// Ranked recommendations: priority first, then score, then catalog order.
    pub fn recommend(
        &self,
        context: &RiskContext,
        pattern: &EmotionalPattern,
        catalog: &dyn ContentCatalog,
    ) -> Vec<Recommendation> {
        let rules = self.rules(context, pattern);

        let mut recommendations: Vec<Recommendation> = catalog
            .items()
            .iter()
            .filter_map(|item| {
                let matched: Vec<&TagRule> =
                    rules.iter().filter(|rule| item.has_any_tag(rule.tags)).collect();
                let priority = matched.iter().map(|rule| rule.priority).max()?;
                Some(Recommendation {
                    catalog_id: item.id.clone(),
                    kind: item.kind,
                    priority,
                    score: matched.iter().map(|rule| rule.weight).sum(),
                    reasons: matched.iter().map(|rule| rule.reason.clone()).collect(),
                })
            })
            .collect();

        // stable: equal keys keep catalog order
        recommendations.sort_by(|a, b| {
            Reverse(a.priority)
                .cmp(&Reverse(b.priority))
                .then(b.score.total_cmp(&a.score))
        });
        recommendations.truncate(self.limit);

        debug!(
            rules = rules.len(),
            recommendations = recommendations.len(),
            "Recommendations generated"
        );
        recommendations
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(RiskScorer::default(), Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::NumericContext;

    fn ids(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations.iter().map(|r| r.catalog_id.as_str()).collect()
    }

    fn settled() -> RiskContext {
        RiskContext::new(NumericContext::default().with_time_of_day(14))
            .with_sober_days(120)
            .with_completed_techniques(12)
            .with_read_articles(10)
    }

    #[test]
    fn test_settled_user_gets_maintenance_only() {
        let recs = Recommender::default().recommend(
            &settled(),
            &EmotionalPattern::default(),
            &StaticCatalog::builtin(),
        );
        assert_eq!(ids(&recs), vec!["gratitude_journal", "relapse_prevention_plan"]);
        assert!(recs.iter().all(|r| r.priority == Priority::Low));
    }

    #[test]
    fn test_craving_ranks_crisis_content_first() {
        let mut context = settled();
        context.numeric = context.numeric.with_craving(5.0);
        let recs = Recommender::default().recommend(
            &context,
            &EmotionalPattern::default(),
            &StaticCatalog::builtin(),
        );

        assert_eq!(recs[0].catalog_id, "urge_surfing");
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].catalog_id, "relapse_stages");
        assert!(!recs[0].reasons.is_empty());
    }

    #[test]
    fn test_night_adds_sleep_content() {
        let mut context = settled();
        context.numeric = context.numeric.with_time_of_day(23);
        let recs = Recommender::default().recommend(
            &context,
            &EmotionalPattern::default(),
            &StaticCatalog::builtin(),
        );
        let found = ids(&recs);
        assert!(found.contains(&"rain_sounds"));
        assert!(found.contains(&"sleep_hygiene"));
    }

    #[test]
    fn test_declining_trend_adds_mood_content() {
        let pattern = EmotionalPattern {
            trend: Trend::Declining,
            ..EmotionalPattern::default()
        };
        let recs = Recommender::default().recommend(&settled(), &pattern, &StaticCatalog::builtin());
        assert_eq!(recs[0].catalog_id, "gratitude_journal");
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(recs[0].reasons.len(), 2);
    }

    #[test]
    fn test_limit_and_empty_catalog() {
        let context = RiskContext::new(
            NumericContext::default()
                .with_craving(5.0)
                .with_stress(5.0)
                .with_mood(1.0)
                .with_time_of_day(2),
        );
        let recs = Recommender::new(RiskScorer::default(), 2).recommend(
            &context,
            &EmotionalPattern::default(),
            &StaticCatalog::builtin(),
        );
        assert_eq!(recs.len(), 2);

        let none = Recommender::default().recommend(
            &context,
            &EmotionalPattern::default(),
            &StaticCatalog::default(),
        );
        assert!(none.is_empty());
    }
}

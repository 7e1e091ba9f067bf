//! Engine facade.
//!
//! Wires the analyzer, memory store, risk scorer, resolver and recommender together. All
//! methods take `&self`; the engine is `Send + Sync` and meant to be shared behind an
//! `Arc`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

use crate::brain::{Analysis, MessageAnalyzer, NumericContext};
use crate::config::CoachConfig;
use crate::memory::{EmotionalPattern, InMemoryStore, MemoryStore, Turn};
use crate::models::UserId;
use crate::recommend::{ContentCatalog, Recommendation, Recommender};
use crate::respond::{CoachResponse, ResponseResolver, Tone};
use crate::risk::{RiskContext, RiskProfile, RiskScorer};

/// Everything produced for one incoming message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachReply {
    pub user_id: UserId,
    pub analysis: Analysis,
    pub pattern: EmotionalPattern,
    pub risk: RiskProfile,
    pub response: CoachResponse,
}

impl CoachReply {
    pub fn text(&self) -> String {
        self.response.text()
    }
}

pub struct CoachEngine {
    analyzer: MessageAnalyzer,
    store: Arc<dyn MemoryStore>,
    scorer: RiskScorer,
    resolver: ResponseResolver,
    recommender: Recommender,
    rng: Mutex<StdRng>,
    default_tone: Tone,
}

impl CoachEngine {
    /// Engine backed by an [`InMemoryStore`] sized from the config
    pub fn new(config: &CoachConfig) -> Self {
        let store = InMemoryStore::with_max_users(config.memory_limits(), config.max_users());
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: &CoachConfig, store: Arc<dyn MemoryStore>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scorer = RiskScorer::new(config.risk.clone());

        Self {
            analyzer: MessageAnalyzer::new(),
            store,
            recommender: Recommender::new(scorer.clone(), config.recommendation_limit),
            scorer,
            resolver: ResponseResolver::new(config.suggestion_limit),
            rng: Mutex::new(rng),
            default_tone: config.default_tone,
        }
    }

    pub fn store(&self) -> &Arc<dyn MemoryStore> {
        &self.store
    }

    pub fn analyze_message(&self, text: &str, context: Option<&NumericContext>) -> Analysis {
        self.analyzer.analyze(text, context)
    }

    /// Append a turn to the user's memory and return the refreshed pattern
    pub fn record_turn(&self, user_id: &UserId, turn: Turn) -> EmotionalPattern {
        self.store.record(user_id, turn)
    }

    pub fn emotional_pattern(&self, user_id: &UserId) -> EmotionalPattern {
        self.store.pattern(user_id)
    }

    pub fn score_risk(&self, context: &RiskContext, pattern: &EmotionalPattern) -> RiskProfile {
        self.scorer.score(context, pattern)
    }

    /// Build a response in the user's preferred tone. Does not touch memory.
    pub fn generate_response(
        &self,
        user_id: &UserId,
        analysis: &Analysis,
        risk: &RiskProfile,
    ) -> CoachResponse {
        let tone = self.tone(user_id);
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.resolver.respond(analysis, risk, tone, &mut *rng)
    }

    pub fn generate_recommendations(
        &self,
        context: &RiskContext,
        pattern: &EmotionalPattern,
        catalog: &dyn ContentCatalog,
    ) -> Vec<Recommendation> {
        self.recommender.recommend(context, pattern, catalog)
    }

    /// Full pipeline for one message. Records the person turn before scoring, so the
    /// pattern used for risk already includes this message, then records the reply.
    #[instrument(skip_all, fields(user = %user_id))]
    pub fn handle_message(&self, user_id: &UserId, text: &str, context: &RiskContext) -> CoachReply {
        let analysis = self.analyze_message(text, Some(&context.numeric));
        let pattern = self.record_turn(user_id, Turn::from_person(text, analysis.clone()));
        let risk = self.score_risk(context, &pattern);
        let response = self.generate_response(user_id, &analysis, &risk);

        self.record_turn(
            user_id,
            Turn::from_engine(response.text(), response.category(), response.suggestions.clone()),
        );

        info!(
            urgency = %analysis.urgency,
            intent = %analysis.intent,
            risk = %risk.level,
            trend = %pattern.trend,
            suggestions = response.suggestions.len(),
            "Message handled"
        );

        CoachReply {
            user_id: user_id.clone(),
            analysis,
            pattern,
            risk,
            response,
        }
    }

    pub fn tone(&self, user_id: &UserId) -> Tone {
        self.store.tone(user_id).unwrap_or(self.default_tone)
    }

    pub fn set_tone(&self, user_id: &UserId, tone: Tone) {
        self.store.set_tone(user_id, tone);
    }

    pub fn history(&self, user_id: &UserId) -> Vec<Turn> {
        self.store.history(user_id)
    }
}

impl Default for CoachEngine {
    fn default() -> Self {
        Self::new(&CoachConfig::default())
    }
}

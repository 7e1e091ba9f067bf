use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, instrument, warn};

use crate::actors::messages::CoachMessage;
use crate::config::CoachConfig;
use crate::engine::{CoachEngine, CoachReply};
use crate::error::CoachError;
use crate::memory::{EmotionalPattern, JsonFileHooks, MemoryHooks, NoopHooks, Turn};
use crate::models::UserId;
use crate::recommend::{ContentCatalog, Recommendation, StaticCatalog};
use crate::respond::Tone;
use crate::risk::RiskContext;

/// A handle to the coach actor.
///
/// The actor owns the only path to the persistence hooks and processes requests one at
/// a time, so messages from one user are handled strictly in arrival order.
#[derive(Clone)]
pub struct CoachHandle {
    sender: mpsc::Sender<CoachMessage>,
    request_timeout: Duration,
}

impl CoachHandle {
    /// Spawns the actor with hooks and catalog chosen from the config.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_config(config: &CoachConfig) -> Self {
        let engine = Arc::new(CoachEngine::new(config));
        let catalog = Arc::new(StaticCatalog::builtin());
        match &config.storage_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Persisting conversation memory");
                Self::new(engine, JsonFileHooks::new(dir.clone()), catalog, config.request_timeout())
            }
            None => Self::new(engine, NoopHooks, catalog, config.request_timeout()),
        }
    }

    pub fn new<H: MemoryHooks>(
        engine: Arc<CoachEngine>,
        hooks: H,
        catalog: Arc<dyn ContentCatalog>,
        request_timeout: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = CoachRunner::new(receiver, engine, Arc::new(hooks), catalog);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            request_timeout,
        }
    }

    async fn request<T>(
        &self,
        msg: CoachMessage,
        recv: oneshot::Receiver<Result<T, CoachError>>,
    ) -> Result<T, CoachError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| CoachError::Actor(e.to_string()))?;
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|e| CoachError::Actor(e.to_string()))?
    }

    #[instrument(skip(self, text, context))]
    pub async fn handle_message(
        &self,
        user_id: UserId,
        text: String,
        context: RiskContext,
    ) -> Result<CoachReply, CoachError> {
        let (send, recv) = oneshot::channel();
        let msg = CoachMessage::HandleMessage {
            user_id,
            text,
            context,
            responder: send,
        };
        self.request(msg, recv).await
    }

    pub async fn recommend(
        &self,
        user_id: UserId,
        context: RiskContext,
    ) -> Result<Vec<Recommendation>, CoachError> {
        let (send, recv) = oneshot::channel();
        let msg = CoachMessage::Recommend {
            user_id,
            context,
            responder: send,
        };
        self.request(msg, recv).await
    }

    pub async fn set_tone(&self, user_id: UserId, tone: Tone) -> Result<(), CoachError> {
        let (send, recv) = oneshot::channel();
        let msg = CoachMessage::SetTone {
            user_id,
            tone,
            responder: send,
        };
        self.request(msg, recv).await
    }

    pub async fn history(&self, user_id: UserId) -> Result<Vec<Turn>, CoachError> {
        let (send, recv) = oneshot::channel();
        self.request(CoachMessage::History { user_id, responder: send }, recv)
            .await
    }

    pub async fn pattern(&self, user_id: UserId) -> Result<EmotionalPattern, CoachError> {
        let (send, recv) = oneshot::channel();
        self.request(CoachMessage::Pattern { user_id, responder: send }, recv)
            .await
    }

    pub async fn shutdown(&self) -> Result<(), CoachError> {
        self.sender
            .send(CoachMessage::Shutdown)
            .await
            .map_err(|e| CoachError::Actor(e.to_string()))
    }
}

// --- Actor Runner ---
struct CoachRunner<H>
where
    H: MemoryHooks,
{
    receiver: mpsc::Receiver<CoachMessage>,
    engine: Arc<CoachEngine>,
    hooks: Arc<H>,
    catalog: Arc<dyn ContentCatalog>,
}

impl<H> CoachRunner<H>
where
    H: MemoryHooks,
{
    fn new(
        receiver: mpsc::Receiver<CoachMessage>,
        engine: Arc<CoachEngine>,
        hooks: Arc<H>,
        catalog: Arc<dyn ContentCatalog>,
    ) -> Self {
        Self {
            receiver,
            engine,
            hooks,
            catalog,
        }
    }

    async fn run(mut self) {
        info!("Coach actor started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, CoachMessage::Shutdown) {
                info!("Coach actor shutting down...");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Coach actor stopped");
    }

    async fn handle_message(&mut self, msg: CoachMessage) {
        match msg {
            CoachMessage::HandleMessage {
                user_id,
                text,
                context,
                responder,
            } => {
                self.ensure_loaded(&user_id).await;
                let reply = self.engine.handle_message(&user_id, &text, &context);
                let _ = responder.send(Ok(reply));
                self.persist(&user_id).await;
            }
            CoachMessage::Recommend {
                user_id,
                context,
                responder,
            } => {
                self.ensure_loaded(&user_id).await;
                let pattern = self.engine.emotional_pattern(&user_id);
                let recommendations =
                    self.engine
                        .generate_recommendations(&context, &pattern, self.catalog.as_ref());
                let _ = responder.send(Ok(recommendations));
            }
            CoachMessage::SetTone {
                user_id,
                tone,
                responder,
            } => {
                self.ensure_loaded(&user_id).await;
                self.engine.set_tone(&user_id, tone);
                let _ = responder.send(Ok(()));
                self.persist(&user_id).await;
            }
            CoachMessage::History { user_id, responder } => {
                self.ensure_loaded(&user_id).await;
                let _ = responder.send(Ok(self.engine.history(&user_id)));
            }
            CoachMessage::Pattern { user_id, responder } => {
                self.ensure_loaded(&user_id).await;
                let _ = responder.send(Ok(self.engine.emotional_pattern(&user_id)));
            }
            CoachMessage::Shutdown => {}
        }
    }

    /// Reload a user that is not resident. Failures leave the user with empty memory.
    async fn ensure_loaded(&self, user_id: &UserId) {
        let store = self.engine.store();
        if store.is_resident(user_id) {
            return;
        }
        match self.hooks.load(user_id).await {
            Ok(Some(snapshot)) => {
                debug!(user = %user_id, turns = snapshot.turns.len(), "Restoring memory");
                store.restore(user_id, snapshot);
            }
            Ok(None) => {}
            Err(e) => warn!(user = %user_id, error = %e, "Failed to load memory, starting empty"),
        }
    }

    async fn persist(&self, user_id: &UserId) {
        let snapshot = self.engine.store().snapshot(user_id);
        if let Err(e) = self.hooks.save(user_id, &snapshot).await {
            warn!(user = %user_id, error = %e, "Failed to save memory");
        }
    }
}

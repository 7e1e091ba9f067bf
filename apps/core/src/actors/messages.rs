use tokio::sync::oneshot;

use crate::engine::CoachReply;
use crate::error::CoachError;
use crate::memory::{EmotionalPattern, Turn};
use crate::models::UserId;
use crate::recommend::Recommendation;
use crate::respond::Tone;
use crate::risk::RiskContext;

/// Messages that can be sent to the coach actor.
#[derive(Debug)]
pub enum CoachMessage {
    /// Run the full pipeline for one incoming message.
    HandleMessage {
        user_id: UserId,
        text: String,
        context: RiskContext,
        /// A channel to send the reply back.
        responder: oneshot::Sender<Result<CoachReply, CoachError>>,
    },
    /// Rank catalog content for the user's current state.
    Recommend {
        user_id: UserId,
        context: RiskContext,
        responder: oneshot::Sender<Result<Vec<Recommendation>, CoachError>>,
    },
    /// Store a tone preference for the user.
    SetTone {
        user_id: UserId,
        tone: Tone,
        responder: oneshot::Sender<Result<(), CoachError>>,
    },
    /// Read the user's retained turns, oldest first.
    History {
        user_id: UserId,
        responder: oneshot::Sender<Result<Vec<Turn>, CoachError>>,
    },
    /// Read the user's current emotional pattern.
    Pattern {
        user_id: UserId,
        responder: oneshot::Sender<Result<EmotionalPattern, CoachError>>,
    },
    /// Stop the actor after the messages already queued.
    Shutdown,
}

//! Recovery Coach core: conversational context and recommendation engine.
//!
//! Messages are analyzed lexically, remembered per user, scored for relapse risk and
//! answered with templated segments plus a short list of suggested actions. Everything is
//! deterministic for a fixed RNG seed.

pub mod actors;
pub mod brain;
pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
pub mod models;
pub mod recommend;
pub mod respond;
pub mod risk;
pub mod telemetry;

pub use actors::coach::CoachHandle;
pub use config::CoachConfig;
pub use engine::{CoachEngine, CoachReply};
pub use error::CoachError;
pub use models::UserId;

#[cfg(test)]
mod tests;

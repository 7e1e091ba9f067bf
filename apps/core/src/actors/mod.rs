//! # Actors Module
//!
//! The tokio front door of the engine.
//!
//! ## Components
//! - `coach`: `CoachHandle` and the runner that owns the persistence hooks
//! - `messages`: request enum with oneshot responders

pub mod coach;
pub mod messages;

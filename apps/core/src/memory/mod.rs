//! # Memory Module
//!
//! Per-user conversation history and the emotional pattern derived from it.
//!
//! ## Components
//! - `turn`: immutable message record
//! - `pattern`: average mood, trend and dominant emotions over a recent window
//! - `store`: bounded per-user ring buffers behind the [`MemoryStore`] trait
//! - `hooks`: async load/save seam used by the coach actor

pub mod hooks;
pub mod pattern;
pub mod store;
pub mod turn;

pub use hooks::{JsonFileHooks, MemoryHooks, NoopHooks};
pub use pattern::{EmotionalPattern, Trend};
pub use store::{InMemoryStore, MemoryLimits, MemorySnapshot, MemoryStore, UserMemory};
pub use turn::{Originator, Turn, TurnCategory};

//! Test Module
//!
//! Cross-module test suite for the recovery coach core.
//!
//! ## Test Categories
//! - `brain_tests`: analyzer scenarios, urgency dominance, determinism
//! - `memory_tests`: bounded history, trend computation, concurrent users
//! - `risk_tests`: scoring scenarios and tunable weights
//! - `respond_tests`: suggestion cap, emergency guarantee, supportive segments
//! - `engine_tests`: full pipeline through the engine facade and config
//! - `actor_tests`: coach actor, persistence hooks, timeouts

pub mod brain_tests;

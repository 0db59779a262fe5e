//! # Repcoach-Agents
//!
//! Coaching text generation on top of exercise metrics.
//!
//! ## Flow
//!
//! ```text
//! MetricsSnapshot
//!     ↓
//! [Advisor]  credential check → cooldown gate → prompt + style
//!     ↓
//! [CoachBackend]  LLM or offline heuristic
//!     ↓
//! Advisory::Update(text) | Advisory::NoUpdate
//! ```
//!
//! The cooldown gate reads an injected [`Clock`], so tests advance time by
//! hand instead of sleeping.

pub mod advisor;
pub mod agent;
pub mod backend;
pub mod clock;
pub mod prompts;

pub use advisor::*;
pub use agent::*;
pub use backend::*;
pub use clock::*;
pub use prompts::*;

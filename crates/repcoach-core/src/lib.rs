//! # Repcoach-Core
//!
//! Core types and utilities for the Rep Coach exercise tracker: the pose
//! landmark vocabulary, per-frame joint sets, planar angle geometry and the
//! shared error type.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;

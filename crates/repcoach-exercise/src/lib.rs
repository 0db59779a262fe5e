//! # Repcoach-Exercise
//!
//! Rep counting and form evaluation for a fixed set of exercises.
//!
//! ## Model
//!
//! Every exercise is a small Mealy machine. The only state carried between
//! frames is the current [`Stage`]; each frame's angles, together with that
//! stage, decide the next stage and whether a repetition completed.
//!
//! ```text
//! joint set
//!     ↓
//! [angle extraction]   shoulder–elbow–wrist, hip–shoulder–wrist, ...
//!     ↓
//! [transition rule]    rest edge → stage = rest
//!                      completion edge & stage == rest → stage = done, reps + 1
//!     ↓
//! [form checks]        level-triggered warnings for this frame only
//!     ↓
//! MetricsSnapshot
//! ```
//!
//! A repetition requires visiting the rest stage before the completion edge
//! can fire again, so lingering near the completion threshold counts once.

pub mod bicep_curl;
pub mod exercise;
pub mod front_raise;
pub mod metrics;
pub mod neck_rotation;
pub mod push_up;
pub mod shoulder_press;
pub mod shoulder_rotation;
pub mod side;
pub mod stage;
pub mod state;
pub mod thresholds;

pub use bicep_curl::*;
pub use exercise::*;
pub use front_raise::*;
pub use metrics::*;
pub use neck_rotation::*;
pub use push_up::*;
pub use shoulder_press::*;
pub use shoulder_rotation::*;
pub use side::*;
pub use stage::*;
pub use state::*;
pub use thresholds::*;

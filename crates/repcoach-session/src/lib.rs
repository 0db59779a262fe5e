//! # Repcoach-Session
//!
//! Ties a frame source, the active exercise and the coaching advisor
//! together.
//!
//! ```text
//! FrameSource ──► SessionContext.process ──► Presenter
//!                       │        ▲
//!          dispatch_advisory     │ drain_advisories
//!                       ▼        │
//!                 tokio task ──► mpsc
//! ```

pub mod config;
pub mod presenter;
pub mod runner;
pub mod session;
pub mod source;

pub use config::*;
pub use presenter::*;
pub use runner::*;
pub use session::*;
pub use source::*;

//! Coaching backends.

use async_trait::async_trait;
use repcoach_exercise::MetricsSnapshot;
use serde::{Deserialize, Serialize};

use crate::agent::{AgentError, AgentResult, CoachingStyle};

/// Everything a backend needs to produce one coaching message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachRequest {
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub prompt: String,
    pub style: CoachingStyle,
    pub snapshot: MetricsSnapshot,
    pub history: Vec<String>,
}

/// Base trait for coaching text generators
#[async_trait]
pub trait CoachBackend: Send + Sync {
    /// Backend name/identifier
    fn name(&self) -> &str;

    /// Generate one coaching message
    async fn generate(&self, request: &CoachRequest) -> AgentResult<String>;

    /// Optional: validate the request before generating
    fn validate_request(&self, request: &CoachRequest) -> AgentResult<()> {
        if request.prompt.trim().is_empty() {
            Err(AgentError::InvalidInput("Empty prompt".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Offline coach that builds cues from the metrics alone.
///
/// Follows the same priorities the prompt asks a model for: form warnings
/// first, then rep progress, then angle commentary.
#[derive(Debug, Clone)]
pub struct HeuristicBackend {
    name: String,
}

impl HeuristicBackend {
    pub fn new() -> Self {
        Self {
            name: "Heuristic".to_string(),
        }
    }

    fn correction(style: CoachingStyle, warning: &str) -> String {
        match style {
            CoachingStyle::Motivational => format!("Quick fix and keep the energy up: {warning}"),
            CoachingStyle::Technical => format!("Form check: {warning}"),
            CoachingStyle::Supportive => format!("You're doing well, just remember: {warning}"),
            CoachingStyle::DrillSergeant => format!("Fix it now! {warning}"),
        }
    }

    fn progress(style: CoachingStyle, snapshot: &MetricsSnapshot) -> String {
        let reps = snapshot.reps;
        let name = snapshot.name();
        match style {
            CoachingStyle::Motivational => format!("{reps} {name} reps and counting, let's go!"),
            CoachingStyle::Technical => format!("{reps} {name} reps logged, keep the tempo controlled."),
            CoachingStyle::Supportive => format!("Great work, {reps} reps done. You've got this!"),
            CoachingStyle::DrillSergeant => format!("{reps} reps? Give me another one!"),
        }
    }

    fn commentary(style: CoachingStyle, snapshot: &MetricsSnapshot) -> String {
        let Some(primary) = snapshot.angles.iter().next() else {
            return format!("Get into position for your {}.", snapshot.name());
        };
        let degrees = primary.value as i64;
        match style {
            CoachingStyle::Technical => {
                format!("{} at {degrees} degrees, move through the full range.", primary.label)
            }
            CoachingStyle::DrillSergeant => format!("{} at {degrees}? Move with purpose!", primary.label),
            _ => format!("Nice and steady, {} at {degrees} degrees.", primary.label),
        }
    }
}

impl Default for HeuristicBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoachBackend for HeuristicBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &CoachRequest) -> AgentResult<String> {
        self.validate_request(request)?;

        let snapshot = &request.snapshot;
        let message = if let Some(warning) = snapshot.primary_warning() {
            Self::correction(request.style, warning)
        } else if snapshot.reps > 0 {
            Self::progress(request.style, snapshot)
        } else {
            Self::commentary(request.style, snapshot)
        };

        if request.history.iter().any(|previous| previous == &message) {
            return Ok(format!("{message} Stay focused."));
        }

        Ok(message)
    }
}

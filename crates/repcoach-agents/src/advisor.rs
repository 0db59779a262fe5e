//! Rate-limited coaching advisor.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use repcoach_core::Timestamp;
use repcoach_exercise::MetricsSnapshot;

use crate::agent::{truncate_words, AdvisorConfig, AgentError, CoachingStyle};
use crate::backend::{CoachBackend, CoachRequest};
use crate::clock::Clock;
use crate::prompts::{format_coach_input, COACH_SYSTEM_PROMPT};

pub const UNCONFIGURED_MESSAGE: &str =
    "Please configure a coach API key (REPCOACH__ADVISOR__API_KEY or GEMINI_API_KEY) to enable the AI Coach.";

/// Outcome of one advisory attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// New text to display
    Update(String),
    /// Keep showing the previous text
    NoUpdate,
}

impl Advisory {
    pub fn text(&self) -> Option<&str> {
        match self {
            Advisory::Update(text) => Some(text),
            Advisory::NoUpdate => None,
        }
    }
}

/// Result of the synchronous admission check
#[derive(Debug, Clone)]
pub enum Admission {
    /// No credential; show the configuration message
    Unconfigured,
    /// Cooldown has not elapsed since the last accepted request
    CoolingDown,
    /// Request accepted and the cooldown slot reserved
    Accepted(Box<CoachRequest>),
}

#[derive(Debug, Default)]
struct Gate {
    last_accepted: Option<Timestamp>,
    accepted: usize,
}

/// Coaching advisor: credential check, cooldown gate, prompt assembly and
/// backend invocation.
pub struct Advisor {
    config: AdvisorConfig,
    backend: Arc<dyn CoachBackend>,
    clock: Arc<dyn Clock>,
    gate: Mutex<Gate>,
    history: Mutex<VecDeque<String>>,
}

impl Advisor {
    pub fn new(config: AdvisorConfig, backend: Arc<dyn CoachBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            backend,
            clock,
            gate: Mutex::new(Gate::default()),
            history: Mutex::new(VecDeque::new()),
        }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.credential().is_some()
    }

    /// Previously delivered messages, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.lock().iter().cloned().collect()
    }

    /// Decide whether a request may go out now and, if so, build it.
    ///
    /// Never blocks; an accepted admission reserves the cooldown slot
    /// immediately so a slow backend call cannot be doubled up.
    pub fn admit(&self, snapshot: &MetricsSnapshot) -> Admission {
        let Some(api_key) = self.config.credential() else {
            return Admission::Unconfigured;
        };

        let now = self.clock.now();
        let style = {
            let mut gate = self.gate.lock();
            if let Some(last) = gate.last_accepted {
                let elapsed = now.secs_since(last);
                if elapsed < self.config.cooldown_secs {
                    tracing::debug!(elapsed, cooldown = self.config.cooldown_secs, "advisor cooling down");
                    return Admission::CoolingDown;
                }
            }
            let style = CoachingStyle::rotation(gate.accepted);
            gate.last_accepted = Some(now);
            gate.accepted += 1;
            style
        };

        let history = self.history();
        let prompt = format_coach_input(snapshot, style, &history);

        Admission::Accepted(Box::new(CoachRequest {
            api_key: api_key.to_string(),
            model: self.config.model.clone(),
            system_prompt: COACH_SYSTEM_PROMPT.to_string(),
            prompt,
            style,
            snapshot: snapshot.clone(),
            history,
        }))
    }

    /// Run an admitted request against the backend.
    ///
    /// Failures come back as user-visible text, never as errors.
    pub async fn complete(&self, request: &CoachRequest) -> Advisory {
        let timeout = Duration::from_millis(self.config.timeout_ms);
        let result = match tokio::time::timeout(timeout, self.backend.generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout(self.config.timeout_ms)),
        };

        match result {
            Ok(text) => {
                let text = truncate_words(&text, self.config.max_words);
                self.remember(text.clone());
                tracing::debug!(backend = self.backend.name(), %text, "coach feedback");
                Advisory::Update(text)
            }
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), "coach request failed: {}", e);
                Advisory::Update(format!("Error connecting to Coach: {e}"))
            }
        }
    }

    /// Admission and completion in one call
    pub async fn get_feedback(&self, snapshot: &MetricsSnapshot) -> Advisory {
        match self.admit(snapshot) {
            Admission::Unconfigured => Advisory::Update(UNCONFIGURED_MESSAGE.to_string()),
            Admission::CoolingDown => Advisory::NoUpdate,
            Admission::Accepted(request) => self.complete(&request).await,
        }
    }

    fn remember(&self, text: String) {
        let mut history = self.history.lock();
        history.push_back(text);
        while history.len() > self.config.history_len {
            history.pop_front();
        }
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("backend", &self.backend.name())
            .field("configured", &self.is_configured())
            .field("cooldown_secs", &self.config.cooldown_secs)
            .finish()
    }
}

//! Common types for coaching agents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Agent error types
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("LLM inference error: {0}")]
    LlmError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

/// Advisor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Credential for the hosted model; the advisor is disabled without one
    pub api_key: Option<String>,
    /// Model to use
    pub model: String,
    /// Minimum seconds between accepted requests
    pub cooldown_secs: f64,
    /// Number of previous messages included in the prompt
    pub history_len: usize,
    /// Maximum words kept from a generated message
    pub max_words: usize,
    /// Backend timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            cooldown_secs: 8.0,
            history_len: 3,
            max_words: 20,
            timeout_ms: 10_000,
        }
    }
}

impl AdvisorConfig {
    /// Credential, ignoring blank values
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Persona the coach speaks in; rotated across requests to vary the tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoachingStyle {
    Motivational,
    Technical,
    Supportive,
    DrillSergeant,
}

impl CoachingStyle {
    pub const ALL: [CoachingStyle; 4] = [
        CoachingStyle::Motivational,
        CoachingStyle::Technical,
        CoachingStyle::Supportive,
        CoachingStyle::DrillSergeant,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            CoachingStyle::Motivational => "motivational and high energy",
            CoachingStyle::Technical => "technical and precise",
            CoachingStyle::Supportive => "supportive and encouraging",
            CoachingStyle::DrillSergeant => "like a drill sergeant",
        }
    }

    /// Style for the n-th accepted request
    pub fn rotation(n: usize) -> Self {
        Self::ALL[n % Self::ALL.len()]
    }
}

impl fmt::Display for CoachingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Keep at most `max_words` whitespace-separated words
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace().take(max_words).collect::<Vec<_>>().join(" ")
}

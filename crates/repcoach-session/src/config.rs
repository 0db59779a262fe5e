//! Session configuration.

use std::path::Path;

use repcoach_agents::AdvisorConfig;
use repcoach_core::{Error, Result};
use repcoach_exercise::{BodySide, ExerciseKind, ExerciseThresholds};
use serde::{Deserialize, Serialize};

/// Environment prefix; nested keys use `__`, e.g. `REPCOACH__ADVISOR__COOLDOWN_SECS`
pub const ENV_PREFIX: &str = "REPCOACH";

/// Credential variable honored when no key is configured
pub const CREDENTIAL_FALLBACK_ENV: &str = "GEMINI_API_KEY";

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Exercise selected at startup
    pub exercise: ExerciseKind,

    /// Side read by arm and trunk exercises
    pub side: BodySide,

    /// Coaching advisor settings
    pub advisor: AdvisorConfig,

    /// Per-exercise angle thresholds
    pub thresholds: ExerciseThresholds,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            exercise: ExerciseKind::BicepCurl,
            side: BodySide::default(),
            advisor: AdvisorConfig::default(),
            thresholds: ExerciseThresholds::default(),
        }
    }
}

impl CoachConfig {
    /// Load configuration from file, with environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment());

        Ok(Self::from_builder(builder)?.with_credential_fallback(std::env::var(CREDENTIAL_FALLBACK_ENV).ok()))
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let builder = config::Config::builder().add_source(Self::environment());

        Ok(Self::from_builder(builder)?.with_credential_fallback(std::env::var(CREDENTIAL_FALLBACK_ENV).ok()))
    }

    /// File when given, environment only otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Deserialize whatever sources `builder` carries, nothing more
    pub fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        builder
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Use `fallback` as the credential unless one is already configured
    pub fn with_credential_fallback(mut self, fallback: Option<String>) -> Self {
        if self.advisor.credential().is_none() {
            self.advisor.api_key = fallback.filter(|key| !key.trim().is_empty());
        }
        self
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).separator("__")
    }
}

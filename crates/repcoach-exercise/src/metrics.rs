//! Read-only metrics projection of an exercise.

use repcoach_core::AngleMap;
use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseKind;
use crate::stage::Stage;
use crate::state::RepState;

/// Counter, stage, warnings and angles as of the most recent processed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub exercise: ExerciseKind,
    pub reps: u32,
    pub stage: Option<Stage>,
    pub warnings: Vec<String>,
    pub angles: AngleMap,
}

impl MetricsSnapshot {
    pub fn from_state(exercise: ExerciseKind, state: &RepState) -> Self {
        Self {
            exercise,
            reps: state.counter(),
            stage: state.stage(),
            warnings: state.form_warnings().to_vec(),
            angles: state.angles().clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.exercise.display_name()
    }

    /// Stage label for display, `"-"` before the first baseline frame
    pub fn stage_label(&self) -> &'static str {
        self.stage.map(|s| s.as_str()).unwrap_or("-")
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// First warning, which is the one a display shows
    pub fn primary_warning(&self) -> Option<&str> {
        self.warnings.first().map(String::as_str)
    }

    /// Angles rounded to whole degrees, `"Curl: 172, Swing: 14"`
    pub fn angle_summary(&self) -> String {
        self.angles
            .iter()
            .map(|m| format!("{}: {}", m.label, m.value as i64))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

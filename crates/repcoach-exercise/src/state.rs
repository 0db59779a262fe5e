//! Shared per-exercise state and the rep counter capability.

use repcoach_core::{AngleMap, JointSet, Point2, Result};

use crate::exercise::ExerciseKind;
use crate::metrics::MetricsSnapshot;
use crate::stage::Stage;

/// Angles computed for one frame plus the primary overlay anchor
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    pub angles: AngleMap,
    pub anchor: Point2,
}

/// Counter, stage, warnings and angles of one exercise instance.
///
/// Warnings and angles describe the most recent frame only; the counter only
/// ever grows until [`RepState::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepState {
    counter: u32,
    stage: Option<Stage>,
    form_warnings: Vec<String>,
    angles: AngleMap,
}

impl RepState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn form_warnings(&self) -> &[String] {
        &self.form_warnings
    }

    pub fn angles(&self) -> &AngleMap {
        &self.angles
    }

    /// Drop the previous frame's warnings and angles
    pub fn begin_frame(&mut self) {
        self.form_warnings.clear();
        self.angles.clear();
    }

    pub fn record_angle(&mut self, label: &str, value: f64, anchor: Point2) {
        self.angles.insert(label, value, anchor);
    }

    pub fn warn(&mut self, message: &str) {
        self.form_warnings.push(message.to_string());
    }

    /// Apply one frame of the rest/completion rule.
    ///
    /// The rest edge is applied first; the completion edge then fires only if
    /// the stage is `rest`. Returns `true` when a repetition was counted.
    pub fn advance(&mut self, at_rest: bool, rest: Stage, at_completion: bool, completed: Stage) -> bool {
        if at_rest {
            self.stage = Some(rest);
        }
        if at_completion && self.stage == Some(rest) {
            self.stage = Some(completed);
            self.counter += 1;
            return true;
        }
        false
    }

    pub fn measurements(&self, anchor: Point2) -> Measurements {
        Measurements {
            angles: self.angles.clone(),
            anchor,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One exercise's rep counting and form evaluation
pub trait RepCounter {
    fn kind(&self) -> ExerciseKind;

    fn state(&self) -> &RepState;

    fn state_mut(&mut self) -> &mut RepState;

    /// Process one frame of landmarks.
    ///
    /// Fails with [`repcoach_core::Error::MissingLandmark`] before touching any
    /// state if a required landmark is absent.
    fn process(&mut self, joints: &JointSet) -> Result<Measurements>;

    fn name(&self) -> &'static str {
        self.kind().display_name()
    }

    fn reset(&mut self) {
        self.state_mut().reset();
    }

    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::from_state(self.kind(), self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_requires_rest_stage() {
        let mut state = RepState::new();

        assert!(!state.advance(false, Stage::Down, true, Stage::Up));
        assert_eq!(state.stage(), None);
        assert_eq!(state.counter(), 0);

        assert!(!state.advance(true, Stage::Down, false, Stage::Up));
        assert!(state.advance(false, Stage::Down, true, Stage::Up));
        assert!(!state.advance(false, Stage::Down, true, Stage::Up));

        assert_eq!(state.stage(), Some(Stage::Up));
        assert_eq!(state.counter(), 1);
    }

    #[test]
    fn test_begin_frame_clears_frame_data_only() {
        let mut state = RepState::new();
        state.advance(true, Stage::Down, false, Stage::Up);
        state.advance(false, Stage::Down, true, Stage::Up);
        state.warn("Keep going");
        state.record_angle("Curl", 20.0, Point2::origin());

        state.begin_frame();

        assert!(state.form_warnings().is_empty());
        assert!(state.angles().is_empty());
        assert_eq!(state.counter(), 1);
        assert_eq!(state.stage(), Some(Stage::Up));
    }

    #[test]
    fn test_reset() {
        let mut state = RepState::new();
        state.advance(true, Stage::In, true, Stage::Out);
        state.reset();
        assert_eq!(state, RepState::default());
    }
}

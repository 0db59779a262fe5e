//! Push up: elbow extension with a straight shoulder–hip–ankle line.

use repcoach_core::{angle, JointSet, Result};

use crate::exercise::ExerciseKind;
use crate::side::BodySide;
use crate::stage::Stage;
use crate::state::{Measurements, RepCounter, RepState};
use crate::thresholds::PushUpThresholds;

pub const ELBOW_LABEL: &str = "Elbow";
pub const BODY_LABEL: &str = "Body";
pub const BACK_STRAIGHT_WARNING: &str = "Keep your back straight!";

#[derive(Debug, Clone, Default)]
pub struct PushUp {
    state: RepState,
    side: BodySide,
    thresholds: PushUpThresholds,
}

impl PushUp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(side: BodySide, thresholds: PushUpThresholds) -> Self {
        Self {
            state: RepState::new(),
            side,
            thresholds,
        }
    }
}

impl RepCounter for PushUp {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::PushUp
    }

    fn state(&self) -> &RepState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RepState {
        &mut self.state
    }

    fn process(&mut self, joints: &JointSet) -> Result<Measurements> {
        let shoulder = joints.require(self.side.shoulder())?;
        let elbow = joints.require(self.side.elbow())?;
        let wrist = joints.require(self.side.wrist())?;
        let hip = joints.require(self.side.hip())?;
        let ankle = joints.require(self.side.ankle())?;

        let t = self.thresholds;
        self.state.begin_frame();

        let elbow_angle = angle(shoulder, elbow, wrist);
        self.state.record_angle(ELBOW_LABEL, elbow_angle, elbow);

        let body_angle = angle(shoulder, hip, ankle);
        self.state.record_angle(BODY_LABEL, body_angle, hip);

        // Rest is the locked-out top; a rep completes at the bottom
        self.state.advance(
            elbow_angle > t.extended_above,
            Stage::Up,
            elbow_angle < t.lowered_below,
            Stage::Down,
        );

        if body_angle < t.body_line_min {
            self.state.warn(BACK_STRAIGHT_WARNING);
        }

        Ok(self.state.measurements(elbow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcoach_core::Landmark;

    fn plank(wrist: (f64, f64), ankle: (f64, f64)) -> JointSet {
        JointSet::new()
            .with(Landmark::LeftShoulder, (0.0, 0.0))
            .with(Landmark::LeftElbow, (0.0, 1.0))
            .with(Landmark::LeftWrist, wrist)
            .with(Landmark::LeftHip, (0.0, -1.0))
            .with(Landmark::LeftAnkle, ankle)
    }

    #[test]
    fn test_locked_out_sets_up() {
        let mut push_up = PushUp::new();
        let m = push_up.process(&plank((0.0, 2.0), (0.0, -3.0))).unwrap();

        assert!((m.angles.value(ELBOW_LABEL).unwrap() - 180.0).abs() < 1e-6);
        assert!((m.angles.value(BODY_LABEL).unwrap() - 180.0).abs() < 1e-6);
        assert_eq!(push_up.state().stage(), Some(Stage::Up));
        assert_eq!(push_up.state().counter(), 0);
        assert!(push_up.state().form_warnings().is_empty());
    }

    #[test]
    fn test_descent_counts_rep() {
        let mut push_up = PushUp::new();
        push_up.process(&plank((0.0, 2.0), (0.0, -3.0))).unwrap();

        // 45 degree elbow
        let m = push_up.process(&plank((0.5, 0.5), (0.0, -3.0))).unwrap();
        assert!((m.angles.value(ELBOW_LABEL).unwrap() - 45.0).abs() < 1e-6);
        assert_eq!(push_up.state().stage(), Some(Stage::Down));
        assert_eq!(push_up.state().counter(), 1);

        // staying at the bottom does not count again
        push_up.process(&plank((0.5, 0.5), (0.0, -3.0))).unwrap();
        assert_eq!(push_up.state().counter(), 1);
    }

    #[test]
    fn test_exactly_ninety_degrees_does_not_count() {
        let mut push_up = PushUp::new();
        push_up.process(&plank((0.0, 2.0), (0.0, -3.0))).unwrap();
        push_up.process(&plank((1.0, 1.0), (0.0, -3.0))).unwrap();
        assert_eq!(push_up.state().stage(), Some(Stage::Up));
        assert_eq!(push_up.state().counter(), 0);
    }

    #[test]
    fn test_sagging_back_warns_on_rep_frame() {
        let mut push_up = PushUp::new();
        push_up.process(&plank((0.0, 2.0), (0.0, -3.0))).unwrap();

        let m = push_up.process(&plank((0.5, 0.5), (1.0, -1.0))).unwrap();
        assert!(m.angles.value(BODY_LABEL).unwrap() < 160.0);
        assert_eq!(push_up.state().counter(), 1);
        assert_eq!(push_up.state().form_warnings(), [BACK_STRAIGHT_WARNING]);
    }
}

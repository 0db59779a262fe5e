//! Front raise: straight-arm shoulder flexion up to shoulder height.

use repcoach_core::{angle, JointSet, Result};

use crate::exercise::ExerciseKind;
use crate::side::BodySide;
use crate::stage::Stage;
use crate::state::{Measurements, RepCounter, RepState};
use crate::thresholds::FrontRaiseThresholds;

pub const RAISE_LABEL: &str = "Raise";
pub const TOO_HIGH_WARNING: &str = "Don't raise above shoulder level!";

#[derive(Debug, Clone, Default)]
pub struct FrontRaise {
    state: RepState,
    side: BodySide,
    thresholds: FrontRaiseThresholds,
}

impl FrontRaise {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(side: BodySide, thresholds: FrontRaiseThresholds) -> Self {
        Self {
            state: RepState::new(),
            side,
            thresholds,
        }
    }
}

impl RepCounter for FrontRaise {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::FrontRaise
    }

    fn state(&self) -> &RepState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RepState {
        &mut self.state
    }

    fn process(&mut self, joints: &JointSet) -> Result<Measurements> {
        let hip = joints.require(self.side.hip())?;
        let shoulder = joints.require(self.side.shoulder())?;
        let wrist = joints.require(self.side.wrist())?;

        let t = self.thresholds;
        self.state.begin_frame();

        let raise = angle(hip, shoulder, wrist);
        self.state.record_angle(RAISE_LABEL, raise, shoulder);

        self.state.advance(
            raise < t.lowered_below,
            Stage::Down,
            raise > t.raised_above,
            Stage::Up,
        );

        if raise > t.max_height {
            self.state.warn(TOO_HIGH_WARNING);
        }

        Ok(self.state.measurements(shoulder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcoach_core::{Landmark, Point2};

    fn raise(wrist: (f64, f64)) -> JointSet {
        JointSet::new()
            .with(Landmark::LeftShoulder, (0.5, 0.3))
            .with(Landmark::LeftHip, (0.5, 0.7))
            .with(Landmark::LeftWrist, wrist)
    }

    #[test]
    fn test_raise_cycle() {
        let mut fr = FrontRaise::new();

        // arm hanging beside the hip
        fr.process(&raise((0.5, 0.6))).unwrap();
        assert_eq!(fr.state().stage(), Some(Stage::Down));

        // arm horizontal
        let m = fr.process(&raise((0.8, 0.3))).unwrap();
        assert!((m.angles.value(RAISE_LABEL).unwrap() - 90.0).abs() < 1e-6);
        assert_eq!(m.anchor, Point2::new(0.5, 0.3));
        assert_eq!(fr.state().stage(), Some(Stage::Up));
        assert_eq!(fr.state().counter(), 1);
        assert!(fr.state().form_warnings().is_empty());
    }

    #[test]
    fn test_raising_too_high_warns() {
        let mut fr = FrontRaise::new();
        fr.process(&raise((0.5, 0.6))).unwrap();

        // arm well above horizontal
        fr.process(&raise((0.7, 0.1))).unwrap();
        assert_eq!(fr.state().counter(), 1);
        assert_eq!(fr.state().form_warnings(), [TOO_HIGH_WARNING]);
    }

    #[test]
    fn test_partial_raise_does_not_count() {
        let mut fr = FrontRaise::new();
        fr.process(&raise((0.5, 0.6))).unwrap();
        fr.process(&raise((0.7, 0.5))).unwrap();
        assert_eq!(fr.state().stage(), Some(Stage::Down));
        assert_eq!(fr.state().counter(), 0);
    }
}

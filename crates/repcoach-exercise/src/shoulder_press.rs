//! Overhead shoulder press: elbow extension from a racked position.

use repcoach_core::{angle, JointSet, Result};

use crate::exercise::ExerciseKind;
use crate::side::BodySide;
use crate::stage::Stage;
use crate::state::{Measurements, RepCounter, RepState};
use crate::thresholds::ShoulderPressThresholds;

pub const PRESS_LABEL: &str = "Press";
pub const FLARE_LABEL: &str = "Flare";

#[derive(Debug, Clone, Default)]
pub struct ShoulderPress {
    state: RepState,
    side: BodySide,
    thresholds: ShoulderPressThresholds,
}

impl ShoulderPress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(side: BodySide, thresholds: ShoulderPressThresholds) -> Self {
        Self {
            state: RepState::new(),
            side,
            thresholds,
        }
    }
}

impl RepCounter for ShoulderPress {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::ShoulderPress
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

        let t = self.thresholds;
        self.state.begin_frame();

        let press = angle(shoulder, elbow, wrist);
        self.state.record_angle(PRESS_LABEL, press, elbow);

        // Reported for display only, no form rule attached
        let flare = angle(elbow, shoulder, hip);
        self.state.record_angle(FLARE_LABEL, flare, shoulder);

        self.state.advance(
            press < t.racked_below,
            Stage::Down,
            press > t.locked_out_above,
            Stage::Up,
        );

        Ok(self.state.measurements(elbow))
    }
}

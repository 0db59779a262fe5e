//! External shoulder rotation with the elbow held at ninety degrees.

use repcoach_core::{angle, JointSet, Result};

use crate::exercise::ExerciseKind;
use crate::side::BodySide;
use crate::stage::Stage;
use crate::state::{Measurements, RepCounter, RepState};
use crate::thresholds::ShoulderRotationThresholds;

pub const ELBOW_FLEX_LABEL: &str = "Elbow Flex";
pub const ROTATION_LABEL: &str = "Rotation";
pub const ELBOW_BEND_WARNING: &str = "Keep elbow bent at 90 degrees";

#[derive(Debug, Clone, Default)]
pub struct ShoulderRotation {
    state: RepState,
    side: BodySide,
    thresholds: ShoulderRotationThresholds,
}

impl ShoulderRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(side: BodySide, thresholds: ShoulderRotationThresholds) -> Self {
        Self {
            state: RepState::new(),
            side,
            thresholds,
        }
    }
}

impl RepCounter for ShoulderRotation {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::ShoulderRotation
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

        let flexion = angle(shoulder, elbow, wrist);
        self.state.record_angle(ELBOW_FLEX_LABEL, flexion, elbow);

        // 2D approximation with the elbow pinned: ~0 hand at belly, ~90 forward, ~180 out to the side
        let rotation = angle(wrist, elbow, hip);
        self.state.record_angle(ROTATION_LABEL, rotation, wrist);

        self.state.advance(
            rotation < t.internal_below,
            Stage::In,
            rotation > t.external_above,
            Stage::Out,
        );

        if flexion > t.flex_max || flexion < t.flex_min {
            self.state.warn(ELBOW_BEND_WARNING);
        }

        Ok(self.state.measurements(elbow))
    }
}

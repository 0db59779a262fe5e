//! Bicep curl: elbow flexion with the upper arm pinned to the torso.

use repcoach_core::{angle, JointSet, Result};

use crate::exercise::ExerciseKind;
use crate::side::BodySide;
use crate::stage::Stage;
use crate::state::{Measurements, RepCounter, RepState};
use crate::thresholds::BicepCurlThresholds;

pub const CURL_LABEL: &str = "Curl";
pub const SWING_LABEL: &str = "Swing";
pub const ELBOW_DRIFT_WARNING: &str = "Keep your elbow fixed at your side!";

#[derive(Debug, Clone, Default)]
pub struct BicepCurl {
    state: RepState,
    side: BodySide,
    thresholds: BicepCurlThresholds,
}

impl BicepCurl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(side: BodySide, thresholds: BicepCurlThresholds) -> Self {
        Self {
            state: RepState::new(),
            side,
            thresholds,
        }
    }
}

impl RepCounter for BicepCurl {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::BicepCurl
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

        let curl = angle(shoulder, elbow, wrist);
        self.state.record_angle(CURL_LABEL, curl, elbow);

        // Elbow swinging forward/back relative to the torso
        let swing = angle(elbow, shoulder, hip);
        self.state.record_angle(SWING_LABEL, swing, shoulder);

        self.state.advance(
            curl > t.extended_above,
            Stage::Down,
            curl < t.curled_below,
            Stage::Up,
        );

        if swing < t.swing_min {
            self.state.warn(ELBOW_DRIFT_WARNING);
        }

        Ok(self.state.measurements(elbow))
    }
}

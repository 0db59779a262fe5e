//! Neck rotation: head turning away from the vertical above the shoulders.
//!
//! Only the tilt of the nose away from the vertical through the shoulder
//! midpoint drives counting. The nose-to-shoulder proximity is computed every
//! frame and exposed read-only; it does not alternate or gate reps.

use repcoach_core::{angle, distance, midpoint, offset, JointSet, Landmark, Point2, Result};
use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseKind;
use crate::stage::Stage;
use crate::state::{Measurements, RepCounter, RepState};
use crate::thresholds::NeckRotationThresholds;

pub const NECK_TILT_LABEL: &str = "Neck Tilt";

/// Shoulder the nose has moved close to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnSide {
    Left,
    Right,
}

/// Nose-to-shoulder distances normalized by shoulder width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoulderProximity {
    pub left: f64,
    pub right: f64,
    /// Side whose ratio fell under the proximity threshold (left checked first)
    pub near: Option<TurnSide>,
}

#[derive(Debug, Clone, Default)]
pub struct NeckRotation {
    state: RepState,
    thresholds: NeckRotationThresholds,
    proximity: Option<ShoulderProximity>,
}

impl NeckRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: NeckRotationThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Proximity measured on the last processed frame; `None` before the first
    /// frame or when the shoulders coincide
    pub fn proximity(&self) -> Option<ShoulderProximity> {
        self.proximity
    }

    fn measure_proximity(&self, nose: Point2, left: Point2, right: Point2) -> Option<ShoulderProximity> {
        let width = distance(left, right);
        if width < f64::EPSILON {
            return None;
        }

        let left_ratio = distance(nose, left) / width;
        let right_ratio = distance(nose, right) / width;
        let limit = self.thresholds.proximity_ratio;

        let near = if left_ratio < limit {
            Some(TurnSide::Left)
        } else if right_ratio < limit {
            Some(TurnSide::Right)
        } else {
            None
        };

        Some(ShoulderProximity {
            left: left_ratio,
            right: right_ratio,
            near,
        })
    }
}

impl RepCounter for NeckRotation {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::NeckRotation
    }

    fn state(&self) -> &RepState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RepState {
        &mut self.state
    }

    fn process(&mut self, joints: &JointSet) -> Result<Measurements> {
        let nose = joints.require(Landmark::Nose)?;
        let left = joints.require(Landmark::LeftShoulder)?;
        let right = joints.require(Landmark::RightShoulder)?;

        let t = self.thresholds;
        self.state.begin_frame();

        let mid = midpoint(left, right);
        // image y grows downward, so "up" is a negative offset
        let vertical = offset(mid, 0.0, -t.vertical_offset);

        let tilt = angle(nose, mid, vertical);
        self.state.record_angle(NECK_TILT_LABEL, tilt, nose);

        self.proximity = self.measure_proximity(nose, left, right);

        self.state.advance(
            tilt <= t.tilt_threshold,
            Stage::Center,
            tilt > t.tilt_threshold,
            Stage::Turned,
        );

        Ok(self.state.measurements(nose))
    }

    fn reset(&mut self) {
        self.state.reset();
        self.proximity = None;
    }
}

//! Exercise selection and dispatch over the six state machines.

use std::fmt;
use std::str::FromStr;

use repcoach_core::{Error, JointSet, Result};
use serde::{Deserialize, Serialize};

use crate::bicep_curl::BicepCurl;
use crate::front_raise::FrontRaise;
use crate::metrics::MetricsSnapshot;
use crate::neck_rotation::{NeckRotation, ShoulderProximity};
use crate::push_up::PushUp;
use crate::shoulder_press::ShoulderPress;
use crate::shoulder_rotation::ShoulderRotation;
use crate::side::BodySide;
use crate::state::{Measurements, RepCounter, RepState};
use crate::thresholds::ExerciseThresholds;

/// Supported exercise types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    BicepCurl,
    PushUp,
    ShoulderPress,
    FrontRaise,
    ShoulderRotation,
    NeckRotation,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 6] = [
        ExerciseKind::BicepCurl,
        ExerciseKind::PushUp,
        ExerciseKind::ShoulderPress,
        ExerciseKind::FrontRaise,
        ExerciseKind::ShoulderRotation,
        ExerciseKind::NeckRotation,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseKind::BicepCurl => "Bicep Curl",
            ExerciseKind::PushUp => "Push Up",
            ExerciseKind::ShoulderPress => "Shoulder Press",
            ExerciseKind::FrontRaise => "Front Raise",
            ExerciseKind::ShoulderRotation => "Shoulder Rotation",
            ExerciseKind::NeckRotation => "Neck Rotation",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ExerciseKind::BicepCurl => "bicep-curl",
            ExerciseKind::PushUp => "push-up",
            ExerciseKind::ShoulderPress => "shoulder-press",
            ExerciseKind::FrontRaise => "front-raise",
            ExerciseKind::ShoulderRotation => "shoulder-rotation",
            ExerciseKind::NeckRotation => "neck-rotation",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    /// Accepts slugs (`push-up`), display names (`Push Up`) and snake case
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        ExerciseKind::ALL
            .iter()
            .copied()
            .find(|k| k.slug() == normalized)
            .ok_or_else(|| Error::UnknownExercise(s.to_string()))
    }
}

/// The active exercise; one closed variant per exercise type
#[derive(Debug, Clone)]
pub enum Exercise {
    BicepCurl(BicepCurl),
    PushUp(PushUp),
    ShoulderPress(ShoulderPress),
    FrontRaise(FrontRaise),
    ShoulderRotation(ShoulderRotation),
    NeckRotation(NeckRotation),
}

impl Exercise {
    /// Fresh exercise with default side and thresholds
    pub fn new(kind: ExerciseKind) -> Self {
        Self::with_config(kind, BodySide::default(), &ExerciseThresholds::default())
    }

    pub fn with_config(kind: ExerciseKind, side: BodySide, thresholds: &ExerciseThresholds) -> Self {
        match kind {
            ExerciseKind::BicepCurl => {
                Exercise::BicepCurl(BicepCurl::with_config(side, thresholds.bicep_curl))
            }
            ExerciseKind::PushUp => Exercise::PushUp(PushUp::with_config(side, thresholds.push_up)),
            ExerciseKind::ShoulderPress => {
                Exercise::ShoulderPress(ShoulderPress::with_config(side, thresholds.shoulder_press))
            }
            ExerciseKind::FrontRaise => {
                Exercise::FrontRaise(FrontRaise::with_config(side, thresholds.front_raise))
            }
            ExerciseKind::ShoulderRotation => Exercise::ShoulderRotation(
                ShoulderRotation::with_config(side, thresholds.shoulder_rotation),
            ),
            ExerciseKind::NeckRotation => {
                Exercise::NeckRotation(NeckRotation::with_thresholds(thresholds.neck_rotation))
            }
        }
    }

    fn counter(&self) -> &dyn RepCounter {
        match self {
            Exercise::BicepCurl(e) => e,
            Exercise::PushUp(e) => e,
            Exercise::ShoulderPress(e) => e,
            Exercise::FrontRaise(e) => e,
            Exercise::ShoulderRotation(e) => e,
            Exercise::NeckRotation(e) => e,
        }
    }

    fn counter_mut(&mut self) -> &mut dyn RepCounter {
        match self {
            Exercise::BicepCurl(e) => e,
            Exercise::PushUp(e) => e,
            Exercise::ShoulderPress(e) => e,
            Exercise::FrontRaise(e) => e,
            Exercise::ShoulderRotation(e) => e,
            Exercise::NeckRotation(e) => e,
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.counter().kind()
    }

    pub fn name(&self) -> &'static str {
        self.counter().name()
    }

    pub fn state(&self) -> &RepState {
        self.counter().state()
    }

    pub fn reps(&self) -> u32 {
        self.state().counter()
    }

    /// Process one frame; see [`RepCounter::process`]
    pub fn process(&mut self, joints: &JointSet) -> Result<Measurements> {
        let before = self.reps();
        let measurements = self.counter_mut().process(joints)?;

        let reps = self.reps();
        if reps > before {
            tracing::debug!(exercise = %self.kind(), reps, "repetition completed");
        }

        Ok(measurements)
    }

    pub fn reset(&mut self) {
        self.counter_mut().reset();
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.counter().snapshot()
    }

    /// Nose-to-shoulder proximity, only tracked by neck rotation
    pub fn neck_proximity(&self) -> Option<ShoulderProximity> {
        match self {
            Exercise::NeckRotation(neck) => neck.proximity(),
            _ => None,
        }
    }
}

impl From<ExerciseKind> for Exercise {
    fn from(kind: ExerciseKind) -> Self {
        Exercise::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;
    use repcoach_core::Landmark;

    fn curl_frame(wrist: (f64, f64)) -> JointSet {
        JointSet::new()
            .with(Landmark::LeftShoulder, (0.0, 0.0))
            .with(Landmark::LeftElbow, (0.0, 1.0))
            .with(Landmark::LeftWrist, wrist)
            .with(Landmark::LeftHip, (1.0, 0.0))
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("bicep-curl".parse::<ExerciseKind>().unwrap(), ExerciseKind::BicepCurl);
        assert_eq!("Push Up".parse::<ExerciseKind>().unwrap(), ExerciseKind::PushUp);
        assert_eq!("neck_rotation".parse::<ExerciseKind>().unwrap(), ExerciseKind::NeckRotation);
        assert!("deadlift".parse::<ExerciseKind>().is_err());
    }

    #[test]
    fn test_every_kind_builds_matching_variant() {
        for kind in ExerciseKind::ALL {
            let exercise = Exercise::new(kind);
            assert_eq!(exercise.kind(), kind);
            assert_eq!(exercise.name(), kind.display_name());
            assert_eq!(exercise.reps(), 0);
            assert_eq!(exercise.state().stage(), None);
        }
    }

    #[test]
    fn test_dispatch_counts_reps() {
        let mut exercise = Exercise::new(ExerciseKind::BicepCurl);
        exercise.process(&curl_frame((0.0, 2.0))).unwrap();
        exercise.process(&curl_frame((0.0, 0.1))).unwrap();

        let snapshot = exercise.snapshot();
        assert_eq!(snapshot.exercise, ExerciseKind::BicepCurl);
        assert_eq!(snapshot.reps, 1);
        assert_eq!(snapshot.stage, Some(Stage::Up));
        assert_eq!(snapshot.angles.len(), 2);
    }

    #[test]
    fn test_switching_exercise_starts_from_zero() {
        let mut exercise = Exercise::new(ExerciseKind::BicepCurl);
        for _ in 0..3 {
            exercise.process(&curl_frame((0.0, 2.0))).unwrap();
            exercise.process(&curl_frame((0.0, 0.1))).unwrap();
        }
        assert_eq!(exercise.reps(), 3);

        exercise = Exercise::new(ExerciseKind::PushUp);
        assert_eq!(exercise.reps(), 0);
        assert_eq!(exercise.state().stage(), None);
    }

    #[test]
    fn test_reset_in_place() {
        let mut exercise = Exercise::new(ExerciseKind::BicepCurl);
        exercise.process(&curl_frame((0.0, 2.0))).unwrap();
        exercise.process(&curl_frame((0.0, 0.1))).unwrap();

        exercise.reset();
        let snapshot = exercise.snapshot();
        assert_eq!(snapshot.reps, 0);
        assert_eq!(snapshot.stage, None);
        assert!(snapshot.angles.is_empty());
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn test_neck_proximity_only_for_neck_rotation() {
        let joints = JointSet::new()
            .with(Landmark::Nose, (0.5, 0.3))
            .with(Landmark::LeftShoulder, (0.6, 0.5))
            .with(Landmark::RightShoulder, (0.4, 0.5));

        let mut neck = Exercise::new(ExerciseKind::NeckRotation);
        neck.process(&joints).unwrap();
        assert!(neck.neck_proximity().is_some());

        let curl = Exercise::new(ExerciseKind::BicepCurl);
        assert!(curl.neck_proximity().is_none());
    }
}

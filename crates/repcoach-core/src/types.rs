//! Fundamental types for the Rep Coach system.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Workout session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * 1_000_000_000.0) as i64)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Seconds elapsed since `earlier`; negative if `earlier` is in the future
    pub fn secs_since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0) as f64 / 1_000_000_000.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// 2D point in normalized image coordinates (origin top-left, x/y roughly in [0, 1])
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> nalgebra::Point2<f64> {
        nalgebra::Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: nalgebra::Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }

    /// Vector from `self` to `other`
    pub fn vector_to(&self, other: &Point2) -> Vector2<f64> {
        Vector2::new(other.x - self.x, other.y - self.y)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// 33-landmark body model (MediaPipe Pose topology)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Landmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Landmark {
    pub const COUNT: usize = 33;

    pub const ALL: [Landmark; Landmark::COUNT] = [
        Landmark::Nose,
        Landmark::LeftEyeInner,
        Landmark::LeftEye,
        Landmark::LeftEyeOuter,
        Landmark::RightEyeInner,
        Landmark::RightEye,
        Landmark::RightEyeOuter,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::MouthLeft,
        Landmark::MouthRight,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftPinky,
        Landmark::RightPinky,
        Landmark::LeftIndex,
        Landmark::RightIndex,
        Landmark::LeftThumb,
        Landmark::RightThumb,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
        Landmark::LeftHeel,
        Landmark::RightHeel,
        Landmark::LeftFootIndex,
        Landmark::RightFootIndex,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-snake-case name as emitted by the detector (e.g. `LEFT_SHOULDER`)
    pub fn name(self) -> &'static str {
        match self {
            Landmark::Nose => "NOSE",
            Landmark::LeftEyeInner => "LEFT_EYE_INNER",
            Landmark::LeftEye => "LEFT_EYE",
            Landmark::LeftEyeOuter => "LEFT_EYE_OUTER",
            Landmark::RightEyeInner => "RIGHT_EYE_INNER",
            Landmark::RightEye => "RIGHT_EYE",
            Landmark::RightEyeOuter => "RIGHT_EYE_OUTER",
            Landmark::LeftEar => "LEFT_EAR",
            Landmark::RightEar => "RIGHT_EAR",
            Landmark::MouthLeft => "MOUTH_LEFT",
            Landmark::MouthRight => "MOUTH_RIGHT",
            Landmark::LeftShoulder => "LEFT_SHOULDER",
            Landmark::RightShoulder => "RIGHT_SHOULDER",
            Landmark::LeftElbow => "LEFT_ELBOW",
            Landmark::RightElbow => "RIGHT_ELBOW",
            Landmark::LeftWrist => "LEFT_WRIST",
            Landmark::RightWrist => "RIGHT_WRIST",
            Landmark::LeftPinky => "LEFT_PINKY",
            Landmark::RightPinky => "RIGHT_PINKY",
            Landmark::LeftIndex => "LEFT_INDEX",
            Landmark::RightIndex => "RIGHT_INDEX",
            Landmark::LeftThumb => "LEFT_THUMB",
            Landmark::RightThumb => "RIGHT_THUMB",
            Landmark::LeftHip => "LEFT_HIP",
            Landmark::RightHip => "RIGHT_HIP",
            Landmark::LeftKnee => "LEFT_KNEE",
            Landmark::RightKnee => "RIGHT_KNEE",
            Landmark::LeftAnkle => "LEFT_ANKLE",
            Landmark::RightAnkle => "RIGHT_ANKLE",
            Landmark::LeftHeel => "LEFT_HEEL",
            Landmark::RightHeel => "RIGHT_HEEL",
            Landmark::LeftFootIndex => "LEFT_FOOT_INDEX",
            Landmark::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Landmark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Landmark::ALL
            .iter()
            .copied()
            .find(|l| l.name() == wanted)
            .ok_or_else(|| Error::UnknownLandmark(s.to_string()))
    }
}

/// Landmark positions detected in a single frame.
///
/// Only landmarks the detector actually reported are present; an absent
/// landmark is never stood in for by a zero coordinate. Deserialized keys are
/// matched case-insensitively and keys naming no known landmark are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Point2>", into = "BTreeMap<Landmark, Point2>")]
pub struct JointSet {
    points: [Option<Point2>; Landmark::COUNT],
}

impl JointSet {
    pub fn new() -> Self {
        Self {
            points: [None; Landmark::COUNT],
        }
    }

    pub fn with(mut self, landmark: Landmark, point: impl Into<Point2>) -> Self {
        self.insert(landmark, point);
        self
    }

    pub fn insert(&mut self, landmark: Landmark, point: impl Into<Point2>) {
        self.points[landmark.index()] = Some(point.into());
    }

    pub fn remove(&mut self, landmark: Landmark) -> Option<Point2> {
        self.points[landmark.index()].take()
    }

    pub fn get(&self, landmark: Landmark) -> Option<Point2> {
        self.points[landmark.index()]
    }

    /// Lookup that reports the absent landmark as an error
    pub fn require(&self, landmark: Landmark) -> crate::Result<Point2> {
        self.get(landmark).ok_or(Error::MissingLandmark(landmark))
    }

    pub fn contains(&self, landmark: Landmark) -> bool {
        self.points[landmark.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.points.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Landmark, Point2)> + '_ {
        Landmark::ALL
            .iter()
            .zip(self.points.iter())
            .filter_map(|(l, p)| p.map(|p| (*l, p)))
    }
}

impl Default for JointSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(Landmark, Point2)> for JointSet {
    fn from_iter<I: IntoIterator<Item = (Landmark, Point2)>>(iter: I) -> Self {
        let mut joints = JointSet::new();
        for (landmark, point) in iter {
            joints.insert(landmark, point);
        }
        joints
    }
}

impl From<BTreeMap<Landmark, Point2>> for JointSet {
    fn from(map: BTreeMap<Landmark, Point2>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Point2>> for JointSet {
    fn from(map: BTreeMap<String, Point2>) -> Self {
        map.into_iter()
            .filter_map(|(name, point)| name.parse::<Landmark>().ok().map(|l| (l, point)))
            .collect()
    }
}

impl From<JointSet> for BTreeMap<Landmark, Point2> {
    fn from(joints: JointSet) -> Self {
        joints.iter().collect()
    }
}

/// Detector output for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Detection {
    Person(JointSet),
    NoPerson,
}

impl Detection {
    pub fn joints(&self) -> Option<&JointSet> {
        match self {
            Detection::Person(joints) => Some(joints),
            Detection::NoPerson => None,
        }
    }
}

impl From<Option<JointSet>> for Detection {
    fn from(joints: Option<JointSet>) -> Self {
        match joints {
            Some(joints) => Detection::Person(joints),
            None => Detection::NoPerson,
        }
    }
}

/// A labelled joint angle with the point the overlay should draw it at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleMeasurement {
    pub label: String,
    /// Degrees in [0, 180]
    pub value: f64,
    pub anchor: Point2,
}

impl AngleMeasurement {
    pub fn new(label: impl Into<String>, value: f64, anchor: Point2) -> Self {
        Self {
            label: label.into(),
            value,
            anchor,
        }
    }
}

/// Per-frame angle measurements in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AngleMap {
    entries: Vec<AngleMeasurement>,
}

impl AngleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the measurement with this label
    pub fn insert(&mut self, label: impl Into<String>, value: f64, anchor: Point2) {
        let label = label.into();
        match self.entries.iter_mut().find(|m| m.label == label) {
            Some(existing) => {
                existing.value = value;
                existing.anchor = anchor;
            }
            None => self.entries.push(AngleMeasurement::new(label, value, anchor)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&AngleMeasurement> {
        self.entries.iter().find(|m| m.label == label)
    }

    pub fn value(&self, label: &str) -> Option<f64> {
        self.get(label).map(|m| m.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AngleMeasurement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a AngleMap {
    type Item = &'a AngleMeasurement;
    type IntoIter = std::slice::Iter<'a, AngleMeasurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_index_roundtrip() {
        for i in 0..Landmark::COUNT as u8 {
            let landmark = Landmark::from_index(i).unwrap();
            assert_eq!(landmark.index(), i as usize);
        }
        assert!(Landmark::from_index(33).is_none());
    }

    #[test]
    fn test_landmark_name_parsing() {
        assert_eq!("left_shoulder".parse::<Landmark>().unwrap(), Landmark::LeftShoulder);
        assert_eq!(Landmark::RightFootIndex.to_string(), "RIGHT_FOOT_INDEX");
        assert!("LEFT_TAIL".parse::<Landmark>().is_err());
    }

    #[test]
    fn test_joint_set_absent_landmark_is_none() {
        let joints = JointSet::new().with(Landmark::Nose, (0.5, 0.2));

        assert_eq!(joints.get(Landmark::Nose), Some(Point2::new(0.5, 0.2)));
        assert!(joints.get(Landmark::LeftWrist).is_none());
        assert!(matches!(
            joints.require(Landmark::LeftWrist),
            Err(Error::MissingLandmark(Landmark::LeftWrist))
        ));
        assert_eq!(joints.len(), 1);
    }

    #[test]
    fn test_joint_set_json_uses_landmark_names() {
        let json = r#"{"LEFT_SHOULDER": {"x": 0.4, "y": 0.3, "z": -0.1}, "NOSE": {"x": 0.5, "y": 0.1}}"#;
        let joints: JointSet = serde_json::from_str(json).unwrap();

        assert_eq!(joints.get(Landmark::LeftShoulder), Some(Point2::new(0.4, 0.3)));
        assert_eq!(joints.get(Landmark::Nose), Some(Point2::new(0.5, 0.1)));

        let encoded = serde_json::to_string(&joints).unwrap();
        assert!(encoded.contains("LEFT_SHOULDER"));
    }

    #[test]
    fn test_joint_set_json_tolerates_unknown_and_lowercase_keys() {
        let json = r#"{"left_shoulder": {"x": 0.4, "y": 0.3}, "LEFT_TOE": {"x": 0.1, "y": 0.9}, "Nose": {"x": 0.5, "y": 0.1}}"#;
        let joints: JointSet = serde_json::from_str(json).unwrap();

        assert_eq!(joints.len(), 2);
        assert_eq!(joints.get(Landmark::LeftShoulder), Some(Point2::new(0.4, 0.3)));
        assert!(joints.contains(Landmark::Nose));
    }

    #[test]
    fn test_angle_map_keeps_insertion_order() {
        let mut angles = AngleMap::new();
        angles.insert("Curl", 170.0, Point2::origin());
        angles.insert("Swing", 12.0, Point2::origin());
        angles.insert("Curl", 20.0, Point2::new(1.0, 1.0));

        let labels: Vec<&str> = angles.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Curl", "Swing"]);
        assert_eq!(angles.value("Curl"), Some(20.0));
    }

    #[test]
    fn test_timestamp_elapsed() {
        let t0 = Timestamp::from_secs_f64(10.0);
        let t1 = Timestamp::from_secs_f64(18.5);
        assert!((t1.secs_since(t0) - 8.5).abs() < 1e-9);
    }
}

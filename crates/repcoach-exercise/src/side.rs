//! Body side selection for single-limb exercises.

use repcoach_core::Landmark;
use serde::{Deserialize, Serialize};

/// Which side of the body an arm/trunk exercise is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySide {
    #[default]
    Left,
    Right,
}

impl BodySide {
    pub fn shoulder(self) -> Landmark {
        match self {
            BodySide::Left => Landmark::LeftShoulder,
            BodySide::Right => Landmark::RightShoulder,
        }
    }

    pub fn elbow(self) -> Landmark {
        match self {
            BodySide::Left => Landmark::LeftElbow,
            BodySide::Right => Landmark::RightElbow,
        }
    }

    pub fn wrist(self) -> Landmark {
        match self {
            BodySide::Left => Landmark::LeftWrist,
            BodySide::Right => Landmark::RightWrist,
        }
    }

    pub fn hip(self) -> Landmark {
        match self {
            BodySide::Left => Landmark::LeftHip,
            BodySide::Right => Landmark::RightHip,
        }
    }

    pub fn ankle(self) -> Landmark {
        match self {
            BodySide::Left => Landmark::LeftAnkle,
            BodySide::Right => Landmark::RightAnkle,
        }
    }
}

impl std::str::FromStr for BodySide {
    type Err = repcoach_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(BodySide::Left),
            "right" | "r" => Ok(BodySide::Right),
            other => Err(repcoach_core::Error::InvalidInput(format!(
                "body side must be left or right, got {other}"
            ))),
        }
    }
}

//! Per-exercise angle thresholds (degrees unless noted).
//!
//! Defaults reproduce the reference coaching behaviour; every field can be
//! overridden from configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BicepCurlThresholds {
    /// Curl angle above which the arm counts as extended (stage `down`)
    pub extended_above: f64,
    /// Curl angle below which a curl from `down` completes (stage `up`)
    pub curled_below: f64,
    /// Elbow–shoulder–hip angle below which the elbow is drifting
    pub swing_min: f64,
}

impl Default for BicepCurlThresholds {
    fn default() -> Self {
        Self {
            extended_above: 160.0,
            curled_below: 30.0,
            swing_min: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushUpThresholds {
    /// Elbow angle above which the arms are locked out (stage `up`)
    pub extended_above: f64,
    /// Elbow angle below which a descent from `up` completes (stage `down`)
    pub lowered_below: f64,
    /// Shoulder–hip–ankle angle below which the back is sagging or piking
    pub body_line_min: f64,
}

impl Default for PushUpThresholds {
    fn default() -> Self {
        Self {
            extended_above: 160.0,
            lowered_below: 90.0,
            body_line_min: 160.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoulderPressThresholds {
    /// Press angle below which the weight is racked (stage `down`)
    pub racked_below: f64,
    /// Press angle above which a press from `down` completes (stage `up`)
    pub locked_out_above: f64,
}

impl Default for ShoulderPressThresholds {
    fn default() -> Self {
        Self {
            racked_below: 70.0,
            locked_out_above: 160.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontRaiseThresholds {
    /// Raise angle below which the arm hangs at the side (stage `down`)
    pub lowered_below: f64,
    /// Raise angle above which a raise from `down` completes (stage `up`)
    pub raised_above: f64,
    /// Raise angle above which the arm is too high
    pub max_height: f64,
}

impl Default for FrontRaiseThresholds {
    fn default() -> Self {
        Self {
            lowered_below: 20.0,
            raised_above: 80.0,
            max_height: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoulderRotationThresholds {
    /// Rotation angle below which the forearm is rotated in (stage `in`)
    pub internal_below: f64,
    /// Rotation angle above which a rotation from `in` completes (stage `out`)
    pub external_above: f64,
    /// Acceptable elbow flexion band
    pub flex_min: f64,
    pub flex_max: f64,
}

impl Default for ShoulderRotationThresholds {
    fn default() -> Self {
        Self {
            internal_below: 45.0,
            external_above: 80.0,
            flex_min: 70.0,
            flex_max: 110.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeckRotationThresholds {
    /// Tilt at or below which the head is centered; above it the head is turned
    pub tilt_threshold: f64,
    /// Upward offset of the vertical reference point (normalized units)
    pub vertical_offset: f64,
    /// Nose-to-shoulder distance, as a fraction of shoulder width, counted as "near"
    pub proximity_ratio: f64,
}

impl Default for NeckRotationThresholds {
    fn default() -> Self {
        Self {
            tilt_threshold: 20.0,
            vertical_offset: 0.5,
            proximity_ratio: 0.4,
        }
    }
}

/// Threshold set for every exercise
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseThresholds {
    pub bicep_curl: BicepCurlThresholds,
    pub push_up: PushUpThresholds,
    pub shoulder_press: ShoulderPressThresholds,
    pub front_raise: FrontRaiseThresholds,
    pub shoulder_rotation: ShoulderRotationThresholds,
    pub neck_rotation: NeckRotationThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{"push_up": {"lowered_below": 80.0}, "front_raise": {"max_height": 95.0}}"#;
        let thresholds: ExerciseThresholds = serde_json::from_str(json).unwrap();

        assert_eq!(thresholds.push_up.lowered_below, 80.0);
        assert_eq!(thresholds.push_up.extended_above, 160.0);
        assert_eq!(thresholds.front_raise.max_height, 95.0);
        assert_eq!(thresholds.bicep_curl, BicepCurlThresholds::default());
    }
}

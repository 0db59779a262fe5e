//! Movement stages shared by all exercises.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Movement stage; each exercise uses one rest/completion pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Down,
    Up,
    In,
    Out,
    Center,
    Turned,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Down => "down",
            Stage::Up => "up",
            Stage::In => "in",
            Stage::Out => "out",
            Stage::Center => "center",
            Stage::Turned => "turned",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

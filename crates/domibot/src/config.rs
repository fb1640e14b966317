//! JSON configuration for a whole deployment.

use std::{fs, path::Path};

use domibot_kinematics::KinematicsParams;
use domibot_placement::PlacementParams;
use domibot_vision::{PerceptionProfile, VisionParams};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("board fraction must lie in (0, 1], got {0}")]
    BoardFraction(f64),
}

fn default_board_fraction() -> f64 {
    2.0 / 3.0
}

/// Every calibration value the pipeline needs.
///
/// Missing sections take their simulated-profile defaults; start from
/// [`DomibotConfig::for_profile`] and write it out to get a complete file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomibotConfig {
    #[serde(default)]
    pub profile: PerceptionProfile,
    #[serde(default)]
    pub vision: VisionParams,
    #[serde(default)]
    pub placement: PlacementParams,
    #[serde(default)]
    pub kinematics: KinematicsParams,
    /// Share of a combined camera frame's rows that shows the board; the rest
    /// shows the player's hand.
    #[serde(default = "default_board_fraction")]
    pub board_fraction: f64,
}

impl DomibotConfig {
    pub fn for_profile(profile: PerceptionProfile) -> Self {
        Self {
            profile,
            vision: VisionParams::for_profile(profile),
            placement: PlacementParams::default(),
            kinematics: KinematicsParams::default(),
            board_fraction: default_board_fraction(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = self.board_fraction;
        if !(f > 0.0 && f <= 1.0) {
            return Err(ConfigError::BoardFraction(f));
        }
        Ok(())
    }

    /// Number of frame rows that belong to the board.
    pub fn board_rows(&self, frame_height: usize) -> usize {
        ((frame_height as f64) * self.board_fraction).round() as usize
    }
}

impl Default for DomibotConfig {
    fn default() -> Self {
        Self::for_profile(PerceptionProfile::default())
    }
}

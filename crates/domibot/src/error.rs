use domibot_core::ImageError;
use domibot_kinematics::KinematicsError;
use domibot_placement::PlacementError;
use domibot_vision::VisionError;

use crate::config::ConfigError;

/// Any failure of a turn, by stage.
#[derive(thiserror::Error, Debug)]
pub enum DomibotError {
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Decode(#[from] ::image::ImageError),
}

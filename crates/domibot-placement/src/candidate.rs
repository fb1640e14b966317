//! A single way to lay a new tile against an open end.

use domibot_core::{Direction, Orientation, PixelRect};
use domibot_vision::PipReading;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::PlacementError;

/// End-effector rotation for a tile laid on the `direction` side of its
/// origin, with the tile's first half facing back towards the origin.
///
/// The tile ends up pointing along `direction`: upright at 0 and 180
/// degrees, flat at +-90.
pub fn base_rotation(direction: Direction) -> f64 {
    match direction {
        Direction::Left => -90.0,
        Direction::Right => 90.0,
        Direction::Top => 180.0,
        Direction::Bottom => 0.0,
    }
}

/// Where and how to put the new tile.
///
/// `offset` and `target` are in image pixels; map `target` through
/// [`crate::PixelToWorld`] before handing it to the arm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementCandidate {
    pub direction: Direction,
    /// Orientation of the new tile once laid.
    pub orientation: Orientation,
    /// From the origin tile's centre to the new tile's centre.
    pub offset: Vector2<f64>,
    /// New tile's centre.
    pub target: Point2<f64>,
    /// Pixels the new tile will cover.
    pub footprint: PixelRect,
    pub rotation_degrees: f64,
}

impl PlacementCandidate {
    /// Adjust the rotation for the player's tile so that `value` faces the
    /// connection. Picked up with its first half leading, a tile needs a
    /// half turn when `value` is on its second half.
    pub fn for_player_tile(
        &self,
        reading: &PipReading,
        value: u8,
    ) -> Result<PlacementCandidate, PlacementError> {
        let flip = match *reading {
            PipReading::Pair(a, b) => {
                if a.known() == Some(value) {
                    false
                } else if b.known() == Some(value) {
                    true
                } else {
                    return Err(PlacementError::ValueNotOnTile { value });
                }
            }
            PipReading::Single(v) if v.known() == Some(value) => false,
            PipReading::Single(_) => return Err(PlacementError::ValueNotOnTile { value }),
        };

        let mut out = self.clone();
        if flip {
            out.rotation_degrees = (out.rotation_degrees + 180.0).rem_euclid(360.0);
        }
        Ok(out)
    }
}

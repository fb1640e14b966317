//! Where to put the next tile: match a value against the board's open ends,
//! enumerate legal directions, and compute the target centre and the
//! end-effector rotation.
//!
//! Everything here works in image pixels; [`PixelToWorld`] converts the final
//! target into table coordinates for the arm.

mod candidate;
mod error;
mod params;
mod planner;
mod world;

pub use candidate::{base_rotation, PlacementCandidate};
pub use error::PlacementError;
pub use params::{PixelToWorld, PlacementParams, TileSize};
pub use planner::{
    common_values, has_common_value, legal_directions, match_value, new_orientation,
    plan_placement, plan_placement_on_board, PlacementPlanner,
};

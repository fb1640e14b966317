//! Kinematics of the four-joint SCARA arm that places the tiles.
//!
//! Two revolute joints move the wrist in the plane, a prismatic joint sets the
//! height and a revolute wrist turns the suction cup. Inverse kinematics holds
//! the prismatic joint fixed and solves the two planar angles: a closed-form
//! two-link seed refined by Newton iteration on the baked forward model.
//!
//! ```
//! use domibot_kinematics::{KinematicsRequest, KinematicsSolver, SolverState};
//!
//! let mut solver = KinematicsSolver::default();
//! let cmd = solver.solve(&KinematicsRequest::new(0.2, 0.0, 90.0)).unwrap();
//! assert_eq!(solver.state(), SolverState::Solved);
//! println!("{:.2} {:.2} {:.2}", cmd.joint1_degrees, cmd.joint2_degrees, cmd.joint4_degrees);
//! ```

mod error;
mod forward;
mod ik;
mod params;
mod solver;

pub use error::KinematicsError;
pub use forward::{dh, ForwardChain, JointState};
pub use ik::{
    tool_tip_correction, wrap_degrees, KinematicsRequest, KinematicsResult, KinematicsSolver,
    SolverState,
};
pub use params::{KinematicsParams, ScaraGeometry, SolverParams};
pub use solver::{initial_guess, refine, Refined};

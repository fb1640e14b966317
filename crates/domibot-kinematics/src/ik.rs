//! Planar inverse kinematics with a fixed vertical joint.

use log::{debug, warn};
use nalgebra::{Rotation3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;
use crate::forward::ForwardChain;
use crate::params::KinematicsParams;
use crate::solver::{initial_guess, refine};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Progress of the most recent solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverState {
    #[default]
    Idle,
    GuessComputed,
    Refining,
    Solved,
    Unreachable,
    NonConvergent,
}

impl SolverState {
    pub fn is_final(self) -> bool {
        matches!(
            self,
            SolverState::Solved | SolverState::Unreachable | SolverState::NonConvergent
        )
    }
}

/// Where the tool should go.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KinematicsRequest {
    /// Planar target in metres, base frame.
    pub tool_x: f64,
    pub tool_y: f64,
    /// Desired absolute tool rotation about the vertical axis.
    pub yaw_degrees: f64,
    /// Tool tilt about its own x axis; only shifts the suction tip.
    #[serde(default)]
    pub roll_degrees: f64,
    /// Current prismatic extension `d3`, held during the solve.
    pub fixed_vertical_offset: f64,
}

impl KinematicsRequest {
    pub fn new(tool_x: f64, tool_y: f64, yaw_degrees: f64) -> Self {
        Self {
            tool_x,
            tool_y,
            yaw_degrees,
            roll_degrees: 0.0,
            fixed_vertical_offset: 0.0,
        }
    }
}

/// Joint command for the motion layer, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KinematicsResult {
    pub joint1_degrees: f64,
    pub joint2_degrees: f64,
    pub joint4_degrees: f64,
    /// Newton steps taken after the closed-form seed.
    pub iterations: usize,
    /// Final planar position error in metres.
    pub residual: f64,
}

/// Planar shift of the suction tip for a tool rotated by `Rz(yaw) * Rx(roll)`.
pub fn tool_tip_correction(yaw_degrees: f64, roll_degrees: f64, offset: f64) -> Vector2<f64> {
    let r = Rotation3::from_axis_angle(&Vector3::z_axis(), yaw_degrees.to_radians())
        * Rotation3::from_axis_angle(&Vector3::x_axis(), roll_degrees.to_radians());
    let tip = r * Vector3::new(0.0, 0.0, -offset);
    tip.xy()
}

/// Wrap an angle into `(-180, 180]`.
pub fn wrap_degrees(a: f64) -> f64 {
    let w = (a + 180.0).rem_euclid(360.0) - 180.0;
    if w == -180.0 {
        180.0
    } else {
        w
    }
}

/// Turns planar targets into joint angles.
///
/// Each solve walks `Idle -> GuessComputed -> Refining` and ends in `Solved`,
/// `Unreachable` or `NonConvergent`; [`KinematicsSolver::state`] reports where
/// the last one stopped.
#[derive(Clone, Debug)]
pub struct KinematicsSolver {
    chain: ForwardChain,
    params: KinematicsParams,
    state: SolverState,
}

impl KinematicsSolver {
    pub fn new(params: KinematicsParams) -> Result<Self, KinematicsError> {
        Ok(Self {
            chain: ForwardChain::new(params.geometry)?,
            params,
            state: SolverState::Idle,
        })
    }

    #[inline]
    pub fn state(&self) -> SolverState {
        self.state
    }

    #[inline]
    pub fn chain(&self) -> &ForwardChain {
        &self.chain
    }

    #[inline]
    pub fn params(&self) -> &KinematicsParams {
        &self.params
    }

    fn enter(&mut self, next: SolverState) {
        debug!("kinematics {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Solve one request. Unreachable targets are rejected before any
    /// iteration is attempted.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self), fields(x = req.tool_x, y = req.tool_y))
    )]
    pub fn solve(&mut self, req: &KinematicsRequest) -> Result<KinematicsResult, KinematicsError> {
        self.state = SolverState::Idle;
        let geometry = *self.chain.geometry();

        let target = Vector2::new(req.tool_x, req.tool_y)
            + tool_tip_correction(req.yaw_degrees, req.roll_degrees, geometry.suction_offset);
        let reach = geometry.reach();
        let distance = target.norm();
        if distance > reach || !distance.is_finite() {
            warn!(
                "target ({:.4}, {:.4}) beyond reach {reach:.4}",
                target.x, target.y
            );
            self.enter(SolverState::Unreachable);
            return Err(KinematicsError::Unreachable {
                x: target.x,
                y: target.y,
                reach,
            });
        }

        let guess = match initial_guess(&self.chain, target) {
            Ok(q) => q,
            Err(e) => {
                self.enter(SolverState::Unreachable);
                return Err(e);
            }
        };
        self.enter(SolverState::GuessComputed);

        self.enter(SolverState::Refining);
        let refined = match refine(&self.chain, target, guess, &self.params.solver) {
            Ok(r) => r,
            Err(e) => {
                warn!("{e}");
                self.enter(SolverState::NonConvergent);
                return Err(e);
            }
        };
        self.enter(SolverState::Solved);

        let j1 = refined.angles.x.to_degrees();
        let j2 = refined.angles.y.to_degrees();
        let j4 = req.yaw_degrees - (j1 + j2);
        Ok(KinematicsResult {
            joint1_degrees: wrap_degrees(j1),
            joint2_degrees: wrap_degrees(j2),
            joint4_degrees: wrap_degrees(j4),
            iterations: refined.iterations,
            residual: refined.residual,
        })
    }
}

impl Default for KinematicsSolver {
    fn default() -> Self {
        let params = KinematicsParams::default();
        Self {
            chain: ForwardChain::default(),
            params,
            state: SolverState::Idle,
        }
    }
}

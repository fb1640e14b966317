//! Closed-form seed and Newton refinement for the planar position.

use log::trace;
use nalgebra::Vector2;

use crate::error::KinematicsError;
use crate::forward::ForwardChain;
use crate::params::SolverParams;

/// Converged joint angles and how the refinement got there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Refined {
    /// `(theta1, theta2)` in radians.
    pub angles: Vector2<f64>,
    pub iterations: usize,
    pub residual: f64,
}

/// Two-link planar inverse kinematics, elbow angle in `[0, pi]`.
pub fn initial_guess(chain: &ForwardChain, target: Vector2<f64>) -> Result<Vector2<f64>, KinematicsError> {
    let g = chain.geometry();
    let r2 = target.norm_squared();
    let cos_t2 = (r2 - g.la * g.la - g.lb * g.lb) / (2.0 * g.la * g.lb);
    if !cos_t2.is_finite() || cos_t2.abs() > 1.0 {
        return Err(KinematicsError::Unreachable {
            x: target.x,
            y: target.y,
            reach: g.reach(),
        });
    }
    let t2 = cos_t2.acos();
    let t1 = target.y.atan2(target.x) - (g.lb * t2.sin()).atan2(g.la + g.lb * t2.cos());
    Ok(Vector2::new(t1, t2))
}

/// Newton iteration on `planar_position(theta) = target`.
///
/// The residual is checked before every step, so an exact seed returns with
/// zero iterations. A singular Jacobian or a non-finite step ends the solve.
pub fn refine(
    chain: &ForwardChain,
    target: Vector2<f64>,
    guess: Vector2<f64>,
    params: &SolverParams,
) -> Result<Refined, KinematicsError> {
    let mut q = guess;
    let mut iterations = 0;
    loop {
        let err = chain.planar_position(q.x, q.y) - target;
        let residual = err.norm();
        trace!("newton iteration {iterations}: residual {residual:.3e}");
        if residual < params.tolerance {
            return Ok(Refined {
                angles: q,
                iterations,
                residual,
            });
        }
        let non_convergent = KinematicsError::NonConvergent {
            iterations,
            residual,
        };
        if iterations >= params.max_iterations || !residual.is_finite() {
            return Err(non_convergent);
        }

        let step = chain
            .planar_jacobian(q.x, q.y)
            .lu()
            .solve(&err)
            .filter(|s| s.iter().all(|v| v.is_finite()))
            .ok_or(non_convergent)?;
        q -= step;
        iterations += 1;
    }
}

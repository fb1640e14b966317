/// Why a planar target could not be turned into joint angles.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    #[error("target ({x:.4}, {y:.4}) is outside the arm's reach of {reach:.4} m")]
    Unreachable { x: f64, y: f64, reach: f64 },
    #[error("refinement did not converge after {iterations} iterations (residual {residual:.3e})")]
    NonConvergent { iterations: usize, residual: f64 },
    #[error("invalid arm geometry: link lengths must be finite and positive")]
    InvalidGeometry,
}

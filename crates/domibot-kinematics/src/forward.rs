//! Forward model of the arm.
//!
//! The chain uses standard Denavit-Hartenberg parameters `(theta, d, a, alpha)`:
//!
//! | joint | theta    | d     | a    | alpha |
//! |-------|----------|-------|------|-------|
//! | 1     | `theta1` | `lc`  | `la` | 0     |
//! | 2     | `theta2` | 0     | `lb` | 0     |
//! | 3     | 0        | `-d3` | 0    | 0     |
//! | 4     | `theta4` | `-l4` | 0    | pi    |
//!
//! Composed, the tool frame is `Rz(theta1 + theta2 + theta4) * Rx(pi)` at
//! `(la c1 + lb c12, la s1 + lb s12, lc - d3 - l4)`. The planar part and its
//! Jacobian are baked in below; [`ForwardChain::transform`] multiplies the
//! full matrices and serves as the reference.

use nalgebra::{Matrix2, Matrix4, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;
use crate::params::ScaraGeometry;

/// Joint values in radians (`d3` in metres).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointState {
    pub theta1: f64,
    pub theta2: f64,
    pub d3: f64,
    pub theta4: f64,
}

/// Homogeneous transform for one DH row.
#[rustfmt::skip]
pub fn dh(theta: f64, d: f64, a: f64, alpha: f64) -> Matrix4<f64> {
    let (st, ct) = theta.sin_cos();
    let (sa, ca) = alpha.sin_cos();
    Matrix4::new(
        ct, -st * ca,  st * sa, a * ct,
        st,  ct * ca, -ct * sa, a * st,
        0.0,      sa,       ca,      d,
        0.0,     0.0,      0.0,    1.0,
    )
}

/// The arm's kinematic chain for a fixed geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForwardChain {
    geometry: ScaraGeometry,
}

impl ForwardChain {
    pub fn new(geometry: ScaraGeometry) -> Result<Self, KinematicsError> {
        let lengths = [geometry.la, geometry.lb, geometry.lc, geometry.l4];
        let valid = lengths.iter().all(|v| v.is_finite())
            && geometry.la > 0.0
            && geometry.lb > 0.0
            && geometry.suction_offset.is_finite();
        if !valid {
            return Err(KinematicsError::InvalidGeometry);
        }
        Ok(Self { geometry })
    }

    #[inline]
    pub fn geometry(&self) -> &ScaraGeometry {
        &self.geometry
    }

    /// Base-to-tool transform from the full matrix product.
    pub fn transform(&self, q: &JointState) -> Matrix4<f64> {
        let g = &self.geometry;
        dh(q.theta1, g.lc, g.la, 0.0)
            * dh(q.theta2, 0.0, g.lb, 0.0)
            * dh(0.0, -q.d3, 0.0, 0.0)
            * dh(q.theta4, -g.l4, 0.0, std::f64::consts::PI)
    }

    /// Tool position in the base plane.
    #[inline]
    pub fn planar_position(&self, theta1: f64, theta2: f64) -> Vector2<f64> {
        let g = &self.geometry;
        let (s1, c1) = theta1.sin_cos();
        let (s12, c12) = (theta1 + theta2).sin_cos();
        Vector2::new(g.la * c1 + g.lb * c12, g.la * s1 + g.lb * s12)
    }

    /// `d(x, y) / d(theta1, theta2)`.
    #[inline]
    pub fn planar_jacobian(&self, theta1: f64, theta2: f64) -> Matrix2<f64> {
        let g = &self.geometry;
        let (s1, c1) = theta1.sin_cos();
        let (s12, c12) = (theta1 + theta2).sin_cos();
        Matrix2::new(
            -g.la * s1 - g.lb * s12,
            -g.lb * s12,
            g.la * c1 + g.lb * c12,
            g.lb * c12,
        )
    }

    /// Tool height for a given prismatic extension.
    #[inline]
    pub fn tool_height(&self, d3: f64) -> f64 {
        self.geometry.lc - d3 - self.geometry.l4
    }

    /// Tool rotation about the vertical axis.
    #[inline]
    pub fn tool_yaw(q: &JointState) -> f64 {
        q.theta1 + q.theta2 + q.theta4
    }
}

impl Default for ForwardChain {
    fn default() -> Self {
        Self {
            geometry: ScaraGeometry::default(),
        }
    }
}

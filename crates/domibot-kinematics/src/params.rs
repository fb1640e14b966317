use serde::{Deserialize, Serialize};

/// Link lengths of the arm, in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaraGeometry {
    /// Shoulder to elbow.
    pub la: f64,
    /// Elbow to wrist axis.
    pub lb: f64,
    /// Base height of the first link.
    pub lc: f64,
    /// Wrist flange length.
    pub l4: f64,
    /// Suction cup length below the flange.
    pub suction_offset: f64,
}

impl ScaraGeometry {
    /// Maximum planar distance the wrist axis can reach.
    #[inline]
    pub fn reach(&self) -> f64 {
        self.la + self.lb
    }
}

impl Default for ScaraGeometry {
    fn default() -> Self {
        Self {
            la: 0.26,
            lb: 0.1425,
            lc: 0.2,
            l4: 0.0981,
            suction_offset: 0.011,
        }
    }
}

/// Newton refinement settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverParams {
    /// Stop when the planar position error norm drops below this (metres).
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicsParams {
    #[serde(default)]
    pub geometry: ScaraGeometry,
    #[serde(default)]
    pub solver: SolverParams,
}

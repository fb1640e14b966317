use serde::{Deserialize, Serialize};

/// Which camera setup the perception thresholds were tuned for.
///
/// The two setups differ only in calibration data (tile area, pip area window,
/// colour window); the algorithms are identical.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerceptionProfile {
    /// Rendered frames from the physics simulator's vision sensor.
    #[default]
    Simulated,
    /// Frames from the physical camera above the table.
    Physical,
}

/// Tile detection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDetectorParams {
    /// Expected contour area of one tile, in px^2.
    pub approx_area: f64,
    /// Slack in px when testing whether two tiles touch.
    pub proximity_threshold: f64,
    /// Mask pixels strictly above this value are foreground.
    pub mask_threshold: u8,
    /// Accepted contour area as a fraction of `approx_area`: `[min, max]`.
    #[serde(default = "default_area_fraction")]
    pub area_fraction: (f64, f64),
}

fn default_area_fraction() -> (f64, f64) {
    (0.5, 1.5)
}

impl TileDetectorParams {
    pub fn for_profile(profile: PerceptionProfile) -> Self {
        let approx_area = match profile {
            PerceptionProfile::Simulated => 2900.0,
            PerceptionProfile::Physical => 32500.0,
        };
        Self {
            approx_area,
            ..Self::default()
        }
    }

    /// Settings for the player's hand strip (larger tiles, tighter gaps).
    pub fn for_hand(profile: PerceptionProfile) -> Self {
        let approx_area = match profile {
            PerceptionProfile::Simulated => 3900.0,
            PerceptionProfile::Physical => 32500.0,
        };
        Self {
            approx_area,
            proximity_threshold: 15.0,
            ..Self::default()
        }
    }

    /// Inclusive contour-area window.
    pub fn area_window(&self) -> (f64, f64) {
        (
            self.area_fraction.0 * self.approx_area,
            self.area_fraction.1 * self.approx_area,
        )
    }
}

impl Default for TileDetectorParams {
    fn default() -> Self {
        Self {
            approx_area: 2900.0,
            proximity_threshold: 35.0,
            mask_threshold: 127,
            area_fraction: default_area_fraction(),
        }
    }
}

/// Pip extraction settings.
///
/// The area and circularity windows are empirically tuned calibration data,
/// not derived constants; re-tune them for a new camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipScorerParams {
    /// Apply a Gaussian blur before thresholding.
    pub blur: bool,
    /// Blur sigma in pixels; the default matches a 3x3 kernel.
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    /// Pixels at or below the value are pip ink.
    pub threshold: u8,
    /// Exclusive lower bound on `4*pi*A/P^2`.
    pub min_circularity: f64,
    /// Inclusive upper bound on `4*pi*A/P^2`.
    pub max_circularity: f64,
    /// Exclusive pip contour area window in px^2.
    pub area_window: (f64, f64),
}

impl PipScorerParams {
    pub fn for_profile(profile: PerceptionProfile) -> Self {
        let area_window = match profile {
            PerceptionProfile::Simulated => (5.0, 120.0),
            PerceptionProfile::Physical => (200.0, 650.0),
        };
        Self {
            area_window,
            ..Self::default()
        }
    }
}

impl Default for PipScorerParams {
    fn default() -> Self {
        Self {
            blur: true,
            blur_sigma: default_blur_sigma(),
            threshold: 170,
            min_circularity: 0.5,
            max_circularity: 1.0,
            area_window: (5.0, 120.0),
        }
    }
}

fn default_blur_sigma() -> f32 {
    domibot_core::BLUR_3X3_SIGMA
}

/// HSV window (8-bit convention, `H` in `0..180`) selecting tile faces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskParams {
    pub hsv_lower: [u8; 3],
    pub hsv_upper: [u8; 3],
}

impl MaskParams {
    pub fn for_profile(profile: PerceptionProfile) -> Self {
        match profile {
            PerceptionProfile::Simulated => Self {
                hsv_lower: [0, 0, 210],
                hsv_upper: [180, 30, 255],
            },
            // Lower brightness floor picks up shaded faces under room light.
            PerceptionProfile::Physical => Self {
                hsv_lower: [0, 0, 200],
                hsv_upper: [179, 50, 255],
            },
        }
    }
}

impl Default for MaskParams {
    fn default() -> Self {
        Self::for_profile(PerceptionProfile::Simulated)
    }
}

/// All perception settings for one camera setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisionParams {
    /// Board tiles.
    pub detector: TileDetectorParams,
    /// Player hand tiles.
    pub hand_detector: TileDetectorParams,
    pub pips: PipScorerParams,
    #[serde(default)]
    pub mask: MaskParams,
}

impl VisionParams {
    pub fn for_profile(profile: PerceptionProfile) -> Self {
        Self {
            detector: TileDetectorParams::for_profile(profile),
            hand_detector: TileDetectorParams::for_hand(profile),
            pips: PipScorerParams::for_profile(profile),
            mask: MaskParams::for_profile(profile),
        }
    }
}

impl Default for VisionParams {
    fn default() -> Self {
        Self::for_profile(PerceptionProfile::default())
    }
}

use serde::{Deserialize, Serialize};

/// Tile footprint in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSize {
    /// Across the tile.
    pub short: f64,
    /// Along the tile.
    pub long: f64,
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            short: 40.0,
            long: 80.0,
        }
    }
}

/// Pixel-to-table mapping for a camera looking straight down.
///
/// Axes are crossed: image rows (`v`) drive table `x`, image columns (`u`)
/// drive table `y`. Limits give the table coordinate at pixel `0` and at the
/// far edge of the image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelToWorld {
    pub resolution: [u32; 2],
    /// Table `x` at `v = 0` and at `v = height`, in metres.
    pub x_limits: (f64, f64),
    /// Table `y` at `u = 0` and at `u = width`, in metres.
    pub y_limits: (f64, f64),
}

impl Default for PixelToWorld {
    fn default() -> Self {
        Self {
            resolution: [640, 480],
            x_limits: (0.475, 0.025),
            y_limits: (0.30, -0.30),
        }
    }
}

/// Placement settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementParams {
    #[serde(default)]
    pub tile_size: TileSize,
    #[serde(default)]
    pub camera: PixelToWorld,
}

use domibot_core::ImageError;

/// Errors returned by board and hand analysis.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum VisionError {
    #[error("no tiles survived the area filter")]
    DetectionEmpty,
    #[error("pip count for tile {tile} is outside 0..=6")]
    ScoringUnknown { tile: usize },
    #[error("mask is {mask_width}x{mask_height} but image is {image_width}x{image_height}")]
    MaskSizeMismatch {
        mask_width: usize,
        mask_height: usize,
        image_width: usize,
        image_height: usize,
    },
    #[error(transparent)]
    Image(#[from] ImageError),
}

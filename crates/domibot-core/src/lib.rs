//! Core image and geometry primitives for the domino-playing arm.
//!
//! This crate is purely pixel-level and knows nothing about dominoes. It owns
//! the image views and half-open pixel rectangles the other crates share, and
//! wraps the `imageproc` blur, threshold and contour kernels the vision crate
//! builds on.

mod contour;
mod filter;
mod geometry;
mod logger;
mod raster;

pub use contour::{find_external_contours, Contour};
pub use filter::{gaussian_blur, threshold_binary, threshold_binary_inv, BLUR_3X3_SIGMA};
pub use geometry::{Direction, Orientation, PixelRect};
pub use raster::{luma, GrayImage, GrayImageView, ImageError, RgbImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, stage, verbosity_level};

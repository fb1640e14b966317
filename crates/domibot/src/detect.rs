//! Helpers that run a turn straight from `image` crate buffers or files.

use std::path::Path;

use domibot_core::{GrayImageView, RgbImageView};
use image::ImageReader;

use crate::error::DomibotError;
use crate::turn::{Domibot, TurnReport};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Borrow an `image::GrayImage` as a [`GrayImageView`].
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Borrow an `image::RgbImage` as a [`RgbImageView`].
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Decode any supported image file to 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<::image::RgbImage, DomibotError> {
    let img = ImageReader::open(path.as_ref())
        .map_err(::image::ImageError::IoError)?
        .with_guessed_format()
        .map_err(::image::ImageError::IoError)?
        .decode()?;
    Ok(img.to_rgb8())
}

/// Analyse separate board and hand photos.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(bot, board, hand), fields(board_w = board.width(), hand_w = hand.width()))
)]
pub fn analyze_images(
    bot: &Domibot,
    board: &::image::RgbImage,
    hand: &::image::RgbImage,
) -> Result<TurnReport, DomibotError> {
    bot.analyze_rgb(&rgb_view(board), &rgb_view(hand))
}

/// Analyse one photo holding the board above the hand.
pub fn analyze_frame_image(
    bot: &Domibot,
    frame: &::image::RgbImage,
) -> Result<TurnReport, DomibotError> {
    bot.analyze_frame(&rgb_view(frame))
}

/// Load and analyse board and hand photos from disk.
pub fn analyze_files(
    bot: &Domibot,
    board: impl AsRef<Path>,
    hand: impl AsRef<Path>,
) -> Result<TurnReport, DomibotError> {
    let board = load_rgb(board)?;
    let hand = load_rgb(hand)?;
    analyze_images(bot, &board, &hand)
}

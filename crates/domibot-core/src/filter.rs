//! Gaussian smoothing and global thresholds, run through `imageproc`.

use imageproc::contrast::{threshold, ThresholdType};
use imageproc::filter::gaussian_blur_f32;

use crate::{GrayImage, GrayImageView};

/// Sigma of a Gaussian equivalent to a 3x3 smoothing kernel.
pub const BLUR_3X3_SIGMA: f32 = 0.8;

/// Gaussian blur with standard deviation `sigma` in pixels.
///
/// A non-positive sigma or an empty image returns an unchanged copy.
pub fn gaussian_blur(src: &GrayImageView<'_>, sigma: f32) -> GrayImage {
    match src.to_luma8() {
        Some(img) if sigma > 0.0 && !src.data.is_empty() => gaussian_blur_f32(&img, sigma).into(),
        _ => src.to_owned_image(),
    }
}

/// `255` where `v > thresh`, else `0`.
pub fn threshold_binary(src: &GrayImageView<'_>, thresh: u8) -> GrayImage {
    apply_threshold(src, thresh, ThresholdType::Binary)
}

/// `0` where `v > thresh`, else `255`. Isolates dark marks on a light face.
pub fn threshold_binary_inv(src: &GrayImageView<'_>, thresh: u8) -> GrayImage {
    apply_threshold(src, thresh, ThresholdType::BinaryInverted)
}

fn apply_threshold(src: &GrayImageView<'_>, thresh: u8, kind: ThresholdType) -> GrayImage {
    match src.to_luma8() {
        Some(img) => threshold(&img, thresh, kind).into(),
        None => GrayImage::new(src.width, src.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_keeps_flat_image_flat() {
        let img = GrayImage::filled(7, 6, 200);
        let out = gaussian_blur(&img.view(), BLUR_3X3_SIGMA);
        assert!(out.data.iter().all(|&v| (199..=200).contains(&v)));
    }

    #[test]
    fn blur_spreads_single_spike_symmetrically() {
        let mut img = GrayImage::new(9, 9);
        img.set(4, 4, 160);
        let out = gaussian_blur(&img.view(), BLUR_3X3_SIGMA);
        let at = |x, y| out.view().get(x, y);
        assert!(at(4, 4) < 160);
        assert!(at(3, 4) > 0);
        assert_eq!(at(3, 4), at(5, 4));
        assert_eq!(at(4, 3), at(4, 5));
        assert!(at(3, 4) > at(3, 3));
        assert_eq!(at(0, 0), 0);
    }

    #[test]
    fn zero_sigma_is_a_copy() {
        let mut img = GrayImage::new(4, 4);
        img.set(1, 2, 99);
        assert_eq!(gaussian_blur(&img.view(), 0.0), img);
    }

    #[test]
    fn inverse_threshold_marks_dark_pixels() {
        let img = GrayImage {
            width: 4,
            height: 1,
            data: vec![10, 170, 171, 250],
        };
        let out = threshold_binary_inv(&img.view(), 170);
        assert_eq!(out.data, vec![255, 255, 0, 0]);
        let out = threshold_binary(&img.view(), 170);
        assert_eq!(out.data, vec![0, 0, 255, 255]);
    }
}

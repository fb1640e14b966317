//! Occupancy mask from a colour frame.

use domibot_core::{GrayImage, RgbImageView};

use crate::params::MaskParams;

/// 8-bit HSV with hue halved into `0..180`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };
    let mut h = if diff == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / diff
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    let hue = (h * 0.5).round() as u16 % 180;
    [hue as u8, s.round() as u8, v as u8]
}

/// `255` where the pixel's HSV lies inside the inclusive window, else `0`.
pub fn occupancy_mask(frame: &RgbImageView<'_>, params: &MaskParams) -> GrayImage {
    let lo = params.hsv_lower;
    let hi = params.hsv_upper;
    let data = frame
        .data
        .chunks_exact(3)
        .map(|px| {
            let hsv = rgb_to_hsv(px[0], px[1], px[2]);
            let inside = (0..3).all(|c| hsv[c] >= lo[c] && hsv[c] <= hi[c]);
            if inside {
                255
            } else {
                0
            }
        })
        .collect();
    GrayImage {
        width: frame.width,
        height: frame.height,
        data,
    }
}

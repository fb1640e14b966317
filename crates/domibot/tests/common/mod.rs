#![allow(dead_code)]

use domibot::core::{Direction, Orientation, PixelRect};
use image::{Rgb, RgbImage};

pub const FACE: Rgb<u8> = Rgb([230, 230, 230]);
pub const INK: Rgb<u8> = Rgb([40, 40, 40]);
pub const FELT: Rgb<u8> = Rgb([20, 90, 30]);

/// Board tiles drawn by [`table_frame`], top band of a 640x480 frame.
pub const BOARD_LEFT: PixelRect = PixelRect {
    x1: 236,
    y1: 140,
    x2: 316,
    y2: 180,
};
pub const BOARD_RIGHT: PixelRect = PixelRect {
    x1: 320,
    y1: 140,
    x2: 400,
    y2: 180,
};

pub fn fill(img: &mut RgbImage, r: PixelRect, color: Rgb<u8>) {
    for y in r.y1.max(0)..r.y2.min(img.height() as i32) {
        for x in r.x1.max(0)..r.x2.min(img.width() as i32) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// A light tile with `values` pips on its two long-axis halves.
pub fn draw_tile(img: &mut RgbImage, r: PixelRect, values: (u8, u8)) {
    fill(img, r, FACE);
    let (h1, h2) = match r.orientation() {
        Orientation::Vertical => (r.half(Direction::Top), r.half(Direction::Bottom)),
        Orientation::Horizontal => (r.half(Direction::Left), r.half(Direction::Right)),
    };
    draw_pips(img, h1, values.0);
    draw_pips(img, h2, values.1);
}

fn draw_pips(img: &mut RgbImage, half: PixelRect, n: u8) {
    let c = half.center();
    let (cx, cy) = (c.x.floor() as i32, c.y.floor() as i32);
    let slots = [(-10, -10), (10, 10), (10, -10), (-10, 10), (-10, 0), (10, 0)];
    for &(dx, dy) in slots.iter().take(n as usize) {
        let (px, py) = (cx + dx, cy + dy);
        for y in py - 3..=py + 3 {
            for x in px - 3..=px + 3 {
                if (x - px).pow(2) + (y - py).pow(2) <= 9 {
                    img.put_pixel(x as u32, y as u32, INK);
                }
            }
        }
    }
}

/// 640x480 frame: a 2|3 - 3|5 chain on the board (top 320 rows) and three
/// vertical tiles in the hand (bottom 160 rows).
pub fn table_frame() -> RgbImage {
    let mut img = RgbImage::from_pixel(640, 480, FELT);
    draw_tile(&mut img, BOARD_LEFT, (2, 3));
    draw_tile(&mut img, BOARD_RIGHT, (3, 5));
    for (x, values) in [(100, (1, 4)), (200, (5, 6)), (300, (6, 6))] {
        draw_tile(&mut img, PixelRect::from_xywh(x, 360, 40, 80), values);
    }
    img
}

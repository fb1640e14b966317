//! Pixel rectangles and the four board directions.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Side of a tile in image space (x grows right, y grows down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }

    /// Axis the direction points along.
    pub fn axis(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Top | Direction::Bottom => Orientation::Vertical,
        }
    }

    /// Unit step in image coordinates.
    pub fn unit(self) -> Vector2<f64> {
        match self {
            Direction::Left => Vector2::new(-1.0, 0.0),
            Direction::Right => Vector2::new(1.0, 0.0),
            Direction::Top => Vector2::new(0.0, -1.0),
            Direction::Bottom => Vector2::new(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Half extents `(x, y)` of a `short x long` tile lying in this orientation.
    pub fn half_extents(self, short: f64, long: f64) -> Vector2<f64> {
        match self {
            Orientation::Horizontal => Vector2::new(0.5 * long, 0.5 * short),
            Orientation::Vertical => Vector2::new(0.5 * short, 0.5 * long),
        }
    }
}

/// Half-open pixel rectangle `[x1, x2) x [y1, y2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl PixelRect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            0.5 * (self.x1 + self.x2) as f64,
            0.5 * (self.y1 + self.y2) as f64,
        )
    }

    /// Wider than tall means horizontal; squares count as vertical.
    pub fn orientation(&self) -> Orientation {
        if self.width().abs() > self.height().abs() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// The half of the rectangle towards `side`, split at the integer midpoint.
    pub fn half(&self, side: Direction) -> PixelRect {
        let mx = (self.x1 + self.x2).div_euclid(2);
        let my = (self.y1 + self.y2).div_euclid(2);
        match side {
            Direction::Left => PixelRect::new(self.x1, self.y1, mx, self.y2),
            Direction::Right => PixelRect::new(mx, self.y1, self.x2, self.y2),
            Direction::Top => PixelRect::new(self.x1, self.y1, self.x2, my),
            Direction::Bottom => PixelRect::new(self.x1, my, self.x2, self.y2),
        }
    }

    /// True when the interiors overlap (touching edges do not count).
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Rectangle of size `w x h` centred on `c`, rounded to whole pixels.
    pub fn centered(c: Point2<f64>, w: f64, h: f64) -> PixelRect {
        PixelRect::new(
            (c.x - 0.5 * w).round() as i32,
            (c.y - 0.5 * h).round() as i32,
            (c.x + 0.5 * w).round() as i32,
            (c.y + 0.5 * h).round() as i32,
        )
    }
}

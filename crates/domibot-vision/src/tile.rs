//! Detected tiles and the pairwise adjacency test.

use domibot_core::{Direction, Orientation, PixelRect};
use serde::{Deserialize, Serialize};

/// Axis along which two tiles touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    /// Side by side: edges touch along x.
    Horizontal,
    /// Stacked: edges touch along y.
    Vertical,
}

/// One tile found in the occupancy mask.
///
/// `neighbor_direction` and `neighbor_index` are set exactly when the tile has
/// a single neighbour, i.e. it is an open end of the line of play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub index: usize,
    pub bbox: PixelRect,
    pub orientation: Orientation,
    /// Indices of all adjacent tiles.
    pub neighbors: Vec<usize>,
    pub neighbor_count: usize,
    pub neighbor_direction: Option<Direction>,
    pub neighbor_index: Option<usize>,
}

impl Tile {
    /// Tile with no neighbour information yet.
    pub fn new(index: usize, bbox: PixelRect) -> Self {
        Self {
            index,
            bbox,
            orientation: bbox.orientation(),
            neighbors: Vec::new(),
            neighbor_count: 0,
            neighbor_direction: None,
            neighbor_index: None,
        }
    }

    /// Exactly one neighbour.
    pub fn is_open_end(&self) -> bool {
        self.neighbor_count == 1
    }

    /// The tile lies across the line it connects to (its long axis is
    /// perpendicular to the neighbour direction), as doubles are laid.
    pub fn is_crosswise(&self) -> bool {
        self.neighbor_direction
            .is_some_and(|d| d.axis() != self.orientation)
    }
}

/// Classify whether two rectangles touch, within `threshold` px of slack.
///
/// Horizontal adjacency needs overlapping vertical spans and a left/right
/// edge pair within the slack; vertical adjacency is the mirror condition.
/// Horizontal is tested first and wins, so a pair never gets both labels.
pub fn are_adjacent(r1: &PixelRect, r2: &PixelRect, threshold: f64) -> Option<Adjacency> {
    let t = threshold;
    let (l1, r1x, t1, b1) = (r1.x1 as f64, r1.x2 as f64, r1.y1 as f64, r1.y2 as f64);
    let (l2, r2x, t2, b2) = (r2.x1 as f64, r2.x2 as f64, r2.y1 as f64, r2.y2 as f64);

    let overlap_x = l1 <= r2x + t && r1x >= l2 - t;
    let overlap_y = t1 <= b2 + t && b1 >= t2 - t;

    if overlap_y && ((l1 - r2x).abs() <= t || (l2 - r1x).abs() <= t) {
        return Some(Adjacency::Horizontal);
    }
    if overlap_x && ((t1 - b2).abs() <= t || (t2 - b1).abs() <= t) {
        return Some(Adjacency::Vertical);
    }
    None
}

/// Side of `this` on which `other` lies, comparing centres along the
/// adjacency axis.
pub fn relative_direction(this: &PixelRect, other: &PixelRect, adjacency: Adjacency) -> Direction {
    let a = this.center();
    let b = other.center();
    match adjacency {
        Adjacency::Horizontal if b.x < a.x => Direction::Left,
        Adjacency::Horizontal => Direction::Right,
        Adjacency::Vertical if b.y < a.y => Direction::Top,
        Adjacency::Vertical => Direction::Bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> PixelRect {
        PixelRect::from_xywh(x, y, w, h)
    }

    #[test]
    fn side_by_side_tiles_are_horizontal() {
        let a = rect(0, 0, 80, 40);
        let b = rect(84, 0, 80, 40);
        assert_eq!(are_adjacent(&a, &b, 10.0), Some(Adjacency::Horizontal));
        assert_eq!(relative_direction(&a, &b, Adjacency::Horizontal), Direction::Right);
        assert_eq!(relative_direction(&b, &a, Adjacency::Horizontal), Direction::Left);
    }

    #[test]
    fn stacked_tiles_are_vertical() {
        let a = rect(0, 0, 40, 80);
        let b = rect(0, 85, 40, 80);
        assert_eq!(are_adjacent(&a, &b, 10.0), Some(Adjacency::Vertical));
        assert_eq!(relative_direction(&a, &b, Adjacency::Vertical), Direction::Bottom);
        assert_eq!(relative_direction(&b, &a, Adjacency::Vertical), Direction::Top);
    }

    #[test]
    fn distant_tiles_are_not_adjacent() {
        let a = rect(0, 0, 40, 80);
        assert_eq!(are_adjacent(&a, &rect(100, 0, 40, 80), 10.0), None);
        assert_eq!(are_adjacent(&a, &rect(0, 200, 40, 80), 10.0), None);
        // Close in x but far apart in y.
        assert_eq!(are_adjacent(&a, &rect(45, 300, 40, 80), 10.0), None);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let base = rect(100, 100, 40, 80);
        for dx in (-140..=140).step_by(7) {
            for dy in (-140..=140).step_by(9) {
                for (w, h) in [(40, 80), (80, 40)] {
                    let other = rect(100 + dx, 100 + dy, w, h);
                    for t in [0.0, 5.0, 35.0] {
                        assert_eq!(
                            are_adjacent(&base, &other, t),
                            are_adjacent(&other, &base, t),
                            "asymmetric for {other:?} at t={t}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn crosswise_tile_is_perpendicular_to_its_neighbour() {
        let mut double = Tile::new(0, rect(0, 0, 40, 80));
        double.neighbor_count = 1;
        double.neighbor_direction = Some(Direction::Left);
        assert!(double.is_crosswise());
        double.neighbor_direction = Some(Direction::Top);
        assert!(!double.is_crosswise());
    }
}

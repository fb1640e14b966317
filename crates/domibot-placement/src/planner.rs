//! Matching open ends and laying out candidate placements.

use std::collections::{BTreeMap, BTreeSet};

use domibot_core::{Direction, Orientation, PixelRect};
use domibot_vision::{BoardState, PipReading, PipValue, ScoredTile};
use log::debug;

use crate::candidate::{base_rotation, PlacementCandidate};
use crate::error::PlacementError;
use crate::params::{PlacementParams, TileSize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Open ends whose board-facing value equals `desired`.
///
/// An unreadable `desired` value matches nothing, and neither do open ends
/// whose own value could not be read.
pub fn match_value(open_ends: &[ScoredTile], desired: PipValue) -> Vec<ScoredTile> {
    let Some(want) = desired.known() else {
        return Vec::new();
    };
    open_ends
        .iter()
        .filter(|s| s.pips.facing().known() == Some(want))
        .cloned()
        .collect()
}

/// Player-tile values that are also open on the board, in the tile's order.
pub fn common_values(player: &PipReading, open_values: &BTreeSet<u8>) -> Vec<u8> {
    player
        .values()
        .into_iter()
        .filter(|v| open_values.contains(v))
        .collect()
}

/// True when at least one of the player's values can be played.
pub fn has_common_value(player: &PipReading, open_values: &BTreeSet<u8>) -> bool {
    !common_values(player, open_values).is_empty()
}

/// Directions a new tile may be laid from `origin`.
///
/// A regular open end only continues away from its neighbour. A double may
/// branch to any side but the occupied one. A lone opening tile offers both
/// ends of its long axis, or all four sides when it is a double.
pub fn legal_directions(origin: &ScoredTile) -> Vec<Direction> {
    let double = origin.is_double();
    match origin.tile.neighbor_direction {
        Some(taken) if double => Direction::ALL
            .into_iter()
            .filter(|&d| d != taken)
            .collect(),
        Some(taken) => vec![taken.opposite()],
        None if double => Direction::ALL.to_vec(),
        None => Direction::ALL
            .into_iter()
            .filter(|d| d.axis() == origin.tile.orientation)
            .collect(),
    }
}

/// Orientation of the new tile laid from `origin` towards `direction`.
///
/// Regular tiles extend the line in the same orientation. Off a double, the
/// new tile always points along `direction`: crosswise when it continues the
/// line through the double, parallel when it branches off the double's ends.
/// This is the orientation [`base_rotation`] lays the tile in.
pub fn new_orientation(origin: &ScoredTile, direction: Direction) -> Orientation {
    if origin.is_double() {
        direction.axis()
    } else {
        origin.tile.orientation
    }
}

/// Candidate placements from `origin`, keyed by direction.
///
/// The offset puts the two tiles edge to edge: the origin's half-extent
/// along `direction` plus the new tile's half-extent along the same axis.
pub fn plan_placement(
    origin: &ScoredTile,
    tile_width: f64,
    tile_height: f64,
) -> BTreeMap<Direction, PlacementCandidate> {
    let size = TileSize {
        short: tile_width.min(tile_height),
        long: tile_width.max(tile_height),
    };
    let center = origin.tile.bbox.center();
    let origin_half = origin.tile.orientation.half_extents(size.short, size.long);

    let mut out = BTreeMap::new();
    for direction in legal_directions(origin) {
        let orientation = new_orientation(origin, direction);
        let new_half = orientation.half_extents(size.short, size.long);
        let unit = direction.unit();
        let offset = unit.component_mul(&(origin_half + new_half));
        let target = center + offset;
        let footprint = PixelRect::centered(target, 2.0 * new_half.x, 2.0 * new_half.y);
        debug!(
            "tile {} -> {direction:?}: {orientation:?} at ({:.1}, {:.1})",
            origin.tile.index, target.x, target.y
        );
        out.insert(
            direction,
            PlacementCandidate {
                direction,
                orientation,
                offset,
                target,
                footprint,
                rotation_degrees: base_rotation(direction),
            },
        );
    }
    out
}

/// Plans placements with configured tile size and board awareness.
#[derive(Clone, Debug, Default)]
pub struct PlacementPlanner {
    params: PlacementParams,
}

impl PlacementPlanner {
    pub fn new(params: PlacementParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &PlacementParams {
        &self.params
    }

    /// Like [`match_value`], but an empty result is an error.
    pub fn require_match(
        &self,
        open_ends: &[ScoredTile],
        desired: PipValue,
    ) -> Result<Vec<ScoredTile>, PlacementError> {
        let value = desired.known().ok_or(PlacementError::UnknownValue)?;
        let matches = match_value(open_ends, desired);
        if matches.is_empty() {
            return Err(PlacementError::NoLegalMatch { value });
        }
        Ok(matches)
    }

    pub fn plan(&self, origin: &ScoredTile) -> BTreeMap<Direction, PlacementCandidate> {
        let size = self.params.tile_size;
        plan_placement(origin, size.short, size.long)
    }

    /// Candidates from `origin` whose footprint is clear of every other tile
    /// on the board.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, origin, board), fields(tile = origin.tile.index))
    )]
    pub fn plan_on_board(
        &self,
        origin: &ScoredTile,
        board: &BoardState,
    ) -> Result<BTreeMap<Direction, PlacementCandidate>, PlacementError> {
        let others: Vec<PixelRect> = board
            .occupied()
            .into_iter()
            .filter(|r| *r != origin.tile.bbox)
            .collect();

        let mut candidates = self.plan(origin);
        candidates.retain(|dir, c| {
            let clear = !others.iter().any(|r| r.overlaps(&c.footprint));
            if !clear {
                debug!("tile {} -> {dir:?} is blocked", origin.tile.index);
            }
            clear
        });
        if candidates.is_empty() {
            return Err(PlacementError::NoLegalDirection {
                tile: origin.tile.index,
            });
        }
        Ok(candidates)
    }
}

/// [`PlacementPlanner::plan_on_board`] with default settings.
pub fn plan_placement_on_board(
    origin: &ScoredTile,
    board: &BoardState,
) -> Result<BTreeMap<Direction, PlacementCandidate>, PlacementError> {
    PlacementPlanner::default().plan_on_board(origin, board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use domibot_vision::Tile;
    use nalgebra::Vector2;

    fn open_end(
        index: usize,
        bbox: PixelRect,
        neighbor: Option<Direction>,
        pips: PipReading,
    ) -> ScoredTile {
        let mut tile = Tile::new(index, bbox);
        if let Some(d) = neighbor {
            tile.neighbor_count = 1;
            tile.neighbor_direction = Some(d);
            tile.neighbors = vec![index + 100];
            tile.neighbor_index = Some(index + 100);
        }
        ScoredTile { tile, pips }
    }

    fn single(v: u8) -> PipReading {
        PipReading::Single(PipValue::Pips(v))
    }

    fn pair(a: u8, b: u8) -> PipReading {
        PipReading::Pair(PipValue::Pips(a), PipValue::Pips(b))
    }

    fn horizontal_end(neighbor: Direction, pips: PipReading) -> ScoredTile {
        open_end(0, PixelRect::from_xywh(200, 200, 80, 40), Some(neighbor), pips)
    }

    #[test]
    fn match_value_filters_by_facing_value() {
        let ends = vec![
            horizontal_end(Direction::Left, single(3)),
            open_end(1, PixelRect::from_xywh(0, 0, 40, 80), Some(Direction::Top), single(5)),
        ];
        assert!(match_value(&ends, PipValue::Pips(6)).is_empty());
        let hits = match_value(&ends, PipValue::Pips(5));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tile.index, 1);
        assert!(match_value(&ends, PipValue::Unknown).is_empty());
    }

    #[test]
    fn doubles_match_on_their_value() {
        let ends = vec![open_end(
            2,
            PixelRect::from_xywh(0, 0, 40, 80),
            Some(Direction::Left),
            pair(4, 4),
        )];
        assert_eq!(match_value(&ends, PipValue::Pips(4)).len(), 1);
    }

    #[test]
    fn require_match_reports_missing_value() {
        let planner = PlacementPlanner::default();
        let ends = vec![horizontal_end(Direction::Left, single(3))];
        assert_eq!(
            planner.require_match(&ends, PipValue::Pips(6)).unwrap_err(),
            PlacementError::NoLegalMatch { value: 6 }
        );
        assert_eq!(
            planner.require_match(&ends, PipValue::Unknown).unwrap_err(),
            PlacementError::UnknownValue
        );
    }

    #[test]
    fn regular_tile_continues_away_from_its_neighbour() {
        for neighbor in Direction::ALL {
            let origin = horizontal_end(neighbor, single(3));
            let plans = plan_placement(&origin, 40.0, 80.0);
            assert!(!plans.contains_key(&neighbor));
            assert_eq!(plans.keys().copied().collect::<Vec<_>>(), vec![neighbor.opposite()]);
        }
    }

    #[test]
    fn offsets_put_tiles_edge_to_edge() {
        let origin = horizontal_end(Direction::Left, single(3));
        let plans = plan_placement(&origin, 40.0, 80.0);
        let right = &plans[&Direction::Right];
        assert_eq!(right.orientation, Orientation::Horizontal);
        assert_relative_eq!(right.offset, Vector2::new(80.0, 0.0));
        assert_relative_eq!(right.target.x, 320.0);
        assert_relative_eq!(right.target.y, 220.0);
        assert_eq!(right.footprint, PixelRect::from_xywh(280, 200, 80, 40));
        assert_eq!(right.rotation_degrees, 90.0);

        let vertical = open_end(
            0,
            PixelRect::from_xywh(100, 100, 40, 80),
            Some(Direction::Bottom),
            single(2),
        );
        let top = &plan_placement(&vertical, 40.0, 80.0)[&Direction::Top];
        assert_relative_eq!(top.offset, Vector2::new(0.0, -80.0));
        assert_eq!(top.rotation_degrees, 180.0);
    }

    #[test]
    fn double_branches_except_towards_its_neighbour() {
        // Vertical double laid across a horizontal line, neighbour on the left.
        let origin = open_end(
            0,
            PixelRect::from_xywh(300, 120, 40, 80),
            Some(Direction::Left),
            pair(6, 6),
        );
        let plans = plan_placement(&origin, 40.0, 80.0);
        assert_eq!(
            plans.keys().copied().collect::<Vec<_>>(),
            vec![Direction::Right, Direction::Top, Direction::Bottom]
        );

        // Continuing the line: horizontal again, short half + long half.
        let right = &plans[&Direction::Right];
        assert_eq!(right.orientation, Orientation::Horizontal);
        assert_relative_eq!(right.offset, Vector2::new(60.0, 0.0));
        assert_eq!(right.footprint, PixelRect::from_xywh(340, 140, 80, 40));

        // Off the double's ends: vertical, long half + long half.
        let top = &plans[&Direction::Top];
        assert_eq!(top.orientation, Orientation::Vertical);
        assert_relative_eq!(top.offset, Vector2::new(0.0, -80.0));
        assert_eq!(top.footprint, PixelRect::from_xywh(300, 40, 40, 80));
    }

    #[test]
    fn planned_footprint_matches_the_laid_rotation() {
        // 0/180 degrees lays a tile upright, +-90 lays it flat.
        let laid = |rotation: f64| {
            if rotation.rem_euclid(180.0) == 0.0 {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            }
        };
        let upright = PixelRect::from_xywh(300, 120, 40, 80);
        let flat = PixelRect::from_xywh(300, 120, 80, 40);
        let origins = [
            open_end(0, upright, None, pair(6, 6)),
            open_end(1, flat, None, pair(2, 2)),
            open_end(2, flat, Some(Direction::Left), single(4)),
            open_end(3, upright, Some(Direction::Top), single(1)),
            open_end(4, upright, None, pair(3, 5)),
        ];
        for origin in &origins {
            for (dir, c) in plan_placement(origin, 40.0, 80.0) {
                let index = origin.tile.index;
                assert_eq!(c.orientation, laid(c.rotation_degrees), "tile {index} {dir:?}");
                assert_eq!(c.footprint.orientation(), c.orientation);
                assert!(
                    !c.footprint.overlaps(&origin.tile.bbox),
                    "tile {index} {dir:?} overlaps its origin"
                );
            }
        }
    }

    #[test]
    fn lone_opening_tile_offers_both_ends() {
        let lone = open_end(0, PixelRect::from_xywh(100, 100, 40, 80), None, pair(6, 1));
        let dirs: Vec<_> = plan_placement(&lone, 40.0, 80.0).into_keys().collect();
        assert_eq!(dirs, vec![Direction::Top, Direction::Bottom]);
    }

    #[test]
    fn blocked_direction_is_dropped() {
        let origin = open_end(
            0,
            PixelRect::from_xywh(200, 180, 40, 80),
            Some(Direction::Left),
            pair(6, 6),
        );
        let blocker = Tile::new(1, PixelRect::from_xywh(240, 180, 40, 80));
        let board = BoardState {
            open_ends: vec![origin.clone()],
            interior: vec![blocker],
            isolated: None,
        };
        let plans = plan_placement_on_board(&origin, &board).expect("free sides");
        assert!(!plans.contains_key(&Direction::Right));
        assert!(plans.contains_key(&Direction::Top));
    }

    #[test]
    fn fully_blocked_tile_has_no_direction() {
        let origin = horizontal_end(Direction::Left, single(3));
        let blocker = Tile::new(7, PixelRect::from_xywh(290, 190, 40, 80));
        let board = BoardState {
            open_ends: vec![origin.clone()],
            interior: vec![blocker],
            isolated: None,
        };
        assert_eq!(
            plan_placement_on_board(&origin, &board).unwrap_err(),
            PlacementError::NoLegalDirection { tile: 0 }
        );
    }

    #[test]
    fn common_values_keep_player_order() {
        let open = BTreeSet::from([1, 5]);
        assert_eq!(common_values(&pair(5, 1), &open), vec![5, 1]);
        assert_eq!(common_values(&pair(5, 5), &open), vec![5, 5]);
        assert!(!has_common_value(&pair(2, 3), &open));
    }
}

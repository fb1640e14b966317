//! One turn, end to end: analyse the table, then plan a chosen move down to
//! the joint command.

use std::collections::BTreeSet;

use domibot_core::{Direction, GrayImageView, RgbImageView};
use domibot_kinematics::{KinematicsRequest, KinematicsResult, KinematicsSolver, SolverState};
use domibot_placement::{
    common_values, legal_directions, PlacementCandidate, PlacementError, PlacementPlanner,
};
use domibot_vision::{occupancy_mask, BoardAnalyzer, BoardState, PipReading, PipValue, ScoredTile};
use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::config::DomibotConfig;
use crate::error::DomibotError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A hand tile that can be played this turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayableTile {
    /// Position in the hand, left to right.
    pub hand_index: usize,
    pub pips: PipReading,
    /// Values on the tile that are open on the board, in the tile's order.
    pub values: Vec<u8>,
}

/// What the camera saw this turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub board: BoardState,
    pub hand: Vec<ScoredTile>,
    pub open_values: BTreeSet<u8>,
    pub playable: Vec<PlayableTile>,
}

impl TurnReport {
    pub fn new(board: BoardState, hand: Vec<ScoredTile>) -> Self {
        let open_values = board.open_values();
        let playable = hand
            .iter()
            .enumerate()
            .filter_map(|(hand_index, s)| {
                let values = common_values(&s.pips, &open_values);
                (!values.is_empty()).then(|| PlayableTile {
                    hand_index,
                    pips: s.pips,
                    values,
                })
            })
            .collect();
        Self {
            board,
            hand,
            open_values,
            playable,
        }
    }
}

/// The operator's choice for this turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Tile picked up from the hand.
    pub player_tile: PipReading,
    /// Value on that tile to connect with.
    pub value: u8,
    /// Board tile to play against; the first match when `None`.
    #[serde(default)]
    pub origin: Option<usize>,
    /// Side of the origin to lay the tile on; the first free one when `None`.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Current prismatic joint extension, held during the move.
    #[serde(default)]
    pub vertical_offset: f64,
}

/// A fully planned move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedMove {
    /// Board tile the new tile connects to.
    pub origin: usize,
    /// Placement with the player tile's flip already applied.
    pub candidate: PlacementCandidate,
    /// Target centre on the table, metres.
    pub target_world: Point2<f64>,
    pub joints: KinematicsResult,
}

/// Analyzer, planner and solver wired to one configuration.
#[derive(Clone, Debug)]
pub struct Domibot {
    config: DomibotConfig,
    analyzer: BoardAnalyzer,
    planner: PlacementPlanner,
    solver: KinematicsSolver,
}

impl Domibot {
    pub fn new(config: DomibotConfig) -> Result<Self, DomibotError> {
        config.validate()?;
        Ok(Self {
            analyzer: BoardAnalyzer::new(&config.vision),
            planner: PlacementPlanner::new(config.placement.clone()),
            solver: KinematicsSolver::new(config.kinematics)?,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &DomibotConfig {
        &self.config
    }

    #[inline]
    pub fn analyzer(&self) -> &BoardAnalyzer {
        &self.analyzer
    }

    #[inline]
    pub fn planner(&self) -> &PlacementPlanner {
        &self.planner
    }

    /// Where the last kinematics solve ended.
    pub fn solver_state(&self) -> SolverState {
        self.solver.state()
    }

    /// Analyse grayscale board and hand images with their occupancy masks.
    pub fn analyze(
        &self,
        board: &GrayImageView<'_>,
        board_mask: &GrayImageView<'_>,
        hand: &GrayImageView<'_>,
        hand_mask: &GrayImageView<'_>,
    ) -> Result<TurnReport, DomibotError> {
        let state = self.analyzer.analyze_board(board, board_mask)?;
        let tiles = self.analyzer.analyze_hand(hand, hand_mask)?;
        let report = TurnReport::new(state, tiles);
        info!(
            "board: {} tiles, open values {:?}; hand: {} tiles, {} playable",
            report.board.tile_count(),
            report.open_values,
            report.hand.len(),
            report.playable.len()
        );
        Ok(report)
    }

    /// Analyse colour board and hand images, building masks from the
    /// configured HSV window.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, board, hand), fields(board_w = board.width, hand_w = hand.width))
    )]
    pub fn analyze_rgb(
        &self,
        board: &RgbImageView<'_>,
        hand: &RgbImageView<'_>,
    ) -> Result<TurnReport, DomibotError> {
        let mask_params = &self.config.vision.mask;
        let board_mask = occupancy_mask(board, mask_params);
        let hand_mask = occupancy_mask(hand, mask_params);
        let board_gray = board.to_gray();
        let hand_gray = hand.to_gray();
        self.analyze(
            &board_gray.view(),
            &board_mask.view(),
            &hand_gray.view(),
            &hand_mask.view(),
        )
    }

    /// Analyse one frame showing the board above the hand.
    pub fn analyze_frame(&self, frame: &RgbImageView<'_>) -> Result<TurnReport, DomibotError> {
        let rows = self.config.board_rows(frame.height);
        let (board, hand) = frame.split_rows(rows);
        self.analyze_rgb(&board, &hand)
    }

    /// Plan the chosen move: match, place, convert to table coordinates and
    /// solve the arm's joints.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, board), fields(value = req.value))
    )]
    pub fn plan_move(
        &mut self,
        board: &BoardState,
        req: &MoveRequest,
    ) -> Result<PlannedMove, DomibotError> {
        if !req.player_tile.values().contains(&req.value) {
            return Err(PlacementError::ValueNotOnTile { value: req.value }.into());
        }

        let (origin, mut candidates) = match &board.isolated {
            Some(lone) if board.open_ends.is_empty() => {
                let mut candidates = self.planner.plan_on_board(lone, board)?;
                let exposed = exposed_directions(lone, req.value);
                candidates.retain(|d, _| exposed.contains(d));
                (lone.clone(), candidates)
            }
            _ => {
                let matches = self
                    .planner
                    .require_match(&board.open_ends, PipValue::Pips(req.value))?;
                let origin = pick_origin(matches, req)?;
                let candidates = self.planner.plan_on_board(&origin, board)?;
                (origin, candidates)
            }
        };

        let candidate = match req.direction {
            Some(d) => candidates.remove(&d),
            None => candidates.into_values().next(),
        }
        .ok_or(PlacementError::NoLegalDirection {
            tile: origin.tile.index,
        })?;
        let candidate = candidate.for_player_tile(&req.player_tile, req.value)?;
        debug!(
            "placing against tile {} on the {:?}, rotation {}",
            origin.tile.index, candidate.direction, candidate.rotation_degrees
        );

        let target_world = self.config.placement.camera.to_world(candidate.target);
        let joints = self.solve(&KinematicsRequest {
            tool_x: target_world.x,
            tool_y: target_world.y,
            yaw_degrees: candidate.rotation_degrees,
            roll_degrees: 0.0,
            fixed_vertical_offset: req.vertical_offset,
        })?;

        Ok(PlannedMove {
            origin: origin.tile.index,
            candidate,
            target_world,
            joints,
        })
    }

    /// Solve a single kinematics request.
    pub fn solve(&mut self, req: &KinematicsRequest) -> Result<KinematicsResult, DomibotError> {
        Ok(self.solver.solve(req)?)
    }
}

fn pick_origin(matches: Vec<ScoredTile>, req: &MoveRequest) -> Result<ScoredTile, PlacementError> {
    let found = match req.origin {
        Some(index) => matches.into_iter().find(|s| s.tile.index == index),
        None => matches.into_iter().next(),
    };
    found.ok_or(PlacementError::NoLegalMatch { value: req.value })
}

/// Sides of a lone opening tile that show `value`: its first half faces
/// top/left, its second bottom/right, and a double shows its value everywhere.
fn exposed_directions(lone: &ScoredTile, value: u8) -> Vec<Direction> {
    let (first, second) = match lone.pips {
        PipReading::Pair(a, b) => (a.known(), b.known()),
        PipReading::Single(v) => (v.known(), None),
    };
    legal_directions(lone)
        .into_iter()
        .filter(|d| {
            lone.is_double()
                || match d {
                    Direction::Top | Direction::Left => first == Some(value),
                    Direction::Bottom | Direction::Right => second == Some(value),
                }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domibot_core::PixelRect;
    use domibot_vision::Tile;

    fn pair(a: u8, b: u8) -> PipReading {
        PipReading::Pair(PipValue::Pips(a), PipValue::Pips(b))
    }

    fn board_with_open_ends() -> BoardState {
        // Two horizontal tiles in the middle of a 640x320 board image.
        let mut left = Tile::new(0, PixelRect::from_xywh(236, 140, 80, 40));
        left.neighbor_count = 1;
        left.neighbor_direction = Some(Direction::Right);
        left.neighbor_index = Some(1);
        left.neighbors = vec![1];
        let mut right = Tile::new(1, PixelRect::from_xywh(320, 140, 80, 40));
        right.neighbor_count = 1;
        right.neighbor_direction = Some(Direction::Left);
        right.neighbor_index = Some(0);
        right.neighbors = vec![0];
        BoardState {
            open_ends: vec![
                ScoredTile {
                    tile: left,
                    pips: PipReading::Single(PipValue::Pips(2)),
                },
                ScoredTile {
                    tile: right,
                    pips: PipReading::Single(PipValue::Pips(5)),
                },
            ],
            interior: Vec::new(),
            isolated: None,
        }
    }

    #[test]
    fn report_lists_playable_hand_tiles() {
        let board = board_with_open_ends();
        let hand = vec![
            ScoredTile {
                tile: Tile::new(0, PixelRect::from_xywh(10, 0, 40, 80)),
                pips: pair(1, 3),
            },
            ScoredTile {
                tile: Tile::new(1, PixelRect::from_xywh(80, 0, 40, 80)),
                pips: pair(5, 2),
            },
        ];
        let report = TurnReport::new(board, hand);
        assert_eq!(report.open_values, BTreeSet::from([2, 5]));
        assert_eq!(report.playable.len(), 1);
        assert_eq!(report.playable[0].hand_index, 1);
        assert_eq!(report.playable[0].values, vec![5, 2]);
    }

    #[test]
    fn plans_a_move_against_the_matching_end() {
        let mut bot = Domibot::new(DomibotConfig::default()).expect("config");
        let req = MoveRequest {
            player_tile: pair(6, 5),
            value: 5,
            origin: None,
            direction: None,
            vertical_offset: 0.0,
        };
        let planned = bot.plan_move(&board_with_open_ends(), &req).expect("planned");
        assert_eq!(planned.origin, 1);
        assert_eq!(planned.candidate.direction, Direction::Right);
        // Base rotation 90, flipped because 5 is the second half.
        assert_eq!(planned.candidate.rotation_degrees, 270.0);
        assert_eq!(bot.solver_state(), SolverState::Solved);
    }

    #[test]
    fn missing_value_is_reported_before_planning() {
        let mut bot = Domibot::new(DomibotConfig::default()).expect("config");
        let req = MoveRequest {
            player_tile: pair(6, 5),
            value: 3,
            origin: None,
            direction: None,
            vertical_offset: 0.0,
        };
        let err = bot.plan_move(&board_with_open_ends(), &req).unwrap_err();
        assert!(matches!(
            err,
            DomibotError::Placement(PlacementError::ValueNotOnTile { value: 3 })
        ));
    }

    #[test]
    fn value_absent_from_board_has_no_match() {
        let mut bot = Domibot::new(DomibotConfig::default()).expect("config");
        let req = MoveRequest {
            player_tile: pair(6, 4),
            value: 6,
            origin: None,
            direction: None,
            vertical_offset: 0.0,
        };
        let err = bot.plan_move(&board_with_open_ends(), &req).unwrap_err();
        assert!(matches!(
            err,
            DomibotError::Placement(PlacementError::NoLegalMatch { value: 6 })
        ));
    }

    #[test]
    fn opening_tile_is_played_on_the_side_showing_the_value() {
        let lone = ScoredTile {
            tile: Tile::new(0, PixelRect::from_xywh(300, 120, 40, 80)),
            pips: pair(6, 1),
        };
        let board = BoardState {
            open_ends: Vec::new(),
            interior: vec![lone.tile.clone()],
            isolated: Some(lone),
        };
        let mut bot = Domibot::new(DomibotConfig::default()).expect("config");
        let req = MoveRequest {
            player_tile: pair(1, 4),
            value: 1,
            origin: None,
            direction: None,
            vertical_offset: 0.0,
        };
        let planned = bot.plan_move(&board, &req).expect("planned");
        assert_eq!(planned.candidate.direction, Direction::Bottom);
        assert_eq!(planned.candidate.rotation_degrees, 0.0);
    }
}

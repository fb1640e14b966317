//! Board and hand analysis: detection plus pip scoring.

use std::collections::BTreeSet;

use domibot_core::{Direction, GrayImageView, Orientation, PixelRect};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::detector::TileDetector;
use crate::error::VisionError;
use crate::params::{PerceptionProfile, VisionParams};
use crate::pips::{PipReading, PipScorer, PipValue};
use crate::tile::Tile;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A detected tile with the pip values read off it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredTile {
    pub tile: Tile,
    pub pips: PipReading,
}

impl ScoredTile {
    pub fn is_double(&self) -> bool {
        self.pips.is_double()
    }

    /// Known value presented to the line of play.
    pub fn facing_value(&self) -> Result<u8, VisionError> {
        self.pips
            .facing()
            .known()
            .ok_or(VisionError::ScoringUnknown {
                tile: self.tile.index,
            })
    }
}

/// Table contents split by playability.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    /// Tiles with exactly one neighbour, scored on their exposed side.
    pub open_ends: Vec<ScoredTile>,
    /// Tiles with zero or several neighbours.
    pub interior: Vec<Tile>,
    /// Lone tile with no neighbours, scored on both halves. Only the opening
    /// tile of a game looks like this.
    pub isolated: Option<ScoredTile>,
}

impl BoardState {
    pub fn tile_count(&self) -> usize {
        self.open_ends.len() + self.interior.len()
    }

    /// Bounding boxes of every detected tile.
    pub fn occupied(&self) -> Vec<PixelRect> {
        self.open_ends
            .iter()
            .map(|s| s.tile.bbox)
            .chain(self.interior.iter().map(|t| t.bbox))
            .collect()
    }

    /// Values that can be played against, from open ends and the opening tile.
    pub fn open_values(&self) -> BTreeSet<u8> {
        let mut values = BTreeSet::new();
        for scored in &self.open_ends {
            match scored.pips.facing().known() {
                Some(v) => {
                    values.insert(v);
                }
                None => warn!("open end {} has an unreadable value", scored.tile.index),
            }
        }
        if let Some(lone) = &self.isolated {
            values.extend(lone.pips.values());
        }
        values
    }

    /// Open ends whose value could not be read.
    pub fn unscored_tiles(&self) -> Vec<usize> {
        self.open_ends
            .iter()
            .filter(|s| s.pips.has_unknown())
            .map(|s| s.tile.index)
            .collect()
    }
}

/// Runs tile detection and pip scoring over board and hand images.
#[derive(Clone, Debug)]
pub struct BoardAnalyzer {
    board: TileDetector,
    hand: TileDetector,
    scorer: PipScorer,
}

impl BoardAnalyzer {
    pub fn new(params: &VisionParams) -> Self {
        Self {
            board: TileDetector::new(params.detector.clone()),
            hand: TileDetector::new(params.hand_detector.clone()),
            scorer: PipScorer::new(params.pips.clone()),
        }
    }

    pub fn for_profile(profile: PerceptionProfile) -> Self {
        Self::new(&VisionParams::for_profile(profile))
    }

    pub fn scorer(&self) -> &PipScorer {
        &self.scorer
    }

    /// Detect board tiles and score every open end.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image, mask), fields(width = image.width, height = image.height))
    )]
    pub fn analyze_board(
        &self,
        image: &GrayImageView<'_>,
        mask: &GrayImageView<'_>,
    ) -> Result<BoardState, VisionError> {
        check_same_size(image, mask)?;
        let tiles = self.board.detect(mask);
        if tiles.is_empty() {
            return Err(VisionError::DetectionEmpty);
        }

        let mut state = BoardState::default();
        let lone = tiles.len() == 1;
        for tile in tiles {
            if tile.is_open_end() {
                let pips = self.score_tile(image, &tile)?;
                debug!("open end {} reads {:?}", tile.index, pips);
                state.open_ends.push(ScoredTile { tile, pips });
            } else if lone {
                let pips = self.score_tile(image, &tile)?;
                state.interior.push(tile.clone());
                state.isolated = Some(ScoredTile { tile, pips });
            } else {
                state.interior.push(tile);
            }
        }
        Ok(state)
    }

    /// Detect the player's tiles and read both halves of each, ordered left
    /// to right.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image, mask), fields(width = image.width, height = image.height))
    )]
    pub fn analyze_hand(
        &self,
        image: &GrayImageView<'_>,
        mask: &GrayImageView<'_>,
    ) -> Result<Vec<ScoredTile>, VisionError> {
        check_same_size(image, mask)?;
        let mut tiles = self.hand.detect(mask);
        if tiles.is_empty() {
            return Err(VisionError::DetectionEmpty);
        }
        tiles.sort_by(|a, b| a.bbox.center().x.total_cmp(&b.bbox.center().x));

        tiles
            .into_iter()
            .map(|tile| {
                let pips = self.score_pair(image, &tile.bbox)?;
                Ok(ScoredTile { tile, pips })
            })
            .collect()
    }

    /// Score one tile.
    ///
    /// A tile lying along its neighbour reads only the half away from it, and
    /// a tile with no neighbour reads both halves. Only doubles are laid
    /// crosswise, so a crosswise tile whose halves differ has no readable
    /// facing value and scores `Single(Unknown)`.
    pub fn score_tile(
        &self,
        image: &GrayImageView<'_>,
        tile: &Tile,
    ) -> Result<PipReading, VisionError> {
        match tile.neighbor_direction {
            Some(dir) if dir.axis() == tile.orientation => {
                let half = image.crop(tile.bbox.half(dir.opposite()))?;
                Ok(PipReading::Single(self.scorer.count_pips(&half.view())))
            }
            Some(_) => {
                let pair = self.score_pair(image, &tile.bbox)?;
                if pair.is_double() {
                    Ok(pair)
                } else {
                    warn!("tile {} lies crosswise but reads {pair:?}", tile.index);
                    Ok(PipReading::Single(PipValue::Unknown))
                }
            }
            None => self.score_pair(image, &tile.bbox),
        }
    }

    /// Both halves along the long axis, top/left first.
    fn score_pair(
        &self,
        image: &GrayImageView<'_>,
        bbox: &PixelRect,
    ) -> Result<PipReading, VisionError> {
        let (first, second) = match bbox.orientation() {
            Orientation::Vertical => (Direction::Top, Direction::Bottom),
            Orientation::Horizontal => (Direction::Left, Direction::Right),
        };
        let a = self.count_half(image, bbox, first)?;
        let b = self.count_half(image, bbox, second)?;
        Ok(PipReading::Pair(a, b))
    }

    fn count_half(
        &self,
        image: &GrayImageView<'_>,
        bbox: &PixelRect,
        side: Direction,
    ) -> Result<PipValue, VisionError> {
        let half = image.crop(bbox.half(side))?;
        Ok(self.scorer.count_pips(&half.view()))
    }
}

impl Default for BoardAnalyzer {
    fn default() -> Self {
        Self::new(&VisionParams::default())
    }
}

fn check_same_size(image: &GrayImageView<'_>, mask: &GrayImageView<'_>) -> Result<(), VisionError> {
    if image.width != mask.width || image.height != mask.height {
        return Err(VisionError::MaskSizeMismatch {
            mask_width: mask.width,
            mask_height: mask.height,
            image_width: image.width,
            image_height: image.height,
        });
    }
    Ok(())
}

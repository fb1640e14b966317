//! Tile detection from a binary occupancy mask.

use domibot_core::{find_external_contours, threshold_binary, GrayImageView, PixelRect};
use log::debug;

use crate::params::TileDetectorParams;
use crate::tile::{are_adjacent, relative_direction, Tile};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Finds tile-sized blobs in an occupancy mask and links touching tiles.
#[derive(Clone, Debug, Default)]
pub struct TileDetector {
    params: TileDetectorParams,
}

impl TileDetector {
    pub fn new(params: TileDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &TileDetectorParams {
        &self.params
    }

    /// Detect tiles and their neighbours.
    ///
    /// Returns an empty list when no contour passes the area filter; that is
    /// "no tiles on the table", not an error.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, mask), fields(width = mask.width, height = mask.height))
    )]
    pub fn detect(&self, mask: &GrayImageView<'_>) -> Vec<Tile> {
        let binary = threshold_binary(mask, self.params.mask_threshold);
        let (min_area, max_area) = self.params.area_window();

        let mut tiles = Vec::new();
        for contour in find_external_contours(&binary.view()) {
            let area = contour.area();
            if area < min_area || area > max_area {
                debug!(
                    "rejecting contour at {:?}: area {area:.0} outside [{min_area:.0}, {max_area:.0}]",
                    contour.bounding_rect()
                );
                continue;
            }
            tiles.push(Tile::new(tiles.len(), contour.bounding_rect()));
        }

        link_neighbors(&mut tiles, self.params.proximity_threshold);
        debug!(
            "detected {} tiles, {} open ends",
            tiles.len(),
            tiles.iter().filter(|t| t.is_open_end()).count()
        );
        tiles
    }
}

/// Detect tiles with default settings apart from area and proximity.
pub fn detect_tiles(mask: &GrayImageView<'_>, approx_area: f64, proximity_threshold: f64) -> Vec<Tile> {
    TileDetector::new(TileDetectorParams {
        approx_area,
        proximity_threshold,
        ..TileDetectorParams::default()
    })
    .detect(mask)
}

/// Fill neighbour lists; tiles with exactly one neighbour get its direction.
fn link_neighbors(tiles: &mut [Tile], threshold: f64) {
    let boxes: Vec<PixelRect> = tiles.iter().map(|t| t.bbox).collect();
    for (i, tile) in tiles.iter_mut().enumerate() {
        let adjacent: Vec<_> = boxes
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .filter_map(|(j, other)| are_adjacent(&boxes[i], other, threshold).map(|a| (j, a)))
            .collect();

        tile.neighbors = adjacent.iter().map(|&(j, _)| j).collect();
        tile.neighbor_count = adjacent.len();
        if let [(j, adjacency)] = adjacent[..] {
            let dir = relative_direction(&boxes[i], &boxes[j], adjacency);
            tile.neighbor_direction = Some(dir);
            tile.neighbor_index = Some(j);
            debug!("tile {i} is an open end, neighbour {j} on the {dir:?}");
        }
    }
}

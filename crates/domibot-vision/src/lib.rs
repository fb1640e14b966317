//! Domino perception: find tiles in an occupancy mask, work out which ones
//! are open ends, and read their pips.
//!
//! ```no_run
//! use domibot_core::GrayImage;
//! use domibot_vision::{BoardAnalyzer, PerceptionProfile};
//!
//! let gray = GrayImage::new(640, 320);
//! let mask = GrayImage::new(640, 320);
//! let analyzer = BoardAnalyzer::for_profile(PerceptionProfile::Simulated);
//! match analyzer.analyze_board(&gray.view(), &mask.view()) {
//!     Ok(state) => println!("open values: {:?}", state.open_values()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod board;
mod detector;
mod error;
mod mask;
mod params;
mod pips;
mod tile;

pub use board::{BoardAnalyzer, BoardState, ScoredTile};
pub use detector::{detect_tiles, TileDetector};
pub use error::VisionError;
pub use mask::{occupancy_mask, rgb_to_hsv};
pub use params::{
    MaskParams, PerceptionProfile, PipScorerParams, TileDetectorParams, VisionParams,
};
pub use pips::{PipReading, PipScorer, PipValue, MAX_PIPS};
pub use tile::{are_adjacent, relative_direction, Adjacency, Tile};

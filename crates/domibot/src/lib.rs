//! High-level facade for the domino-playing SCARA arm.
//!
//! This crate provides:
//! - re-exports of the underlying perception, placement and kinematics crates
//! - a [`Domibot`] that runs one turn end to end: analyse the board and the
//!   player's hand, then plan a chosen move down to joint angles
//! - a JSON [`DomibotConfig`] holding every calibration value
//! - (feature `image`) helpers that work from photos on disk
//!
//! ## Quickstart
//!
//! ```no_run
//! use domibot::{detect, Domibot, DomibotConfig, MoveRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bot = Domibot::new(DomibotConfig::default())?;
//! let report = detect::analyze_files(&bot, "board.png", "hand.png")?;
//!
//! if let Some(play) = report.playable.first() {
//!     let planned = bot.plan_move(
//!         &report.board,
//!         &MoveRequest {
//!             player_tile: play.pips,
//!             value: play.values[0],
//!             origin: None,
//!             direction: None,
//!             vertical_offset: 0.0,
//!         },
//!     )?;
//!     println!("{:?}", planned.joints);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `domibot::core`: image views, filters, contours, pixel rectangles.
//! - `domibot::vision`: tile detection, pip scoring, board analysis.
//! - `domibot::placement`: value matching and placement candidates.
//! - `domibot::kinematics`: SCARA forward model and inverse kinematics.
//! - `domibot::detect` (feature `image`): helpers from `image::RgbImage`.

pub use domibot_core as core;
pub use domibot_kinematics as kinematics;
pub use domibot_placement as placement;
pub use domibot_vision as vision;

pub use domibot_core::Direction;
pub use domibot_kinematics::{KinematicsRequest, KinematicsResult, SolverState};
pub use domibot_placement::PlacementCandidate;
pub use domibot_vision::{BoardState, PerceptionProfile, PipReading, PipValue, ScoredTile};

mod config;
mod error;
mod turn;

pub use config::{ConfigError, DomibotConfig};
pub use error::DomibotError;
pub use turn::{Domibot, MoveRequest, PlannedMove, PlayableTile, TurnReport};

#[cfg(feature = "image")]
pub mod detect;

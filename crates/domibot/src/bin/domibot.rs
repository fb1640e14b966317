//! domibot CLI: analyse table photos, plan moves and solve arm joints.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use domibot::{
    detect, Direction, Domibot, DomibotConfig, KinematicsRequest, MoveRequest, PerceptionProfile,
    PlannedMove, TurnReport,
};
use serde::Serialize;

#[cfg(not(feature = "tracing"))]
use log::info;

#[cfg(feature = "tracing")]
use tracing::info;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "domibot")]
#[command(
    about = "Domino-playing SCARA arm: tile perception, placement planning and inverse kinematics"
)]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and score the board and hand tiles.
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Analyse the table, then plan one move down to joint angles.
    Play {
        #[command(flatten)]
        input: InputArgs,

        /// Hand tile to play (index from the left).
        #[arg(long)]
        hand_index: usize,

        /// Value on that tile to connect with; the first playable one when omitted.
        #[arg(long)]
        value: Option<u8>,

        /// Board tile index to play against.
        #[arg(long)]
        origin: Option<usize>,

        /// Side of the origin tile to lay the new tile on.
        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,

        /// Current prismatic joint extension in metres.
        #[arg(long, default_value = "0.0")]
        d3: f64,
    },

    /// Solve joint angles for one table target.
    Solve {
        /// Target x in metres.
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Target y in metres.
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Tool yaw in degrees.
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        yaw: f64,

        /// Tool roll in degrees.
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        roll: f64,

        /// Current prismatic joint extension in metres.
        #[arg(long, default_value = "0.0")]
        d3: f64,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print a complete configuration file for a profile.
    DefaultConfig {
        #[arg(long, value_enum, default_value_t = ProfileArg::Simulated)]
        profile: ProfileArg,

        /// Write to this path instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// JSON config file; defaults for `--profile` when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ProfileArg::Simulated)]
    profile: ProfileArg,
}

#[derive(Debug, Clone, Args)]
struct InputArgs {
    /// Board photo.
    #[arg(long, requires = "hand", conflicts_with = "frame")]
    board: Option<PathBuf>,

    /// Hand photo.
    #[arg(long, requires = "board")]
    hand: Option<PathBuf>,

    /// Single photo with the board above the hand.
    #[arg(long, required_unless_present = "board")]
    frame: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    Simulated,
    Physical,
}

impl From<ProfileArg> for PerceptionProfile {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::Simulated => PerceptionProfile::Simulated,
            ProfileArg::Physical => PerceptionProfile::Physical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    Left,
    Right,
    Top,
    Bottom,
}

impl From<DirectionArg> for Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
            DirectionArg::Top => Direction::Top,
            DirectionArg::Bottom => Direction::Bottom,
        }
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Analyze { input } => run_analyze(&input),
        Commands::Play {
            input,
            hand_index,
            value,
            origin,
            direction,
            d3,
        } => run_play(
            &input,
            hand_index,
            value,
            origin,
            direction.map(Direction::from),
            d3,
        ),
        Commands::Solve {
            x,
            y,
            yaw,
            roll,
            d3,
            config,
        } => run_solve(&config, x, y, yaw, roll, d3),
        Commands::DefaultConfig { profile, out } => {
            let cfg = DomibotConfig::for_profile(profile.into());
            emit(&cfg, out.as_deref())
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8) -> CliResult<()> {
    domibot::core::init_with_level(domibot::core::verbosity_level(verbose))?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: u8) -> CliResult<()> {
    tracing_log::LogTracer::init()?;
    domibot::core::init_tracing(domibot::core::verbosity_level(verbose), false);
    Ok(())
}

fn load_config(args: &ConfigArgs) -> CliResult<DomibotConfig> {
    let cfg = match &args.config {
        Some(path) => {
            info!("loading config {}", path.display());
            DomibotConfig::load_json(path)?
        }
        None => DomibotConfig::for_profile(args.profile.into()),
    };
    Ok(cfg)
}

fn analyze(bot: &Domibot, input: &InputArgs) -> CliResult<TurnReport> {
    let report = match (&input.frame, &input.board, &input.hand) {
        (Some(frame), _, _) => detect::analyze_frame_image(bot, &detect::load_rgb(frame)?)?,
        (None, Some(board), Some(hand)) => detect::analyze_files(bot, board, hand)?,
        _ => return Err("pass --frame or both --board and --hand".into()),
    };
    Ok(report)
}

fn run_analyze(input: &InputArgs) -> CliResult<()> {
    let bot = Domibot::new(load_config(&input.config)?)?;
    let report = analyze(&bot, input)?;
    emit(&report, input.out.as_deref())
}

#[derive(Serialize)]
struct PlayReport {
    report: TurnReport,
    planned: PlannedMove,
}

fn run_play(
    input: &InputArgs,
    hand_index: usize,
    value: Option<u8>,
    origin: Option<usize>,
    direction: Option<Direction>,
    d3: f64,
) -> CliResult<()> {
    let mut bot = Domibot::new(load_config(&input.config)?)?;
    let report = analyze(&bot, input)?;

    let tile = report
        .hand
        .get(hand_index)
        .ok_or_else(|| format!("hand has {} tiles, no index {hand_index}", report.hand.len()))?;
    let value = match value {
        Some(v) => v,
        None => report
            .playable
            .iter()
            .find(|p| p.hand_index == hand_index)
            .and_then(|p| p.values.first().copied())
            .ok_or_else(|| format!("hand tile {hand_index} matches no open end"))?,
    };

    let planned = bot.plan_move(
        &report.board,
        &MoveRequest {
            player_tile: tile.pips,
            value,
            origin,
            direction,
            vertical_offset: d3,
        },
    )?;
    emit(&PlayReport { report, planned }, input.out.as_deref())
}

fn run_solve(config: &ConfigArgs, x: f64, y: f64, yaw: f64, roll: f64, d3: f64) -> CliResult<()> {
    let mut bot = Domibot::new(load_config(config)?)?;
    let joints = bot.solve(&KinematicsRequest {
        tool_x: x,
        tool_y: y,
        yaw_degrees: yaw,
        roll_degrees: roll,
        fixed_vertical_offset: d3,
    })?;
    emit(&joints, None)
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

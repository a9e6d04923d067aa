//! Command-line interface of the replay host.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "swarm-native")]
#[command(about = "Replay recorded stroke events through the particle swarm", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Event log: one `{"frame": N, "message": {...}}` JSON object per line
    #[arg(short, long)]
    pub events: Option<PathBuf>,

    /// Swarm configuration as JSON; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate (default: last event frame plus a settle period)
    #[arg(short, long)]
    pub frames: Option<u64>,

    /// Seed for every random decision of the swarm
    #[arg(short, long, default_value_t = 1)]
    pub seed: u64,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Write the last frame as an SVG file
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Log the playback cursor of the most recent shape every second
    #[arg(long)]
    pub trace: bool,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

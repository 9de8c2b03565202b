//! Command-line argument parsing for the orrery viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Animated solar system viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of backdrop stars.
    #[arg(long)]
    pub star_count: Option<u32>,

    /// Path to the background audio track.
    #[arg(long)]
    pub audio: Option<String>,

    /// Disable background audio.
    #[arg(long)]
    pub mute: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(stars) = args.star_count {
            self.sky.star_count = stars;
        }
        if let Some(ref track) = args.audio {
            self.audio.track = track.clone();
        }
        if args.mute {
            self.audio.muted = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

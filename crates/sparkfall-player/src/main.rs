//! Sparkfall Player - standalone binary
//!
//! Usage:
//!   sparkfall-player [--config <path>] [--fullscreen] [--width W --height H]

use anyhow::Result;
use clap::Parser;
use sparkfall_player::PlayerOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sparkfall-player")]
#[command(about = "Click to launch bursts of bouncing, glowing particles")]
struct Args {
    /// Path to a config file (defaults to the per-user config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Initial window width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "720")]
    height: u32,
}

fn main() -> Result<()> {
    sparkfall_player::init_tracing();
    let args = Args::parse();

    let config = sparkfall_player::load_config(args.config.as_deref())?;
    sparkfall_player::run(
        config,
        PlayerOptions {
            fullscreen: args.fullscreen,
            width: args.width,
            height: args.height,
        },
    )
}

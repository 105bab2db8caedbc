//! Play command - opens the interactive window

use anyhow::Result;
use sparkfall_player::PlayerOptions;
use std::path::PathBuf;

pub struct PlayArgs {
    pub config: Option<PathBuf>,
    pub fullscreen: bool,
    pub width: u32,
    pub height: u32,
}

pub fn run(args: PlayArgs) -> Result<()> {
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

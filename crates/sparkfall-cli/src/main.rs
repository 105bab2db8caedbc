//! Sparkfall CLI - run, render, and configure the particle animation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, play, render};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sparkfall")]
#[command(about = "Interactive particle bursts with floor bounce, reflections and glow", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive window
    Play {
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
    },

    /// Simulate a fixed number of frames and save the last one as PNG (headless)
    Render {
        /// Path to a config file (defaults to built-in settings)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output image path
        #[arg(short, long, default_value = "sparkfall.png")]
        output: PathBuf,

        /// Image width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "720")]
        height: u32,

        /// Number of frames to simulate
        #[arg(long, default_value = "90")]
        frames: u32,

        /// Number of bursts spread over the run
        #[arg(long, default_value = "6")]
        bursts: u32,

        /// Seed for the value source
        #[arg(long, default_value = "1")]
        seed: u32,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Print the default config, or write it to a file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    sparkfall_player::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            fullscreen,
            width,
            height,
        } => play::run(play::PlayArgs {
            config,
            fullscreen,
            width,
            height,
        }),
        Commands::Render {
            config,
            output,
            width,
            height,
            frames,
            bursts,
            seed,
            format,
        } => render::run(render::RenderArgs {
            config,
            output,
            width,
            height,
            frames,
            bursts,
            seed,
            format,
        }),
        Commands::Config { output } => config::run(output.as_deref()),
    }
}

//! Sparkfall Player - windowed host for the animation driver
//!
//! This crate provides the `PlayerApp` application handler, which feeds
//! window input to an `AnimationDriver` and presents its frames with wgpu.

mod hud;
mod player_app;

pub use player_app::{PlayerApp, PlayerOptions};

use anyhow::{Context, Result};
use sparkfall_core::SimConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

/// `<config_dir>/sparkfall/config.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sparkfall").join("config.toml"))
}

/// Load the config at `path`, or the per-user default location.
/// Only a missing per-user file falls back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match default_config_path() {
            Some(path) => SimConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(SimConfig::default()),
        },
    }
}

/// Install the fmt subscriber; `RUST_LOG` overrides the `info` default
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open a window and run until it is closed
pub fn run(config: SimConfig, options: PlayerOptions) -> Result<()> {
    println!("Controls:");
    println!("  Click/Tap - Burst");
    println!("  T         - Cycle particle count");
    println!("  F         - Toggle floor");
    println!("  R         - Toggle reflections");
    println!("  G         - Toggle glow");
    println!("  P         - Toggle persistent strokes");
    println!("  A         - Toggle auto bursts");
    println!("  C         - Clear canvas");
    println!("  F11       - Toggle fullscreen");
    println!("  Escape    - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(config, options);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_config_is_an_error() {
        let path = std::env::temp_dir().join("sparkfall-player-missing-config.toml");
        let _ = std::fs::remove_file(&path);
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("sparkfall-player-missing-config.toml"));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let path = std::env::temp_dir().join("sparkfall-player-config.toml");
        std::fs::write(&path, "tier = \"high\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.tier, sparkfall_core::BurstTier::High);
        let _ = std::fs::remove_file(&path);
    }
}

//! Sparkfall Core - Foundational types for the sparkfall particle toy
//!
//! This crate provides the types every other sparkfall crate depends on:
//! - `SimConfig` - physics constants, feature flags, and user commands
//! - `Viewport`, `Color` - drawing area and HSL color conversion
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{
    AutoBurstConfig, BurstTier, Command, CommandEffect, FeatureFlags, GlowConfig, ParticleShape,
    SimConfig, MAX_BLUR_PASSES, MAX_BLUR_RADIUS,
};
pub use error::{Result, SparkfallError};
pub use types::{Color, Viewport};

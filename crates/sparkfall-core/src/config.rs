//! Simulation configuration: physics constants, feature flags, and user commands
//!
//! A `SimConfig` is passed by reference to every component that reads it;
//! there is no process-wide state. Commands flip one setting each and take
//! effect on the next tick.

use crate::error::{Result, SparkfallError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Particles-per-burst tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstTier {
    Low,
    #[default]
    Medium,
    High,
    Extreme,
}

impl BurstTier {
    pub fn particle_count(self) -> usize {
        match self {
            BurstTier::Low => 50,
            BurstTier::Medium => 100,
            BurstTier::High => 200,
            BurstTier::Extreme => 400,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BurstTier::Low => BurstTier::Medium,
            BurstTier::Medium => BurstTier::High,
            BurstTier::High => BurstTier::Extreme,
            BurstTier::Extreme => BurstTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BurstTier::Low => "low",
            BurstTier::Medium => "medium",
            BurstTier::High => "high",
            BurstTier::Extreme => "extreme",
        }
    }
}

/// How a particle is drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleShape {
    /// Anti-aliased stroke from the previous to the current position
    #[default]
    Stroke,
    /// Filled square at the current position
    Square,
}

/// Runtime-togglable boolean features
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Skip the full-surface clear each frame so strokes accumulate
    pub persist_strokes: bool,
    /// Gravity, bounce and ground physics
    pub enable_floor: bool,
    /// Blurred additive compositing pass
    pub enable_glow: bool,
    /// Mirrored strokes below particles close to the ground
    pub enable_reflections: bool,
    /// Timer-driven bursts at random positions
    pub auto_bursts: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            persist_strokes: false,
            enable_floor: true,
            enable_glow: true,
            enable_reflections: true,
            auto_bursts: false,
        }
    }
}

/// Interval range for auto-triggered bursts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoBurstConfig {
    pub min_interval_ms: f32,
    pub max_interval_ms: f32,
}

impl Default for AutoBurstConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 350.0,
            max_interval_ms: 1100.0,
        }
    }
}

/// Largest accepted `glow.blur_radius`
pub const MAX_BLUR_RADIUS: u32 = 64;
/// Largest accepted `glow.passes`
pub const MAX_BLUR_PASSES: u32 = 8;

/// Glow post-effect parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub blur_radius: u32,
    /// Box blur passes; two approximate a gaussian
    pub passes: u32,
    pub brightness: f32,
    /// Alpha applied when the glow layer is added onto the frame
    pub strength: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            blur_radius: 4,
            passes: 2,
            brightness: 1.6,
            strength: 0.8,
        }
    }
}

/// A discrete user command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    CycleTier,
    ToggleFloor,
    ToggleReflections,
    ToggleGlow,
    TogglePersistStrokes,
    ToggleAutoBursts,
    ClearCanvas,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::CycleTier,
        Command::ToggleFloor,
        Command::ToggleReflections,
        Command::ToggleGlow,
        Command::TogglePersistStrokes,
        Command::ToggleAutoBursts,
        Command::ClearCanvas,
    ];
}

/// What the caller has to do after a command was applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandEffect {
    None,
    /// Particles-per-burst changed: every pooled group must be discarded
    ResetPool,
    /// All surfaces must be erased now
    ClearSurfaces,
}

/// Complete simulation configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tier: BurstTier,
    pub gravity: f32,
    pub air_resistance: f32,
    /// Height above ground below which a reflection is drawn, in CSS pixels
    pub reflection_threshold: f32,
    /// Device pixels per CSS pixel
    pub pixel_density: f32,
    pub shape: ParticleShape,
    pub background: [u8; 3],
    pub flags: FeatureFlags,
    pub auto_burst: AutoBurstConfig,
    pub glow: GlowConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tier: BurstTier::default(),
            gravity: 0.06,
            air_resistance: 0.02,
            reflection_threshold: 50.0,
            pixel_density: 1.0,
            shape: ParticleShape::default(),
            background: [6, 6, 12],
            flags: FeatureFlags::default(),
            auto_burst: AutoBurstConfig::default(),
            glow: GlowConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; a missing file is an `Io` error
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load an optional config file, such as the per-user default;
    /// a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("gravity", self.gravity)?;
        check_non_negative("air_resistance", self.air_resistance)?;
        check_non_negative("reflection_threshold", self.reflection_threshold)?;
        if !self.pixel_density.is_finite() || self.pixel_density <= 0.0 {
            return Err(SparkfallError::invalid("pixel_density", "must be positive"));
        }
        if self.air_resistance >= 1.0 {
            return Err(SparkfallError::invalid("air_resistance", "must be below 1.0"));
        }
        check_non_negative("auto_burst.min_interval_ms", self.auto_burst.min_interval_ms)?;
        check_non_negative("auto_burst.max_interval_ms", self.auto_burst.max_interval_ms)?;
        if self.auto_burst.min_interval_ms > self.auto_burst.max_interval_ms {
            return Err(SparkfallError::invalid(
                "auto_burst",
                "min_interval_ms exceeds max_interval_ms",
            ));
        }
        if self.glow.blur_radius > MAX_BLUR_RADIUS {
            return Err(SparkfallError::invalid(
                "glow.blur_radius",
                format!("must be at most {MAX_BLUR_RADIUS}"),
            ));
        }
        if self.glow.passes > MAX_BLUR_PASSES {
            return Err(SparkfallError::invalid(
                "glow.passes",
                format!("must be at most {MAX_BLUR_PASSES}"),
            ));
        }
        check_non_negative("glow.brightness", self.glow.brightness)?;
        check_non_negative("glow.strength", self.glow.strength)?;
        Ok(())
    }

    pub fn particles_per_burst(&self) -> usize {
        self.tier.particle_count()
    }

    /// Reflection threshold in device pixels
    pub fn scaled_reflection_threshold(&self) -> f32 {
        self.reflection_threshold * self.pixel_density
    }

    /// Apply a user command, flipping exactly one setting
    pub fn apply(&mut self, command: Command) -> CommandEffect {
        let flags = &mut self.flags;
        match command {
            Command::CycleTier => {
                self.tier = self.tier.next();
                return CommandEffect::ResetPool;
            }
            Command::ToggleFloor => flags.enable_floor = !flags.enable_floor,
            Command::ToggleReflections => flags.enable_reflections = !flags.enable_reflections,
            Command::ToggleGlow => flags.enable_glow = !flags.enable_glow,
            Command::TogglePersistStrokes => flags.persist_strokes = !flags.persist_strokes,
            Command::ToggleAutoBursts => flags.auto_bursts = !flags.auto_bursts,
            Command::ClearCanvas => return CommandEffect::ClearSurfaces,
        }
        CommandEffect::None
    }

    /// Whether the setting behind a command is currently on.
    /// Tier and clear have no on/off state and report false.
    pub fn is_enabled(&self, command: Command) -> bool {
        match command {
            Command::ToggleFloor => self.flags.enable_floor,
            Command::ToggleReflections => self.flags.enable_reflections,
            Command::ToggleGlow => self.flags.enable_glow,
            Command::TogglePersistStrokes => self.flags.persist_strokes,
            Command::ToggleAutoBursts => self.flags.auto_bursts,
            Command::CycleTier | Command::ClearCanvas => false,
        }
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SparkfallError::invalid(field, format!("must be finite and >= 0, got {value}")));
    }
    Ok(())
}

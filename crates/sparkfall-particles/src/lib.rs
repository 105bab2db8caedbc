//! Sparkfall Particles - pooled burst simulation
//!
//! Provides the CPU-side simulation behind every burst:
//! - `ValueSource` - pre-generated uniform values for the hot loop
//! - `Particle` - per-particle kinematics (airborne, bounce, grounded)
//! - `ParticleGroup` - fixed-size particle set reused across bursts
//! - `BurstPool` - idle-first reuse of groups, grows only under demand
//! - `RenderQueue` - per-frame list of groups handed to the renderer

pub mod group;
pub mod particle;
pub mod pool;
pub mod queue;
pub mod rand;

pub use group::ParticleGroup;
pub use particle::{Particle, ParticleState, BOUNCE_DAMPING, GROUND_CULL_RATIO};
pub use pool::{BurstOutcome, BurstPool};
pub use queue::RenderQueue;
pub use rand::{ValueSource, VALUE_COUNT};

//! Sparkfall Render - layered software renderer with a wgpu presenter
//!
//! Particles are rasterized on the CPU into straight-alpha RGBA surfaces
//! (draw, reflection, glow, visible). The assembled frame is either saved
//! as a PNG or uploaded to a texture and drawn to a window by
//! `PresentPipeline`.

mod context;
pub mod effect;
mod present;
pub mod renderer;
pub mod surface;

pub use context::{RenderContext, RenderError};
pub use effect::{GlowEffect, PostEffect};
pub use present::PresentPipeline;
pub use renderer::{RenderStats, Renderer, REFLECTION_ALPHA};
pub use surface::{BlendMode, Surface};

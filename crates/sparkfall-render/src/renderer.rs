//! Layered renderer: strokes, floor reflections and glow
//!
//! Particles are drawn into a hidden draw surface and a reflection surface.
//! Each frame the visible surface is rebuilt from the background, the
//! reflection layer and the draw layer, then optionally the glow overlay.

use crate::effect::{GlowEffect, PostEffect};
use crate::surface::{BlendMode, Surface};
use sparkfall_core::{Color, ParticleShape, SimConfig};
use sparkfall_particles::{BurstPool, Particle, ParticleGroup, RenderQueue};

/// Peak opacity of a reflection touching the floor
pub const REFLECTION_ALPHA: f32 = 0.5;

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub groups_drawn: usize,
    pub particles_drawn: usize,
    pub reflections_drawn: usize,
}

pub struct Renderer {
    draw: Surface,
    reflection: Surface,
    /// Reflection and draw layers merged on transparent, the glow source
    layers: Surface,
    glow: Surface,
    visible: Surface,
    queue: RenderQueue,
    effect: Box<dyn PostEffect>,
}

impl Renderer {
    pub fn new(width: u32, height: u32, config: &SimConfig) -> Self {
        Self {
            draw: Surface::new(width, height),
            reflection: Surface::new(width, height),
            layers: Surface::new(width, height),
            glow: Surface::new(width, height),
            visible: Surface::new(width, height),
            queue: RenderQueue::new(),
            effect: Box::new(GlowEffect::from_config(&config.glow)),
        }
    }

    /// Replace the glow pass
    pub fn with_effect(mut self, effect: Box<dyn PostEffect>) -> Self {
        self.effect = effect;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.visible.width(), self.visible.height())
    }

    /// Recreate every surface at the new size and forget queued groups
    pub fn resize(&mut self, width: u32, height: u32) {
        self.draw = Surface::new(width, height);
        self.reflection = Surface::new(width, height);
        self.layers = Surface::new(width, height);
        self.glow = Surface::new(width, height);
        self.visible = Surface::new(width, height);
        self.queue.clear();
        tracing::debug!(width, height, "renderer resized");
    }

    /// Erase all layers
    pub fn clear(&mut self) {
        self.draw.clear();
        self.reflection.clear();
        self.layers.clear();
        self.glow.clear();
        self.visible.clear();
    }

    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut RenderQueue {
        &mut self.queue
    }

    /// The assembled frame from the last `render` call
    pub fn frame(&self) -> &Surface {
        &self.visible
    }

    /// Mutable access to the assembled frame for overlays drawn after `render`
    pub fn frame_mut(&mut self) -> &mut Surface {
        &mut self.visible
    }

    /// Draw every queued group, drain the queue, and rebuild the visible frame
    pub fn render(&mut self, pool: &BurstPool, config: &SimConfig) -> RenderStats {
        let mut stats = RenderStats::default();

        if !config.flags.persist_strokes {
            self.draw.clear();
            self.reflection.clear();
        }

        let mut queue = std::mem::take(&mut self.queue);
        for slot in queue.drain() {
            if let Some(group) = pool.group(slot) {
                self.draw_group(group, config, &mut stats);
            }
        }
        self.queue = queue;

        self.compose(config);
        stats
    }

    fn draw_group(&mut self, group: &ParticleGroup, config: &SimConfig, stats: &mut RenderStats) {
        let reflect = config.flags.enable_floor && config.flags.enable_reflections;
        let threshold = config.scaled_reflection_threshold();
        let mut drew_any = false;

        for particle in group.particles().iter().filter(|p| p.is_alive()) {
            let color = group.color_for(particle);
            let mode = blend_for(particle);
            draw_particle(
                &mut self.draw,
                particle,
                particle_path(particle),
                color,
                mode,
                config.shape,
            );
            stats.particles_drawn += 1;
            drew_any = true;

            if reflect && threshold > 0.0 {
                let height = particle.height_above_ground();
                if height < threshold {
                    let alpha = REFLECTION_ALPHA * (1.0 - height / threshold);
                    draw_particle(
                        &mut self.reflection,
                        particle,
                        mirrored_path(particle),
                        color.with_alpha(alpha),
                        mode,
                        config.shape,
                    );
                    stats.reflections_drawn += 1;
                }
            }
        }

        if drew_any {
            stats.groups_drawn += 1;
        }
    }

    fn compose(&mut self, config: &SimConfig) {
        let [r, g, b] = config.background;
        self.visible.fill(Color::rgb(r, g, b));
        self.visible.composite(&self.reflection, BlendMode::SourceOver, 1.0);
        self.visible.composite(&self.draw, BlendMode::SourceOver, 1.0);

        if config.flags.enable_glow {
            // Glow comes from the particles only, never the backdrop
            self.layers.clear();
            self.layers.composite(&self.reflection, BlendMode::SourceOver, 1.0);
            self.layers.composite(&self.draw, BlendMode::SourceOver, 1.0);
            self.effect.compose(&self.layers, &mut self.glow);
            self.visible
                .composite(&self.glow, BlendMode::Additive, config.glow.strength);
        }
    }
}

/// Particles moving away from the viewer are drawn behind existing strokes
fn blend_for(particle: &Particle) -> BlendMode {
    if particle.z_speed < 0.0 {
        BlendMode::DestinationOver
    } else {
        BlendMode::SourceOver
    }
}

type Segment = ((f32, f32), (f32, f32));

fn particle_path(p: &Particle) -> Segment {
    ((p.prev_x, p.prev_y), (p.x, p.y))
}

/// Mirror the path about each endpoint's ground line: y' = y + 2(z - y)
fn mirrored_path(p: &Particle) -> Segment {
    let mirror = |y: f32, z: f32| y + 2.0 * (z - y);
    ((p.prev_x, mirror(p.prev_y, p.prev_z)), (p.x, mirror(p.y, p.z)))
}

fn draw_particle(
    surface: &mut Surface,
    particle: &Particle,
    (from, to): Segment,
    color: Color,
    mode: BlendMode,
    shape: ParticleShape,
) {
    match shape {
        ParticleShape::Stroke => surface.stroke_line(from, to, particle.size, color, mode),
        ParticleShape::Square => surface.fill_square(to.0, to.1, particle.size, color, mode),
    }
}

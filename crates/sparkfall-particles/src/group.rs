//! A burst: a fixed set of particles sharing one origin and hue

use crate::particle::Particle;
use crate::queue::RenderQueue;
use crate::rand::ValueSource;
use sparkfall_core::{Color, SimConfig, Viewport};

/// Fixed-size particle set reused across bursts.
///
/// Particles are allocated once in `new`; every later burst goes through
/// `respawn`, which re-randomizes them in place.
pub struct ParticleGroup {
    slot: usize,
    x: f32,
    y: f32,
    hue: u16,
    particles: Vec<Particle>,
    rendering: bool,
}

impl ParticleGroup {
    /// Allocate a group of `count` particles and fire its first burst at (x, y)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        slot: usize,
        x: f32,
        y: f32,
        count: usize,
        values: &mut ValueSource,
        config: &SimConfig,
        viewport: &Viewport,
        queue: &mut RenderQueue,
    ) -> Self {
        let mut group = Self {
            slot,
            x,
            y,
            hue: 0,
            particles: vec![Particle::new(x, y); count],
            rendering: false,
        };
        group.respawn(x, y, values, config, viewport, queue);
        group
    }

    pub fn recalculate_hue(&mut self, values: &mut ValueSource) {
        self.hue = ((values.value() * 360.0) as u16).min(359);
    }

    /// Move the origin and snap every particle to it
    pub fn reposition_group(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        for particle in &mut self.particles {
            particle.set_position(x, y);
        }
        self.rendering = true;
    }

    /// Re-enter the group as a new burst at (x, y)
    pub fn respawn(
        &mut self,
        x: f32,
        y: f32,
        values: &mut ValueSource,
        config: &SimConfig,
        viewport: &Viewport,
        queue: &mut RenderQueue,
    ) {
        self.recalculate_hue(values);
        self.reposition_group(x, y);
        self.queue_for_render(queue);
        for particle in &mut self.particles {
            particle.reset_values(values, config, viewport);
        }
    }

    /// Step every live particle; retire the group once none were alive
    pub fn step_particles(&mut self, delta: f32, config: &SimConfig, viewport: &Viewport) {
        let mut any_alive = false;
        for particle in &mut self.particles {
            if particle.is_alive() {
                any_alive = true;
                particle.step(delta, config, viewport);
            }
        }
        if !any_alive {
            self.rendering = false;
        }
    }

    pub fn queue_for_render(&self, queue: &mut RenderQueue) {
        queue.push(self.slot);
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    /// Stroke color for one of this group's particles
    pub fn color_for(&self, particle: &Particle) -> Color {
        Color::from_hsl(self.hue as f32, 100.0, particle.lightness)
    }
}

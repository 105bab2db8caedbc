//! Burst pool: reuses idle groups before allocating new ones

use crate::group::ParticleGroup;
use crate::queue::RenderQueue;
use crate::rand::ValueSource;
use sparkfall_core::{SimConfig, Viewport};

/// Result of a burst request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstOutcome {
    /// An idle group in this slot was respawned
    Reused(usize),
    /// Every group was active; a new one was appended at this slot
    Allocated(usize),
}

impl BurstOutcome {
    pub fn slot(self) -> usize {
        match self {
            BurstOutcome::Reused(slot) | BurstOutcome::Allocated(slot) => slot,
        }
    }
}

/// Growable arena of particle groups addressed by slot.
///
/// Groups are never removed individually; the pool only grows until it
/// covers the number of bursts alive at once, then recycles.
pub struct BurstPool {
    groups: Vec<ParticleGroup>,
    particles_per_burst: usize,
}

impl BurstPool {
    pub fn new(particles_per_burst: usize) -> Self {
        Self {
            groups: Vec::new(),
            particles_per_burst,
        }
    }

    /// Fire a burst at (x, y), respawning the first idle group if any
    pub fn request_burst(
        &mut self,
        x: f32,
        y: f32,
        values: &mut ValueSource,
        config: &SimConfig,
        viewport: &Viewport,
        queue: &mut RenderQueue,
    ) -> BurstOutcome {
        if let Some(group) = self.groups.iter_mut().find(|g| !g.is_rendering()) {
            group.respawn(x, y, values, config, viewport, queue);
            return BurstOutcome::Reused(group.slot());
        }

        let slot = self.groups.len();
        self.groups.push(ParticleGroup::new(
            slot,
            x,
            y,
            self.particles_per_burst,
            values,
            config,
            viewport,
            queue,
        ));
        tracing::debug!(slot, particles = self.particles_per_burst, "allocated particle group");
        BurstOutcome::Allocated(slot)
    }

    /// Drop every group and change the burst size
    pub fn reset(&mut self, particles_per_burst: usize) {
        tracing::info!(
            discarded = self.groups.len(),
            particles_per_burst,
            "resetting burst pool"
        );
        self.groups.clear();
        self.particles_per_burst = particles_per_burst;
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn particles_per_burst(&self) -> usize {
        self.particles_per_burst
    }

    pub fn group(&self, slot: usize) -> Option<&ParticleGroup> {
        self.groups.get(slot)
    }

    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [ParticleGroup] {
        &mut self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.groups.iter().filter(|g| g.is_rendering()).count()
    }

    pub fn live_particles(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.is_rendering())
            .map(|g| g.live_count())
            .sum()
    }
}

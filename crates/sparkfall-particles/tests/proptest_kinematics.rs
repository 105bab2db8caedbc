//! Property-based invariant tests for particle kinematics.
//!
//! 1. A freshly reset particle is alive, airborne, and has prev == current.
//! 2. Once dead, a particle never moves again until reset.
//! 3. With the floor enabled, a grounded particle sits exactly on its ground depth.
//! 4. Positions stay finite for any finite delta.

use proptest::prelude::*;
use sparkfall_core::{SimConfig, Viewport};
use sparkfall_particles::{BurstPool, Particle, ParticleState, RenderQueue, ValueSource};

const VIEWPORT: Viewport = Viewport::new(1024.0, 768.0);

fn spawn(seed: u32, x: f32, y: f32) -> Particle {
    let mut values = ValueSource::with_seed(seed);
    let mut p = Particle::new(x, y);
    p.reset_values(&mut values, &SimConfig::default(), &VIEWPORT);
    p
}

proptest! {
    #[test]
    fn reset_values_revives(seed in any::<u32>(), x in 0f32..1024.0, y in 0f32..768.0) {
        let p = spawn(seed, x, y);
        prop_assert!(p.lifetime > 0.0);
        prop_assert!(p.airborne);
        prop_assert_eq!((p.prev_x, p.prev_y, p.prev_z), (p.x, p.y, p.z));
        prop_assert!(p.z >= p.y);
    }

    #[test]
    fn dead_particles_stay_put(
        seed in any::<u32>(),
        x in 1f32..1023.0,
        y in 1f32..767.0,
        deltas in prop::collection::vec(0.1f32..4.0, 1..200),
    ) {
        let config = SimConfig::default();
        let mut p = spawn(seed, x, y);
        let mut frozen: Option<(f32, f32, f32)> = None;
        for delta in deltas {
            p.step(delta, &config, &VIEWPORT);
            if let Some(pos) = frozen {
                prop_assert_eq!((p.x, p.y, p.z), pos);
            } else if !p.is_alive() {
                frozen = Some((p.x, p.y, p.z));
            }
        }
    }

    #[test]
    fn grounded_never_sinks(
        seed in any::<u32>(),
        x in 1f32..1023.0,
        y in 1f32..767.0,
        delta in 0.25f32..3.0,
        steps in 1usize..400,
    ) {
        let config = SimConfig::default();
        let mut p = spawn(seed, x, y);
        for _ in 0..steps {
            p.step(delta, &config, &VIEWPORT);
            if p.state() == ParticleState::Grounded {
                prop_assert!((p.y - p.z).abs() <= config.gravity);
            }
        }
    }

    #[test]
    fn positions_stay_finite(
        seed in any::<u32>(),
        deltas in prop::collection::vec(0f32..16.0, 1..100),
        floor in any::<bool>(),
    ) {
        let mut config = SimConfig::default();
        config.flags.enable_floor = floor;
        let mut p = spawn(seed, 512.0, 300.0);
        for delta in deltas {
            p.step(delta, &config, &VIEWPORT);
            prop_assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        }
    }

    #[test]
    fn pool_growth_matches_demand(bursts in 1usize..20, idle_every in 1usize..5) {
        let config = SimConfig::default();
        let mut values = ValueSource::with_seed(17);
        let mut queue = RenderQueue::new();
        let mut pool = BurstPool::new(8);

        for i in 0..bursts {
            let had_idle = pool.groups().iter().any(|g| !g.is_rendering());
            let before = pool.len();
            pool.request_burst(100.0, 100.0, &mut values, &config, &VIEWPORT, &mut queue);
            if had_idle {
                prop_assert_eq!(pool.len(), before);
            } else {
                prop_assert_eq!(pool.len(), before + 1);
            }

            if i % idle_every == 0 {
                let group = &mut pool.groups_mut()[0];
                for p in group.particles_mut() {
                    p.lifetime = 0.0;
                }
                group.step_particles(1.0, &config, &VIEWPORT);
            }
        }
    }
}

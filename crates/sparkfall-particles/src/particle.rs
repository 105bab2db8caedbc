//! Single particle state and kinematics
//!
//! With floor physics on, a live particle is either airborne (free fall
//! toward its ground depth `z`) or grounded (sliding along `z`). Crossing
//! the ground while airborne runs a bounce that may ground it. With floor
//! physics off every live particle uses flat integration.

use crate::rand::ValueSource;
use sparkfall_core::{SimConfig, Viewport};

/// Vertical speed multiplier applied on bounce
pub const BOUNCE_DAMPING: f32 = -0.6;
/// Grounded particles above this fraction of the viewport height are culled
pub const GROUND_CULL_RATIO: f32 = 0.72;

const LIFETIME_MIN: f32 = 60.0;
const LIFETIME_SPREAD: f32 = 30.0;
const LIGHTNESS_MIN: f32 = 45.0;
const LIGHTNESS_SPREAD: f32 = 55.0;
const SIZE_MIN: f32 = 1.0;
const SIZE_SPREAD: f32 = 2.0;
/// Ground depth lies between these fractions of the viewport height
const GROUND_NEAR: f32 = 4.0 / 5.0;
const GROUND_FAR: f32 = 2.0 / 3.0;
const X_SPEED_SPREAD: f32 = 10.0;
const Y_SPEED_MIN: f32 = -9.0;
const Y_SPEED_MAX: f32 = 3.0;
const Z_SPEED_SPREAD: f32 = 4.0;
/// Smallest vertical displacement the bounce proportion divides by
const MIN_BOUNCE_TRAVEL: f32 = 1e-6;

/// Kinematic state derived from a particle's fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
    Dead,
    Airborne,
    Grounded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub prev_x: f32,
    pub prev_y: f32,
    pub prev_z: f32,
    pub x_speed: f32,
    pub y_speed: f32,
    pub z_speed: f32,
    /// Remaining life in nominal frames; <= 0 means dead
    pub lifetime: f32,
    pub airborne: bool,
    pub size: f32,
    /// HSL lightness percentage
    pub lightness: f32,
}

impl Particle {
    /// A dead particle parked at the given position
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: y,
            prev_x: x,
            prev_y: y,
            prev_z: y,
            x_speed: 0.0,
            y_speed: 0.0,
            z_speed: 0.0,
            lifetime: 0.0,
            airborne: true,
            size: SIZE_MIN,
            lightness: LIGHTNESS_MIN,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    pub fn state(&self) -> ParticleState {
        if !self.is_alive() {
            ParticleState::Dead
        } else if self.airborne {
            ParticleState::Airborne
        } else {
            ParticleState::Grounded
        }
    }

    /// Distance between the particle and its ground depth
    #[inline]
    pub fn height_above_ground(&self) -> f32 {
        (self.z - self.y).abs()
    }

    /// Move the particle without touching speeds or lifetime
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.prev_x = x;
        self.prev_y = y;
        self.prev_z = self.z;
    }

    /// Re-roll every randomized attribute in place
    pub fn reset_values(&mut self, values: &mut ValueSource, config: &SimConfig, viewport: &Viewport) {
        let density = config.pixel_density;

        self.lifetime = LIFETIME_MIN + values.value() * LIFETIME_SPREAD;
        self.lightness = LIGHTNESS_MIN + values.value() * LIGHTNESS_SPREAD;
        self.size = (SIZE_MIN + values.value() * SIZE_SPREAD) * density;

        let ground = viewport.height * values.range(GROUND_NEAR, GROUND_FAR);
        self.z = ground.max(self.y);

        self.x_speed = (values.value() - 0.5) * X_SPEED_SPREAD * density;
        self.y_speed = values.range(Y_SPEED_MIN, Y_SPEED_MAX) * density;
        self.z_speed = (values.value() - 0.5) * Z_SPEED_SPREAD * density;

        self.airborne = true;
        self.prev_x = self.x;
        self.prev_y = self.y;
        self.prev_z = self.z;
    }

    /// Advance the particle by `delta` nominal frames
    pub fn step(&mut self, delta: f32, config: &SimConfig, viewport: &Viewport) {
        if !self.is_alive() || !delta.is_finite() || delta <= 0.0 {
            return;
        }

        self.lifetime -= delta;
        if self.lifetime <= 0.0 || viewport.is_outside(self.x, self.y) {
            self.lifetime = self.lifetime.min(0.0);
            return;
        }

        self.prev_x = self.x;
        self.prev_y = self.y;
        self.prev_z = self.z;

        if !config.flags.enable_floor {
            self.x += self.x_speed * delta;
            self.y += self.y_speed * delta;
            self.z += self.z_speed * delta;
        } else if self.airborne {
            self.step_airborne(delta, config);
        } else {
            self.step_grounded(delta, config, viewport);
        }

        if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
            self.x = self.prev_x;
            self.y = self.prev_y;
            self.z = self.prev_z;
            self.x_speed = 0.0;
            self.y_speed = 0.0;
            self.z_speed = 0.0;
        }
    }

    fn step_airborne(&mut self, delta: f32, config: &SimConfig) {
        let air = config.air_resistance * delta;
        let gravity = config.gravity * config.pixel_density;

        self.x_speed -= self.x_speed * air;
        self.y_speed += gravity * delta - self.y_speed * air;
        self.z_speed -= self.z_speed * air;

        let next_y = self.y + (self.y_speed + self.z_speed) * delta;
        let next_z = self.z + self.z_speed * delta;

        if next_y < next_z {
            self.x += self.x_speed * delta;
            self.y = next_y;
            self.z = next_z;
            return;
        }

        // Only the share of the step that reaches the ground moves x
        let travel = (self.y_speed * delta).abs();
        let proportion = if travel > MIN_BOUNCE_TRAVEL {
            ((self.y - self.z).abs() / travel).min(1.0)
        } else {
            0.0
        };

        self.x += self.x_speed * delta * proportion;
        self.z = next_z;
        self.y = self.z;
        self.y_speed *= BOUNCE_DAMPING;

        if self.y_speed.abs() < gravity {
            self.y_speed = 0.0;
            self.airborne = false;
        }
    }

    fn step_grounded(&mut self, delta: f32, config: &SimConfig, viewport: &Viewport) {
        let air = config.air_resistance * delta;

        self.x_speed -= self.x_speed * air;
        self.z_speed -= self.z_speed * air;

        self.x += self.x_speed * delta;
        self.z += self.z_speed * delta;
        self.y = self.z;

        if self.y < viewport.height * GROUND_CULL_RATIO {
            self.lifetime = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn fresh(x: f32, y: f32) -> (Particle, SimConfig) {
        let config = SimConfig::default();
        let mut values = ValueSource::with_seed(7);
        let mut p = Particle::new(x, y);
        p.reset_values(&mut values, &config, &VIEWPORT);
        (p, config)
    }

    #[test]
    fn reset_values_revives_particle() {
        let (p, _) = fresh(400.0, 300.0);
        assert!(p.lifetime > 0.0);
        assert!(p.airborne);
        assert_eq!((p.prev_x, p.prev_y, p.prev_z), (p.x, p.y, p.z));
        assert!(p.z >= p.y);
        assert!(p.size > 0.0);
        assert!((LIGHTNESS_MIN..=100.0).contains(&p.lightness));
    }

    #[test]
    fn ground_depth_never_above_spawn() {
        let (p, _) = fresh(400.0, 590.0);
        assert!(p.z >= 590.0);
    }

    #[test]
    fn flat_integration_without_floor() {
        let (mut p, mut config) = fresh(400.0, 300.0);
        config.flags.enable_floor = false;
        let (x, y, z) = (p.x, p.y, p.z);
        let (xs, ys, zs) = (p.x_speed, p.y_speed, p.z_speed);

        p.step(1.0, &config, &VIEWPORT);

        assert!((p.x - (x + xs)).abs() < 1e-4);
        assert!((p.y - (y + ys)).abs() < 1e-4);
        assert!((p.z - (z + zs)).abs() < 1e-4);
        assert_eq!((p.x_speed, p.y_speed, p.z_speed), (xs, ys, zs));
    }

    #[test]
    fn expiring_lifetime_culls() {
        let (mut p, config) = fresh(400.0, 300.0);
        p.lifetime = 1.0;
        p.step(1.0, &config, &VIEWPORT);
        assert!(p.lifetime <= 0.0);
        assert_eq!(p.state(), ParticleState::Dead);
    }

    #[test]
    fn dead_particle_does_not_move() {
        let (mut p, config) = fresh(400.0, 300.0);
        p.lifetime = 0.5;
        p.step(1.0, &config, &VIEWPORT);
        let pos = (p.x, p.y, p.z);
        for _ in 0..10 {
            p.step(1.0, &config, &VIEWPORT);
        }
        assert_eq!((p.x, p.y, p.z), pos);
    }

    #[test]
    fn out_of_viewport_culls() {
        let (mut p, config) = fresh(400.0, 300.0);
        p.x = -5.0;
        p.step(1.0, &config, &VIEWPORT);
        assert!(!p.is_alive());
    }

    #[test]
    fn step_snapshots_previous_position() {
        let (mut p, config) = fresh(400.0, 300.0);
        let before = (p.x, p.y, p.z);
        p.step(1.0, &config, &VIEWPORT);
        assert_eq!((p.prev_x, p.prev_y, p.prev_z), before);
    }

    #[test]
    fn airborne_applies_gravity_and_drag() {
        let (mut p, config) = fresh(400.0, 100.0);
        p.x_speed = 2.0;
        p.y_speed = -4.0;
        p.z_speed = 0.0;
        p.z = 500.0;
        p.step(1.0, &config, &VIEWPORT);

        let air = config.air_resistance;
        assert!((p.x_speed - (2.0 - 2.0 * air)).abs() < 1e-5);
        assert!((p.y_speed - (-4.0 + config.gravity + 4.0 * air)).abs() < 1e-5);
        assert!(p.airborne);
    }

    #[test]
    fn bounce_snaps_to_ground_and_inverts_speed() {
        let (mut p, config) = fresh(400.0, 499.0);
        p.z = 500.0;
        p.x_speed = 0.0;
        p.y_speed = 5.0;
        p.z_speed = 0.0;
        p.step(1.0, &config, &VIEWPORT);

        assert_eq!(p.y, p.z);
        assert!(p.y_speed < 0.0);
        assert!(p.airborne);
    }

    #[test]
    fn bounce_moves_x_by_proportion() {
        let (mut p, config) = fresh(400.0, 498.0);
        p.z = 500.0;
        p.x_speed = 10.0;
        p.y_speed = 8.0;
        p.z_speed = 0.0;
        p.step(1.0, &config, &VIEWPORT);

        let xs = 10.0 - 10.0 * config.air_resistance;
        let ys = 8.0 + config.gravity - 8.0 * config.air_resistance;
        let expected = 400.0 + xs * (2.0 / ys);
        assert!((p.x - expected).abs() < 1e-3);
    }

    #[test]
    fn slow_bounce_grounds_particle() {
        let (mut p, config) = fresh(400.0, 500.0);
        p.z = 500.0;
        p.x_speed = 1.0;
        p.y_speed = 0.0;
        p.z_speed = 0.0;
        p.step(1.0, &config, &VIEWPORT);

        assert!(!p.airborne);
        assert_eq!(p.state(), ParticleState::Grounded);
        assert_eq!(p.y_speed, 0.0);
    }

    #[test]
    fn grounded_particle_tracks_ground() {
        let (mut p, config) = fresh(400.0, 500.0);
        p.airborne = false;
        p.z = 500.0;
        p.y = 500.0;
        p.x_speed = 3.0;
        p.z_speed = 1.0;
        p.step(1.0, &config, &VIEWPORT);
        assert_eq!(p.y, p.z);
        assert!(p.x > 400.0);
        assert!(p.x_speed < 3.0);
    }

    #[test]
    fn grounded_particle_above_horizon_is_culled() {
        let (mut p, config) = fresh(400.0, 420.0);
        p.airborne = false;
        p.z = 420.0;
        p.y = 420.0;
        p.z_speed = -1.0;
        p.step(1.0, &config, &VIEWPORT);
        assert!(!p.is_alive());
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let (mut p, config) = fresh(400.0, 300.0);
        let before = p.clone();
        p.step(0.0, &config, &VIEWPORT);
        p.step(f32::NAN, &config, &VIEWPORT);
        assert_eq!(p, before);
    }

    #[test]
    fn non_finite_speed_does_not_poison_position() {
        let (mut p, config) = fresh(400.0, 300.0);
        p.x_speed = f32::INFINITY;
        p.step(1.0, &config, &VIEWPORT);
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        assert_eq!(p.x, 400.0);
    }

    #[test]
    fn disabling_floor_ignores_grounded_state() {
        let (mut p, mut config) = fresh(400.0, 500.0);
        p.airborne = false;
        config.flags.enable_floor = false;
        p.y_speed = -2.0;
        let y = p.y;
        let zs = p.z_speed;
        p.step(1.0, &config, &VIEWPORT);
        assert!((p.y - (y - 2.0)).abs() < 1e-4);
        assert_eq!(p.z_speed, zs);
    }
}

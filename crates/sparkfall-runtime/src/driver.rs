//! Animation driver: one simulate-and-render cycle per tick

use crate::clock::{FrameClock, TARGET_FRAME_MS};
use crate::event::InputEvent;
use crate::event_bus::EventBus;
use crate::input::ControlStrip;
use sparkfall_core::{Command, CommandEffect, SimConfig, Viewport};
use sparkfall_particles::{BurstOutcome, BurstPool, ValueSource};
use sparkfall_render::{RenderStats, Renderer, Surface};

/// Auto bursts spawn inside this fraction of the viewport width
const AUTO_BURST_X: (f32, f32) = (0.1, 0.9);
/// ...and this fraction of its height
const AUTO_BURST_Y: (f32, f32) = (0.1, 0.6);

/// Counters reported after every tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub delta: f32,
    pub pool_size: usize,
    pub active_groups: usize,
    pub live_particles: usize,
    pub render: RenderStats,
}

/// Owns the simulation state and advances it frame by frame
pub struct AnimationDriver {
    config: SimConfig,
    viewport: Viewport,
    values: ValueSource,
    pool: BurstPool,
    renderer: Renderer,
    clock: FrameClock,
    events: EventBus,
    controls: ControlStrip,
    /// Milliseconds until the next auto burst; None while disarmed
    auto_burst_in: Option<f32>,
}

impl AnimationDriver {
    pub fn new(config: SimConfig, width: u32, height: u32) -> Self {
        Self::with_values(config, width, height, ValueSource::new())
    }

    /// Driver with a caller-supplied value source, for reproducible runs
    pub fn with_values(config: SimConfig, width: u32, height: u32, values: ValueSource) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            viewport: Viewport::new(width as f32, height as f32),
            pool: BurstPool::new(config.particles_per_burst()),
            renderer: Renderer::new(width, height, &config),
            controls: ControlStrip::new(config.pixel_density),
            clock: FrameClock::new(),
            events: EventBus::new(),
            auto_burst_in: None,
            values,
            config,
        }
    }

    /// Queue an input event for the next tick
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Run one full cycle for a display timestamp in milliseconds
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameStats {
        self.process_events();
        let delta = self.clock.advance(timestamp_ms);
        self.advance_frame(delta)
    }

    /// Simulate and render one frame with an explicit Δ
    pub fn advance_frame(&mut self, delta: f32) -> FrameStats {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        self.update_auto_bursts(delta);
        self.step_groups(delta);
        let render = self.renderer.render(&self.pool, &self.config);

        FrameStats {
            delta,
            pool_size: self.pool.len(),
            active_groups: self.pool.active_count(),
            live_particles: self.pool.live_particles(),
            render,
        }
    }

    /// Spawn (or reuse) a group at (x, y)
    pub fn request_burst(&mut self, x: f32, y: f32) -> BurstOutcome {
        self.pool.request_burst(
            x,
            y,
            &mut self.values,
            &self.config,
            &self.viewport,
            self.renderer.queue_mut(),
        )
    }

    /// Apply a command immediately
    pub fn apply(&mut self, command: Command) {
        match self.config.apply(command) {
            CommandEffect::ResetPool => {
                self.renderer.queue_mut().clear();
                self.pool.reset(self.config.particles_per_burst());
                tracing::info!(tier = self.config.tier.label(), "burst tier changed");
            }
            CommandEffect::ClearSurfaces => {
                self.renderer.clear();
                tracing::debug!("canvas cleared");
            }
            CommandEffect::None => {
                tracing::info!(
                    command = ?command,
                    enabled = self.config.is_enabled(command),
                    "feature toggled"
                );
            }
        }
    }

    /// Hard reset for a new viewport size: surfaces recreated, pool emptied
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        self.viewport = Viewport::new(width as f32, height as f32);
        self.renderer.resize(width, height);
        self.pool.clear();
        tracing::info!(width, height, "viewport reset");
    }

    /// Change the pixel density (window scale factor)
    pub fn set_pixel_density(&mut self, density: f32) {
        if density.is_finite() && density > 0.0 {
            self.config.pixel_density = density;
            self.controls = ControlStrip::new(density);
        }
    }

    fn process_events(&mut self) {
        for event in self.events.drain() {
            match event {
                InputEvent::PointerDown { x, y } => match self.controls.hit(x, y) {
                    Some(command) => self.apply(command),
                    None => {
                        self.request_burst(x, y);
                    }
                },
                InputEvent::Command(command) => self.apply(command),
                InputEvent::Resize { width, height } => self.resize(width, height),
            }
        }
    }

    fn update_auto_bursts(&mut self, delta: f32) {
        if !self.config.flags.auto_bursts {
            self.auto_burst_in = None;
            return;
        }

        let remaining = match self.auto_burst_in {
            Some(ms) => ms - delta * TARGET_FRAME_MS as f32,
            None => self.next_auto_interval(),
        };
        if remaining > 0.0 {
            self.auto_burst_in = Some(remaining);
            return;
        }

        let x = self.viewport.width * self.values.range(AUTO_BURST_X.0, AUTO_BURST_X.1);
        let y = self.viewport.height * self.values.range(AUTO_BURST_Y.0, AUTO_BURST_Y.1);
        self.request_burst(x, y);
        self.auto_burst_in = Some(self.next_auto_interval());
    }

    fn next_auto_interval(&mut self) -> f32 {
        let range = &self.config.auto_burst;
        self.values.range(range.min_interval_ms, range.max_interval_ms)
    }

    fn step_groups(&mut self, delta: f32) {
        let config = &self.config;
        let viewport = &self.viewport;
        let queue = self.renderer.queue_mut();
        for group in self.pool.groups_mut().iter_mut().filter(|g| g.is_rendering()) {
            group.step_particles(delta, config, viewport);
            if group.is_rendering() {
                group.queue_for_render(queue);
            }
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pool(&self) -> &BurstPool {
        &self.pool
    }

    pub fn controls(&self) -> &ControlStrip {
        &self.controls
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn frame(&self) -> &Surface {
        self.renderer.frame()
    }

    pub fn frame_mut(&mut self) -> &mut Surface {
        self.renderer.frame_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkfall_core::BurstTier;

    fn driver() -> AnimationDriver {
        let mut config = SimConfig::default();
        config.tier = BurstTier::Low;
        config.flags.enable_glow = false;
        AnimationDriver::with_values(config, 320, 240, ValueSource::with_seed(11))
    }

    #[test]
    fn test_pointer_burst_applies_next_tick() {
        let mut driver = driver();
        driver.push_event(InputEvent::PointerDown { x: 160.0, y: 100.0 });
        assert_eq!(driver.pool().len(), 0);

        let stats = driver.tick(0.0);
        assert_eq!(stats.delta, 0.0);
        assert_eq!(stats.pool_size, 1);
        assert_eq!(stats.active_groups, 1);
        assert_eq!(stats.live_particles, 50);
        assert_eq!(stats.render.groups_drawn, 1);
    }

    #[test]
    fn test_pointer_on_controls_is_not_a_burst() {
        let mut driver = driver();
        let button = driver.controls().buttons()[1];
        assert_eq!(button.command, Command::ToggleFloor);

        driver.push_event(InputEvent::PointerDown {
            x: button.x + 1.0,
            y: button.y + 1.0,
        });
        driver.tick(0.0);
        assert_eq!(driver.pool().len(), 0);
        assert!(!driver.config().flags.enable_floor);
    }

    #[test]
    fn test_command_event_takes_effect_next_tick() {
        let mut driver = driver();
        driver.push_event(InputEvent::Command(Command::ToggleReflections));
        assert!(driver.config().flags.enable_reflections);
        driver.tick(0.0);
        assert!(!driver.config().flags.enable_reflections);
    }

    #[test]
    fn test_cycle_tier_resets_pool() {
        let mut driver = driver();
        driver.request_burst(50.0, 50.0);
        driver.request_burst(60.0, 50.0);
        assert_eq!(driver.pool().len(), 2);

        driver.apply(Command::CycleTier);
        assert_eq!(driver.config().tier, BurstTier::Medium);
        assert_eq!(driver.pool().len(), 0);
        assert!(driver.renderer().queue().is_empty());

        driver.request_burst(50.0, 50.0);
        assert_eq!(driver.pool().groups()[0].particles().len(), 100);
    }

    #[test]
    fn test_groups_retire_and_are_reused() {
        let mut driver = driver();
        driver.request_burst(160.0, 100.0);
        // Lifetimes top out at 90 frames
        for _ in 0..100 {
            driver.advance_frame(1.0);
        }
        let stats = driver.advance_frame(1.0);
        assert_eq!(stats.active_groups, 0);
        assert_eq!(stats.live_particles, 0);
        assert!(driver.renderer().queue().is_empty());

        let outcome = driver.request_burst(100.0, 100.0);
        assert_eq!(outcome, BurstOutcome::Reused(0));
        assert_eq!(driver.pool().len(), 1);
    }

    #[test]
    fn test_queue_empty_after_each_tick() {
        let mut driver = driver();
        driver.request_burst(160.0, 100.0);
        driver.request_burst(100.0, 100.0);
        for i in 0..5 {
            driver.tick(i as f64 * TARGET_FRAME_MS);
            assert!(driver.renderer().queue().is_empty());
        }
    }

    #[test]
    fn test_auto_bursts_spawn_inside_region() {
        let mut driver = driver();
        driver.apply(Command::ToggleAutoBursts);
        // Max interval 1100 ms is 66 frames
        for _ in 0..70 {
            driver.advance_frame(1.0);
        }
        assert!(!driver.pool().is_empty());
        let (x, y) = driver.pool().groups()[0].origin();
        assert!((32.0..=288.0).contains(&x), "x = {x}");
        assert!((24.0..=144.0).contains(&y), "y = {y}");
    }

    #[test]
    fn test_auto_bursts_off_by_default() {
        let mut driver = driver();
        for _ in 0..200 {
            driver.advance_frame(1.0);
        }
        assert!(driver.pool().is_empty());
    }

    #[test]
    fn test_resize_is_hard_reset() {
        let mut driver = driver();
        driver.request_burst(160.0, 100.0);
        driver.push_event(InputEvent::Resize {
            width: 640,
            height: 480,
        });
        let stats = driver.tick(0.0);
        assert_eq!(stats.pool_size, 0);
        assert_eq!(driver.viewport(), Viewport::new(640.0, 480.0));
        assert_eq!(driver.frame().width(), 640);
        assert_eq!(driver.frame().height(), 480);
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let mut driver = driver();
        driver.request_burst(160.0, 100.0);
        let before: Vec<_> = driver.pool().groups()[0]
            .particles()
            .iter()
            .map(|p| (p.x, p.y))
            .collect();
        let stats = driver.advance_frame(f32::NAN);
        assert_eq!(stats.delta, 0.0);
        let after: Vec<_> = driver.pool().groups()[0]
            .particles()
            .iter()
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_clear_canvas_blanks_persisted_frame() {
        let mut driver = driver();
        driver.apply(Command::TogglePersistStrokes);
        driver.request_burst(160.0, 100.0);
        for _ in 0..100 {
            driver.advance_frame(1.0);
        }
        let [r, g, b] = driver.config().background;
        let bg = sparkfall_core::Color::rgb(r, g, b);
        let lit = |d: &AnimationDriver| {
            d.frame()
                .as_bytes()
                .chunks(4)
                .any(|px| px[..3] != [bg.r, bg.g, bg.b])
        };
        // Every particle is dead but its trail persists
        assert_eq!(driver.pool().live_particles(), 0);
        assert!(lit(&driver));

        driver.apply(Command::ClearCanvas);
        driver.advance_frame(1.0);
        assert!(!lit(&driver));
    }
}

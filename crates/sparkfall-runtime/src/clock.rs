//! Frame clock converting display timestamps into a physics scale

/// Duration of one frame at the 60 Hz reference rate, in milliseconds
pub const TARGET_FRAME_MS: f64 = 1000.0 / 60.0;

/// Longest elapsed time a single tick may account for
pub const MAX_ELAPSED_MS: f64 = 250.0;

/// Turns monotonic timestamps into Δ, the elapsed time in reference frames.
///
/// Δ = 1 at exactly 60 Hz, 0.5 at 120 Hz. The first tick and any
/// non-monotonic or non-finite timestamp yield 0.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    /// Sum of accounted elapsed time in milliseconds
    pub total_ms: f64,
    /// Δ from the most recent `advance`
    pub delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `timestamp_ms` and return Δ
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        self.delta = self.elapsed_since_last(timestamp_ms) as f32;
        self.delta
    }

    fn elapsed_since_last(&mut self, timestamp_ms: f64) -> f64 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            return 0.0;
        };
        let elapsed = timestamp_ms - last;
        if elapsed <= 0.0 {
            return 0.0;
        }
        // Long stalls count as MAX_ELAPSED_MS
        let elapsed = elapsed.min(MAX_ELAPSED_MS);
        self.total_ms += elapsed;
        elapsed / TARGET_FRAME_MS
    }

    /// Forget the last timestamp; the next `advance` returns 0
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.0), 0.0);
        assert_eq!(clock.total_ms, 0.0);
    }

    #[test]
    fn test_sixty_hz_is_unit_delta() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let delta = clock.advance(TARGET_FRAME_MS);
        assert!((delta - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_high_refresh_halves_delta() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        let delta = clock.advance(100.0 + TARGET_FRAME_MS / 2.0);
        assert!((delta - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let delta = clock.advance(10_000.0);
        assert!((delta as f64 - MAX_ELAPSED_MS / TARGET_FRAME_MS).abs() < 1e-4);
        assert!((clock.total_ms - MAX_ELAPSED_MS).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_and_nan_timestamps() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        // Baseline moved to 400
        let delta = clock.advance(400.0 + TARGET_FRAME_MS);
        assert!((delta - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(16.0);
        clock.reset();
        assert_eq!(clock.advance(1000.0), 0.0);
    }
}

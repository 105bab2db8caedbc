//! Pre-generated uniform values served round-robin

use std::time::{SystemTime, UNIX_EPOCH};

/// Number of values generated up front
pub const VALUE_COUNT: usize = 65535;

/// Lightweight xorshift32 PRNG, only used to fill the value table
struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1) using the top 24 bits
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Cheap uniform draws for the per-frame hot loop.
///
/// The table is filled once at construction; `value()` only reads and
/// advances a cursor that wraps back to zero past the end.
pub struct ValueSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ValueSource {
    /// Create a source seeded from the system clock
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    /// Create a reproducible source
    pub fn with_seed(seed: u32) -> Self {
        Self::with_len(seed, VALUE_COUNT)
    }

    /// Create a reproducible source with a custom table length (at least 1)
    pub fn with_len(seed: u32, len: usize) -> Self {
        let mut rng = Xorshift32::new(seed);
        let values = (0..len.max(1)).map(|_| rng.next_f32()).collect();
        Self { values, cursor: 0 }
    }

    /// Next value in [0, 1)
    #[inline]
    pub fn value(&mut self) -> f32 {
        let v = self.values[self.cursor];
        self.cursor += 1;
        if self.cursor == self.values.len() {
            self.cursor = 0;
        }
        v
    }

    /// Next value in [min, max)
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.value() * (max - min)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for ValueSource {
    fn default() -> Self {
        Self::new()
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32).rotate_left(16))
        .unwrap_or(0xDEAD_BEEF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_in_unit_range() {
        let mut source = ValueSource::with_seed(42);
        for _ in 0..(VALUE_COUNT + 100) {
            let v = source.value();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn cursor_wraps_to_zero() {
        let mut source = ValueSource::with_len(7, 3);
        let first = source.value();
        source.value();
        source.value();
        assert_eq!(source.cursor(), 0);
        assert_eq!(source.value(), first);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ValueSource::with_seed(99);
        let mut b = ValueSource::with_seed(99);
        for _ in 0..100 {
            assert_eq!(a.value(), b.value());
        }
    }

    #[test]
    fn default_length_is_fixed() {
        let source = ValueSource::with_seed(1);
        assert_eq!(source.len(), VALUE_COUNT);
        assert_eq!(ValueSource::with_len(1, 0).len(), 1);
    }

    #[test]
    fn range_bounds() {
        let mut source = ValueSource::with_seed(5);
        for _ in 0..1000 {
            let v = source.range(-3.0, 3.0);
            assert!((-3.0..3.0).contains(&v));
        }
    }

    #[test]
    fn distribution_is_roughly_uniform() {
        let mut source = ValueSource::with_seed(1234);
        let mean: f32 = (0..10_000).map(|_| source.value()).sum::<f32>() / 10_000.0;
        assert!((mean - 0.5).abs() < 0.02);
    }
}

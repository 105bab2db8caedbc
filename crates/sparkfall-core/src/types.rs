//! Viewport and color types

use serde::{Deserialize, Serialize};

/// Pixel dimensions of the drawing area
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when the point lies outside the area particles may occupy.
    ///
    /// The top edge is open: particles launched upward may leave the view
    /// and fall back in.
    pub fn is_outside(&self, x: f32, y: f32) -> bool {
        x < 0.0 || x > self.width || y > self.height
    }
}

/// An RGBA color with straight (non-premultiplied) alpha, each channel 0-255
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from hue (degrees), saturation and lightness (percent)
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let v = unit_to_u8(l);
            return Self::rgb(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgb(
            unit_to_u8(hue_to_channel(p, q, h + 1.0 / 3.0)),
            unit_to_u8(hue_to_channel(p, q, h)),
            unit_to_u8(hue_to_channel(p, q, h - 1.0 / 3.0)),
        )
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 100.0, 50.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsl(120.0, 100.0, 50.0), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsl(240.0, 100.0, 50.0), Color::rgb(0, 0, 255));
    }

    #[test]
    fn test_hsl_lightness_extremes() {
        assert_eq!(Color::from_hsl(200.0, 100.0, 100.0), Color::WHITE);
        assert_eq!(Color::from_hsl(200.0, 100.0, 0.0), Color::BLACK);
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert_eq!(Color::from_hsl(360.0, 100.0, 50.0), Color::from_hsl(0.0, 100.0, 50.0));
        assert_eq!(Color::from_hsl(-120.0, 100.0, 50.0), Color::from_hsl(240.0, 100.0, 50.0));
    }

    #[test]
    fn test_viewport_bounds() {
        let vp = Viewport::new(100.0, 50.0);
        assert!(!vp.is_outside(10.0, 10.0));
        assert!(!vp.is_outside(10.0, -30.0));
        assert!(vp.is_outside(-1.0, 10.0));
        assert!(vp.is_outside(101.0, 10.0));
        assert!(vp.is_outside(10.0, 51.0));
    }
}

//! Full-surface post effects applied after the layers are assembled

use crate::surface::Surface;
use sparkfall_core::GlowConfig;

/// A pass that derives an overlay from the assembled frame.
///
/// `output` is overwritten; the renderer decides how to blend it back.
pub trait PostEffect {
    fn compose(&self, source: &Surface, output: &mut Surface);
}

/// Blurred, brightened copy of the frame
#[derive(Debug, Clone, PartialEq)]
pub struct GlowEffect {
    pub blur_radius: u32,
    pub passes: u32,
    pub brightness: f32,
}

impl GlowEffect {
    pub fn from_config(config: &GlowConfig) -> Self {
        Self {
            blur_radius: config.blur_radius,
            passes: config.passes,
            brightness: config.brightness,
        }
    }
}

impl Default for GlowEffect {
    fn default() -> Self {
        Self::from_config(&GlowConfig::default())
    }
}

impl PostEffect for GlowEffect {
    fn compose(&self, source: &Surface, output: &mut Surface) {
        output.copy_from(source);
        // Repeated box passes approximate a gaussian
        for _ in 0..self.passes {
            output.box_blur(self.blur_radius);
        }
        output.brighten(self.brightness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkfall_core::Color;

    #[test]
    fn glow_spreads_and_brightens() {
        let mut source = Surface::new(16, 16);
        source.fill_rect(6, 6, 4, 4, Color::rgb(100, 50, 25));

        let effect = GlowEffect {
            blur_radius: 2,
            passes: 1,
            brightness: 2.0,
        };
        let mut output = Surface::new(16, 16);
        effect.compose(&source, &mut output);

        // Light bleeds past the source square
        assert!(output.pixel(5, 8).unwrap().r > 0);
        assert_eq!(source.pixel(5, 8).unwrap().r, 0);
        // Interior is brighter than the source
        assert!(output.pixel(8, 8).unwrap().r > 100);
    }

    #[test]
    fn zero_passes_only_brightens() {
        let mut source = Surface::new(4, 4);
        source.fill(Color::rgb(10, 20, 30));
        let effect = GlowEffect {
            blur_radius: 3,
            passes: 0,
            brightness: 1.5,
        };
        let mut output = Surface::new(4, 4);
        effect.compose(&source, &mut output);
        assert_eq!(output.pixel(0, 0), Some(Color::rgb(15, 30, 45)));
    }
}

//! RGBA8 drawing surface with anti-aliased strokes and compositing

use image::RgbaImage;
use sparkfall_core::{Color, Result, SparkfallError};
use std::path::Path;

/// How source pixels combine with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Source drawn on top of existing content
    SourceOver,
    /// Source drawn behind existing content
    DestinationOver,
    /// Source color added to the destination, saturating
    Additive,
}

/// A straight-alpha RGBA8 pixel buffer
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Create a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Tightly packed RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut self.image)
    }

    fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice::<u8, [u8; 4]>(&self.image)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels()[(y * self.width() + x) as usize];
        Some(Color::rgba(r, g, b, a))
    }

    /// Erase to fully transparent
    pub fn clear(&mut self) {
        self.fill(Color::TRANSPARENT);
    }

    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.pixels_mut() {
            *px = rgba;
        }
    }

    pub fn copy_from(&mut self, src: &Surface) {
        if src.width() == self.width() && src.height() == self.height() {
            self.image.copy_from_slice(src.as_bytes());
        }
    }

    /// Blend one color into a pixel with the given coverage (0-1)
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32, mode: BlendMode) {
        let idx = (y * self.width() + x) as usize;
        let alpha = coverage * color.a as f32 / 255.0;
        let dst = &mut self.pixels_mut()[idx];
        *dst = blend_pixel(*dst, [color.r, color.g, color.b], alpha, mode);
    }

    /// Draw an anti-aliased round-capped line of the given width.
    ///
    /// Coverage is the distance from each pixel center to the segment, so a
    /// zero-length stroke draws a dot.
    pub fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
        mode: BlendMode,
    ) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        let half = (width * 0.5).max(0.5);
        let Some((min_x, min_y, max_x, max_y)) = self.clip_box(
            x0.min(x1) - half - 1.0,
            y0.min(y1) - half - 1.0,
            x0.max(x1) + half + 1.0,
            y0.max(y1) + half + 1.0,
        ) else {
            return;
        };

        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = dx * dx + dy * dy;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                let t = if len_sq > f32::EPSILON {
                    (((cx - x0) * dx + (cy - y0) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let ex = cx - (x0 + t * dx);
                let ey = cy - (y0 + t * dy);
                let dist = (ex * ex + ey * ey).sqrt();
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage, mode);
                }
            }
        }
    }

    /// Fill an axis-aligned square of side `size` centred on (cx, cy)
    pub fn fill_square(&mut self, cx: f32, cy: f32, size: f32, color: Color, mode: BlendMode) {
        if !(cx.is_finite() && cy.is_finite()) {
            return;
        }
        let half = (size * 0.5).max(0.5);
        let Some((min_x, min_y, max_x, max_y)) =
            self.clip_box(cx - half, cy - half, cx + half - 1.0, cy + half - 1.0)
        else {
            return;
        };
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                self.blend(px, py, color, 1.0, mode);
            }
        }
    }

    /// Fill an integer rectangle (used for overlays)
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        let max_x = (x + w).min(self.width());
        let max_y = (y + h).min(self.height());
        for py in y..max_y {
            for px in x..max_x {
                self.blend(px, py, color, 1.0, BlendMode::SourceOver);
            }
        }
    }

    /// Composite another same-sized surface onto this one
    pub fn composite(&mut self, src: &Surface, mode: BlendMode, opacity: f32) {
        if src.width() != self.width() || src.height() != self.height() {
            return;
        }
        let opacity = opacity.clamp(0.0, 1.0);
        for (dst, s) in self.pixels_mut().iter_mut().zip(src.pixels()) {
            if s[3] == 0 {
                continue;
            }
            let alpha = s[3] as f32 / 255.0 * opacity;
            *dst = blend_pixel(*dst, [s[0], s[1], s[2]], alpha, mode);
        }
    }

    /// Multiply RGB by `factor`, saturating
    pub fn brighten(&mut self, factor: f32) {
        let factor = factor.max(0.0);
        for px in self.pixels_mut() {
            for c in &mut px[..3] {
                *c = (*c as f32 * factor).min(255.0) as u8;
            }
        }
    }

    /// Separable box blur over all four channels using a sliding window.
    /// O(width * height) regardless of radius; edges repeat border pixels.
    pub fn box_blur(&mut self, radius: u32) {
        if radius == 0 {
            return;
        }
        let w = self.width() as usize;
        let h = self.height() as usize;
        // Clamp to the surface size
        let radius = u64::from(radius).min(w.max(h) as u64);
        let r = radius as i64;
        let div = 2 * radius + 1;

        let mut temp = vec![[0u8; 4]; w * h];

        // Horizontal pass: pixels -> temp
        {
            let src = self.pixels();
            for y in 0..h {
                let row = y * w;
                let at = |x: i64| src[row + x.clamp(0, w as i64 - 1) as usize];
                let mut sum = [0u64; 4];
                for i in -r..=r {
                    add_px(&mut sum, at(i));
                }
                for x in 0..w {
                    temp[row + x] = avg_px(&sum, div);
                    sub_px(&mut sum, at(x as i64 - r));
                    add_px(&mut sum, at(x as i64 + r + 1));
                }
            }
        }

        // Vertical pass: temp -> pixels
        let dst = self.pixels_mut();
        for x in 0..w {
            let at = |y: i64| temp[y.clamp(0, h as i64 - 1) as usize * w + x];
            let mut sum = [0u64; 4];
            for i in -r..=r {
                add_px(&mut sum, at(i));
            }
            for y in 0..h {
                dst[y * w + x] = avg_px(&sum, div);
                sub_px(&mut sum, at(y as i64 - r));
                add_px(&mut sum, at(y as i64 + r + 1));
            }
        }
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| SparkfallError::Image(e.to_string()))
    }

    /// Clamp a float box to pixel indices; None when it misses the surface
    fn clip_box(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Option<(u32, u32, u32, u32)> {
        let max_x = self.width() as f32 - 1.0;
        let max_y = self.height() as f32 - 1.0;
        if x1 < 0.0 || y1 < 0.0 || x0 > max_x || y0 > max_y {
            return None;
        }
        Some((
            x0.max(0.0).floor() as u32,
            y0.max(0.0).floor() as u32,
            x1.min(max_x).floor() as u32,
            y1.min(max_y).floor() as u32,
        ))
    }
}

fn blend_pixel(dst: [u8; 4], src: [u8; 3], alpha: f32, mode: BlendMode) -> [u8; 4] {
    if alpha <= 0.0 {
        return dst;
    }
    let sa = alpha.min(1.0);
    let da = dst[3] as f32 / 255.0;

    let out_a = match mode {
        BlendMode::SourceOver => sa + da * (1.0 - sa),
        BlendMode::DestinationOver => da + sa * (1.0 - da),
        BlendMode::Additive => (da + sa).min(1.0),
    };
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let s = src[i] as f32;
        let d = dst[i] as f32;
        let c = match mode {
            BlendMode::SourceOver => (s * sa + d * da * (1.0 - sa)) / out_a,
            BlendMode::DestinationOver => (d * da + s * sa * (1.0 - da)) / out_a,
            BlendMode::Additive => d + s * sa,
        };
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}

#[inline]
fn add_px(sum: &mut [u64; 4], px: [u8; 4]) {
    for (s, c) in sum.iter_mut().zip(px) {
        *s += u64::from(c);
    }
}

#[inline]
fn sub_px(sum: &mut [u64; 4], px: [u8; 4]) {
    for (s, c) in sum.iter_mut().zip(px) {
        *s -= u64::from(c);
    }
}

#[inline]
fn avg_px(sum: &[u64; 4], div: u64) -> [u8; 4] {
    [
        (sum[0] / div) as u8,
        (sum[1] / div) as u8,
        (sum[2] / div) as u8,
        (sum[3] / div) as u8,
    ]
}

use crate::constants::*;
use std::f64::consts::FRAC_PI_4;

// Scratch overlay painting and reveal measurement. The drawing target is abstract so the
// same code paints a browser canvas or the in-memory `PixelSurface` used natively.

pub trait DrawingSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    /// Draws `glyph` centred on (x, y), rotated by `angle` radians.
    fn fill_glyph(&mut self, glyph: &str, x: f64, y: f64, size: f64, angle: f64);
    /// Clears a disc to full transparency.
    fn erase_circle(&mut self, x: f64, y: f64, radius: f64);
    /// One alpha byte per pixel, row-major.
    fn alpha_channel(&self) -> Vec<u8>;
    fn set_hidden(&mut self, hidden: bool);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub x: f64,
    pub y: f64,
}

/// Centres of the decorative glyphs, in surface coordinates. The grid is laid out in a
/// frame rotated 45 degrees about the card centre and spans the card diagonal so the
/// rotated tiling still covers every corner.
pub fn glyph_layout(width: f64, height: f64) -> (f64, Vec<GlyphPlacement>) {
    let size = width / GLYPH_WIDTH_DIVISOR;
    let step = size * 2.0;
    if size <= 0.0 || height <= 0.0 {
        return (size, vec![]);
    }
    let diagonal = (width * width + height * height).sqrt();
    let (sin, cos) = FRAC_PI_4.sin_cos();
    let mut placements = vec![];
    let mut gy = step / 2.0;
    while gy < diagonal {
        let mut gx = step / 2.0;
        while gx < diagonal {
            let lx = gx - diagonal / 2.0;
            let ly = gy - diagonal / 2.0;
            placements.push(GlyphPlacement {
                x: width / 2.0 + lx * cos - ly * sin,
                y: height / 2.0 + lx * sin + ly * cos,
            });
            gx += step;
        }
        gy += step;
    }
    (size, placements)
}

pub fn paint_overlay<S: DrawingSurface + ?Sized>(surface: &mut S) {
    let width = surface.width() as f64;
    let height = surface.height() as f64;
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    surface.set_hidden(false);
    surface.fill_rect(0.0, 0.0, width, height, OVERLAY_COLOR);
    let (size, placements) = glyph_layout(width, height);
    for glyph in placements {
        surface.fill_glyph(OVERLAY_GLYPH, glyph.x, glyph.y, size, FRAC_PI_4);
    }
}

pub fn transparent_fraction(alpha: &[u8]) -> f64 {
    if alpha.is_empty() {
        return 0.0;
    }
    let clear = alpha.iter().filter(|a| **a == 0).count();
    clear as f64 / alpha.len() as f64
}

pub fn is_revealed(fraction: f64) -> bool {
    fraction > REVEAL_THRESHOLD
}

/// Pointer state for one card's overlay. Erasing only happens between a press and the
/// matching release, and only once the card has been confirmed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScratchPad {
    enabled: bool,
    drawing: bool,
}

impl ScratchPad {
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pointer_down<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: f64,
        y: f64,
    ) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        self.drawing = true;
        self.scratch(surface, x, y)
    }

    pub fn pointer_move<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: f64,
        y: f64,
    ) -> Option<f64> {
        self.scratch(surface, x, y)
    }

    /// Ends the stroke. Returns true if a stroke was in progress.
    pub fn pointer_up(&mut self) -> bool {
        std::mem::replace(&mut self.drawing, false)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    fn scratch<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S, x: f64, y: f64) -> Option<f64> {
        if !self.drawing {
            return None;
        }
        surface.erase_circle(x, y, SCRATCH_RADIUS);
        Some(transparent_fraction(&surface.alpha_channel()))
    }
}

/// RGBA buffer with canvas-like semantics. Colour values are not tracked: fills write
/// opaque black, erases write transparent black.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    hidden: bool,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            hidden: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn fill_span(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, alpha: u8) {
        let (w, h) = (self.width as f64, self.height as f64);
        let x0 = x0.max(0.0).floor() as usize;
        let y0 = y0.max(0.0).floor() as usize;
        let x1 = x1.min(w).ceil() as usize;
        let y1 = y1.min(h).ceil() as usize;
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, alpha);
            }
        }
    }

    fn set_pixel(&mut self, px: usize, py: usize, alpha: u8) {
        let offset = (py * self.width as usize + px) * 4;
        if let Some(pixel) = self.pixels.get_mut(offset..offset + 4) {
            pixel.copy_from_slice(&[0, 0, 0, alpha]);
        }
    }
}

impl DrawingSurface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, _color: &str) {
        self.fill_span(x, y, x + width, y + height, u8::MAX);
    }

    fn fill_glyph(&mut self, _glyph: &str, x: f64, y: f64, size: f64, _angle: f64) {
        let half = size / 2.0;
        self.fill_span(x - half, y - half, x + half, y + half, u8::MAX);
    }

    fn erase_circle(&mut self, x: f64, y: f64, radius: f64) {
        let (w, h) = (self.width as f64, self.height as f64);
        let y0 = (y - radius).max(0.0).floor() as usize;
        let y1 = (y + radius).min(h).ceil() as usize;
        let x0 = (x - radius).max(0.0).floor() as usize;
        let x1 = (x + radius).min(w).ceil() as usize;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - x;
                let dy = py as f64 + 0.5 - y;
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(px, py, 0);
                }
            }
        }
    }

    fn alpha_channel(&self) -> Vec<u8> {
        self.pixels.iter().skip(3).step_by(4).copied().collect()
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_is_fully_opaque() {
        let mut surface = PixelSurface::new(90, 60);
        assert_eq!(transparent_fraction(&surface.alpha_channel()), 1.0);
        paint_overlay(&mut surface);
        assert_eq!(transparent_fraction(&surface.alpha_channel()), 0.0);
        assert!(!surface.is_hidden());
    }

    #[test]
    fn glyph_grid_scales_with_width_and_covers_card() {
        let (size, placements) = glyph_layout(180.0, 120.0);
        assert_eq!(size, 20.0);
        assert!(!placements.is_empty());
        let inside = placements
            .iter()
            .filter(|p| p.x >= 0.0 && p.x <= 180.0 && p.y >= 0.0 && p.y <= 120.0)
            .count();
        assert!(inside > 0);
        let step = size * 2.0;
        for (cx, cy) in [(0.0, 0.0), (180.0, 0.0), (0.0, 120.0), (180.0, 120.0)] {
            let near = placements
                .iter()
                .any(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt() <= step);
            assert!(near, "corner ({cx}, {cy}) left bare");
        }
        assert!(glyph_layout(0.0, 120.0).1.is_empty());
    }

    #[test]
    fn threshold_boundaries() {
        let mut alpha = vec![255u8; 1000];
        for a in alpha.iter_mut().take(501) {
            *a = 0;
        }
        assert!(is_revealed(transparent_fraction(&alpha)));
        alpha[500] = 255;
        alpha[499] = 255;
        assert!(!is_revealed(transparent_fraction(&alpha)));
        assert!(!is_revealed(transparent_fraction(&[])));
    }

    #[test]
    fn pad_erases_only_while_pressed() {
        let mut surface = PixelSurface::new(100, 100);
        paint_overlay(&mut surface);
        let mut pad = ScratchPad::default();
        assert_eq!(pad.pointer_down(&mut surface, 50.0, 50.0), None);

        pad.enable();
        assert_eq!(pad.pointer_move(&mut surface, 50.0, 50.0), None);
        let first = pad.pointer_down(&mut surface, 50.0, 50.0).unwrap();
        let expected = std::f64::consts::PI * SCRATCH_RADIUS * SCRATCH_RADIUS / 10_000.0;
        assert!((first - expected).abs() < 0.02, "{first} vs {expected}");

        assert!(pad.pointer_up());
        assert!(!pad.pointer_leave());
        assert_eq!(pad.pointer_move(&mut surface, 10.0, 10.0), None);
    }

    #[test]
    fn dragging_across_the_card_reveals_it() {
        let mut surface = PixelSurface::new(100, 100);
        paint_overlay(&mut surface);
        let mut pad = ScratchPad::default();
        pad.enable();
        pad.pointer_down(&mut surface, 0.0, 20.0);
        let mut last = 0.0;
        for row in [20.0, 50.0, 80.0] {
            for x in (0..=100).step_by(5) {
                last = pad.pointer_move(&mut surface, x as f64, row).unwrap();
            }
        }
        assert!(is_revealed(last));
    }
}

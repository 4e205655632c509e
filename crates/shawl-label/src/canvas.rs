//! # Label Canvas
//!
//! A white RGBA surface with the three drawing primitives a label
//! needs: filled rectangles, scaled bitmap text, and module grids.
//! Everything is clipped to the canvas, so layout mistakes degrade to
//! an ugly label rather than a panic.

use image::{Rgba, RgbaImage};

use crate::font::{self, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A fixed-size drawing surface.
#[derive(Debug, Clone)]
pub struct LabelCanvas {
    img: RgbaImage,
}

impl LabelCanvas {
    /// Creates a white canvas.
    pub fn new(width: u32, height: u32) -> Self {
        LabelCanvas {
            img: RgbaImage::from_pixel(width, height, WHITE),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Fills a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
        let x1 = (x + w).min(self.img.width());
        let y1 = (y + h).min(self.img.height());
        for py in y.min(y1)..y1 {
            for px in x.min(x1)..x1 {
                self.img.put_pixel(px, py, color);
            }
        }
    }

    /// Draws one line of text with its center at `center_x`.
    ///
    /// `scale` multiplies the 5×7 glyph cell. Text wider than the
    /// canvas is clipped at both edges.
    pub fn draw_text_centered(&mut self, text: &str, center_x: u32, y: u32, scale: u32) {
        let width = font::text_width(text, scale);
        let left = center_x.saturating_sub(width / 2);
        self.draw_text(text, left, y, scale);
    }

    /// Draws one line of text with its left edge at `x`.
    pub fn draw_text(&mut self, text: &str, x: u32, y: u32, scale: u32) {
        let mut pen_x = x;
        for c in text.chars() {
            let rows = font::glyph(c);
            for (row_idx, row) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if row & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    self.fill_rect(
                        pen_x + col * scale,
                        y + row_idx as u32 * scale,
                        scale,
                        scale,
                        BLACK,
                    );
                }
            }
            pen_x += (GLYPH_WIDTH + GLYPH_SPACING) * scale;
        }
    }

    /// Rendered line height at a scale.
    #[inline]
    pub const fn text_height(scale: u32) -> u32 {
        GLYPH_HEIGHT * scale
    }

    /// Consumes the canvas into the finished image.
    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Pixel access for tests and encoders.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.img.get_pixel(x, y)
    }
}

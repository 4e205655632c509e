//! # Frame
//!
//! An immutable snapshot of camera pixel data.
//!
//! A [`Frame`] is captured at one instant from the camera stream and is
//! consumed by exactly one operation (sampling, ROI extraction, or a
//! decode attempt). It is never retained past that operation.

use crate::error::{CoreError, CoreResult};

/// Bytes per pixel in the RGBA buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// An immutable RGBA snapshot of one camera frame.
///
/// ## Invariants
/// - `rgba.len() == width * height * 4`, checked at construction
/// - width and height are non-zero
/// - the buffer is never mutated after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    /// Creates a frame from an RGBA buffer.
    ///
    /// Fails with [`CoreError::FrameGeometry`] if the buffer length does
    /// not match `width * height * 4` or either dimension is zero.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> CoreResult<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(CoreError::FrameGeometry {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Frame {
            width,
            height,
            rgba,
        })
    }

    /// Creates a frame filled with a single RGBA value.
    ///
    /// Used by tests and by callers that need a placeholder surface.
    pub fn uniform(width: u32, height: u32, rgba: [u8; 4]) -> CoreResult<Self> {
        let pixels = width as usize * height as usize;
        let mut buf = Vec::with_capacity(pixels * BYTES_PER_PIXEL);
        for _ in 0..pixels {
            buf.extend_from_slice(&rgba);
        }
        Frame::new(width, height, buf)
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA buffer, row-major, 4 bytes per pixel.
    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Returns the RGBA value at (x, y).
    ///
    /// ## Panics
    /// Panics if (x, y) is outside the frame. Callers are expected to
    /// clamp their geometry first; the sampler and ROI extractor do.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        ]
    }

    /// Copies a rectangular window out of this frame.
    ///
    /// The window must lie entirely within the frame; use clamped
    /// geometry from [`crate::roi`] or [`crate::sampler`].
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> CoreResult<Frame> {
        if x + w > self.width || y + h > self.height || w == 0 || h == 0 {
            return Err(CoreError::FrameGeometry {
                width: w,
                height: h,
                expected: (w as usize) * (h as usize) * BYTES_PER_PIXEL,
                actual: 0,
            });
        }

        let mut out = Vec::with_capacity(w as usize * h as usize * BYTES_PER_PIXEL);
        for row in y..y + h {
            let start = (row as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
            let end = start + w as usize * BYTES_PER_PIXEL;
            out.extend_from_slice(&self.rgba[start..end]);
        }
        Frame::new(w, h, out)
    }

    /// Projects the frame to 8-bit grayscale (ITU-R BT.601 weights).
    ///
    /// The symbol decoder works on luma; integer weights keep the
    /// projection deterministic across platforms.
    pub fn to_luma(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| {
                let y = px[0] as u32 * 299 + px[1] as u32 * 587 + px[2] as u32 * 114;
                (y / 1000) as u8
            })
            .collect()
    }
}

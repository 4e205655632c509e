//! # Color Sampler
//!
//! Reduces a pixel patch to a single averaged color.
//!
//! ## Sampling Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Color Sampling                                     │
//! │                                                                         │
//! │   Frame (1280x720)                                                     │
//! │   ┌───────────────────────────────┐                                    │
//! │   │                               │    40x40 window centered on the    │
//! │   │            ┌────┐             │    reticle, clamped to the frame   │
//! │   │            │####│◄────────────┼──  if it would overhang an edge    │
//! │   │            └────┘             │                                    │
//! │   │                               │    unweighted per-channel mean,    │
//! │   └───────────────────────────────┘    rounded to nearest integer      │
//! │                 │                                                      │
//! │                 ▼                                                      │
//! │        ColorSample { r, g, b } ──► POST /detect-color (shawl-api)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure function: identical frame + identical geometry always yields an
//! identical sample. Classification (naming + confidence) is the
//! backend's job; nothing here guesses a color name.

use crate::frame::Frame;
use crate::types::ColorSample;
use crate::DEFAULT_PATCH_SIZE;

/// A patch window fully contained in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchGeometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Computes the patch window for a frame, clamped to frame bounds.
///
/// The requested window is `patch_size × patch_size` centered at
/// `center`. Any part that would fall outside the frame is cut off; the
/// result always covers at least one pixel and never reads outside the
/// buffer.
pub fn clamp_patch(frame: &Frame, center: (u32, u32), patch_size: u32) -> PatchGeometry {
    let patch = patch_size.max(1);
    // A center beyond the frame is pulled back onto it first.
    let cx = center.0.min(frame.width() - 1);
    let cy = center.1.min(frame.height() - 1);

    let x0 = cx.saturating_sub(patch / 2);
    let y0 = cy.saturating_sub(patch / 2);
    let x1 = (x0 + patch).min(frame.width());
    let y1 = (y0 + patch).min(frame.height());

    PatchGeometry {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    }
}

/// Averages the patch centered at `center` into a single color.
///
/// Unweighted arithmetic mean per channel across the clamped window,
/// rounded to the nearest integer. Alpha is ignored.
pub fn sample(frame: &Frame, center: (u32, u32), patch_size: u32) -> ColorSample {
    let patch = clamp_patch(frame, center, patch_size);

    let mut r: u64 = 0;
    let mut g: u64 = 0;
    let mut b: u64 = 0;

    for y in patch.y..patch.y + patch.height {
        for x in patch.x..patch.x + patch.width {
            let px = frame.pixel(x, y);
            r += px[0] as u64;
            g += px[1] as u64;
            b += px[2] as u64;
        }
    }

    let n = patch.width as u64 * patch.height as u64;
    ColorSample {
        r: ((r + n / 2) / n) as u8,
        g: ((g + n / 2) / n) as u8,
        b: ((b + n / 2) / n) as u8,
    }
}

/// Samples the default reticle: frame center, 40×40 patch.
pub fn sample_center(frame: &Frame) -> ColorSample {
    sample(
        frame,
        (frame.width() / 2, frame.height() / 2),
        DEFAULT_PATCH_SIZE,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_uniform_center_patch_is_exact() {
        // Uniform (120, 45, 200) frame: the 40x40 center average is exact.
        let frame = Frame::uniform(640, 480, [120, 45, 200, 255]).unwrap();
        let sample = sample_center(&frame);
        assert_eq!(sample, ColorSample { r: 120, g: 45, b: 200 });
    }

    #[test]
    fn test_sample_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let buf: Vec<u8> = (0..64 * 48 * 4).map(|_| rng.gen()).collect();
        let frame = Frame::new(64, 48, buf).unwrap();

        let a = sample(&frame, (30, 20), 17);
        let b = sample(&frame, (30, 20), 17);
        assert_eq!(a, b);
    }

    #[test]
    fn test_mean_rounds_to_nearest() {
        // Two pixels: r = 10 and r = 11 → mean 10.5 rounds up to 11.
        let buf = vec![10, 0, 0, 255, 11, 0, 0, 255];
        let frame = Frame::new(2, 1, buf).unwrap();
        let s = sample(&frame, (0, 0), 2);
        assert_eq!(s.r, 11);
    }

    #[test]
    fn test_patch_clamps_at_edges() {
        let frame = Frame::uniform(10, 10, [50, 60, 70, 255]).unwrap();

        // Centered on a corner: window is cut to the frame.
        let patch = clamp_patch(&frame, (0, 0), 40);
        assert_eq!((patch.x, patch.y), (0, 0));
        assert_eq!((patch.width, patch.height), (10, 10));

        // Still averages correctly over the clamped area.
        let s = sample(&frame, (0, 0), 40);
        assert_eq!(s, ColorSample { r: 50, g: 60, b: 70 });
    }

    #[test]
    fn test_patch_never_exceeds_bounds_property() {
        // Property: for all frame sizes, centers and patch sizes, the
        // clamped window lies inside the frame.
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let w = rng.gen_range(1..200u32);
            let h = rng.gen_range(1..200u32);
            let frame = Frame::uniform(w, h, [1, 2, 3, 255]).unwrap();

            let center = (rng.gen_range(0..w * 2), rng.gen_range(0..h * 2));
            let patch_size = rng.gen_range(0..300u32);

            let patch = clamp_patch(&frame, center, patch_size);
            assert!(patch.width >= 1 && patch.height >= 1);
            assert!(patch.x + patch.width <= w);
            assert!(patch.y + patch.height <= h);

            // Uniform frame: any in-bounds window averages to the fill.
            let s = sample(&frame, center, patch_size);
            assert_eq!(s, ColorSample { r: 1, g: 2, b: 3 });
        }
    }

    #[test]
    fn test_zero_patch_size_samples_one_pixel() {
        let frame = Frame::uniform(5, 5, [9, 9, 9, 255]).unwrap();
        let patch = clamp_patch(&frame, (2, 2), 0);
        assert_eq!((patch.width, patch.height), (1, 1));
    }
}

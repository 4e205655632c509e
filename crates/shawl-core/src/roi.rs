//! # Text Region Extraction
//!
//! Crops the region of interest the OCR engine should look at.
//!
//! Printed product codes sit in a band across the middle of the frame,
//! so recognition runs on a centered window of 80% frame width by 30%
//! frame height. Cropping before OCR cuts both the engine's work and
//! the amount of surrounding fabric texture it can misread.

use crate::error::CoreResult;
use crate::frame::Frame;
use crate::{ROI_HEIGHT_RATIO, ROI_WIDTH_RATIO};

/// Computes the centered ROI rectangle for a frame.
///
/// Ratios are fixed (80% × 30%); the window is at least 1×1 even for
/// tiny frames.
pub fn roi_rect(frame: &Frame) -> (u32, u32, u32, u32) {
    let w = ((frame.width() as f64 * ROI_WIDTH_RATIO) as u32).max(1);
    let h = ((frame.height() as f64 * ROI_HEIGHT_RATIO) as u32).max(1);
    let x = (frame.width() - w) / 2;
    let y = (frame.height() - h) / 2;
    (x, y, w, h)
}

/// Extracts the centered text region from a frame.
pub fn extract_roi(frame: &Frame) -> CoreResult<Frame> {
    let (x, y, w, h) = roi_rect(frame);
    frame.crop(x, y, w, h)
}

//! # OCR Capture
//!
//! Single-shot text recognition with a mandatory human confirmation
//! gate.
//!
//! ## Capture Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  frame ──► centered ROI (80% × 30%) ──► engine.recognize(progress)     │
//! │                                              │                          │
//! │                         raw text ◄───────────┘                          │
//! │                              │                                          │
//! │                              ▼ normalize (strip + length gate)          │
//! │                 ┌── NoTextDetected ──► "nothing readable, retry"        │
//! │                 │                                                       │
//! │                 └── PendingText ──► operator confirms ──► candidate    │
//! │                                └──► operator rejects  ──► discarded    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why the gate
//!
//! Recognition is the least reliable strategy. A misread that slips
//! into resolution produces a confusing "not found" against a garbage
//! code, or worse, a hit on the wrong product. A `PendingText` is
//! therefore never forwarded on its own; the coordinator resolves it
//! only after an explicit confirm.

use tracing::debug;

use shawl_core::{roi, CandidateIdentifier, Frame};

use crate::error::{ScanError, ScanResult};

// =============================================================================
// Engine Seam
// =============================================================================

/// A text recognition engine.
///
/// Recognition can take seconds, so the engine reports coarse progress
/// (0-100) for the operator-facing indicator. Implementations own
/// their model lifecycle; this crate hands them a cropped region and
/// takes back raw text.
#[allow(async_fn_in_trait)]
pub trait OcrEngine {
    /// Recognizes text in a region, reporting progress along the way.
    ///
    /// Returns the raw, uncleaned engine output. Engine-level failures
    /// (model load, worker crash) come back as [`ScanError::OcrEngine`].
    async fn recognize(
        &self,
        region: &Frame,
        progress: &mut dyn FnMut(u8),
    ) -> ScanResult<String>;
}

// =============================================================================
// Capture
// =============================================================================

/// A normalized recognition result awaiting operator confirmation.
///
/// Holds the generation token of the session that produced it; the
/// coordinator refuses to resolve a pending text from a stopped or
/// switched session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingText {
    candidate: CandidateIdentifier,
    generation: u64,
}

impl PendingText {
    pub(crate) fn new(candidate: CandidateIdentifier, generation: u64) -> Self {
        PendingText {
            candidate,
            generation,
        }
    }

    /// The cleaned candidate, for display in the confirmation prompt.
    #[inline]
    pub fn candidate(&self) -> &CandidateIdentifier {
        &self.candidate
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn into_candidate(self) -> CandidateIdentifier {
        self.candidate
    }
}

/// Runs one recognition pass: crop, recognize, normalize.
///
/// `min_candidate_len` is the noise gate from the session config.
/// Returns `Core(NoTextDetected)` when nothing usable survives; that is
/// the retry prompt, not a fault.
pub async fn capture_text<E: OcrEngine>(
    engine: &E,
    frame: &Frame,
    min_candidate_len: usize,
    generation: u64,
    progress: &mut dyn FnMut(u8),
) -> ScanResult<PendingText> {
    let region = roi::extract_roi(frame).map_err(ScanError::Core)?;
    debug!(
        roi_w = region.width(),
        roi_h = region.height(),
        "running text recognition"
    );

    let raw = engine.recognize(&region, progress).await?;
    let candidate = shawl_core::normalize::normalize_scan_text(&raw, min_candidate_len)?;
    debug!(candidate = %candidate, "recognition produced a candidate");

    Ok(PendingText::new(candidate, generation))
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Symbol Decode Loop
//!
//! Per-frame QR/barcode detection over the live stream.
//!
//! ## Rules
//!
//! - A frame with no readable symbol is a miss, not an error, and is
//!   not logged. Misses are the steady state of a live loop.
//! - A decoder emits **at most one** candidate in its lifetime. The
//!   first successful decode latches it; every later frame is ignored
//!   until the coordinator installs a fresh decoder for the next item.
//!   One physical scan, one resolution, one sale.
//! - Decoded content must already be a valid candidate identifier
//!   (non-empty, `[A-Za-z0-9-]`). Symbols carrying anything else are
//!   treated as misses so the loop keeps looking for a product label.

use tracing::{debug, warn};

use shawl_core::{CandidateIdentifier, Frame};

/// Stateful per-item decoder. Create one per scan attempt.
#[derive(Debug, Default)]
pub struct SymbolDecoder {
    emitted: bool,
}

impl SymbolDecoder {
    /// Creates a decoder that has not yet emitted.
    pub fn new() -> Self {
        SymbolDecoder { emitted: false }
    }

    /// Whether this decoder has already latched a candidate.
    #[inline]
    pub fn has_emitted(&self) -> bool {
        self.emitted
    }

    /// Feeds one frame through detection.
    ///
    /// Returns `Some(candidate)` exactly once per decoder; `None` for
    /// misses, undecodable grids, non-label payloads, and every frame
    /// after the first emission.
    pub fn process_frame(&mut self, frame: &Frame) -> Option<CandidateIdentifier> {
        if self.emitted {
            return None;
        }

        let luma = frame.to_luma();
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let mut img = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
            luma[y * width + x]
        });

        for grid in img.detect_grids() {
            let content = match grid.decode() {
                Ok((_meta, content)) => content,
                // A located but unreadable grid (blur, glare) is a miss.
                Err(_) => continue,
            };

            match CandidateIdentifier::new(content.trim()) {
                Ok(candidate) => {
                    self.emitted = true;
                    debug!(candidate = %candidate, "symbol decoded");
                    return Some(candidate);
                }
                Err(_) => {
                    // Readable symbol, but not a product identifier.
                    warn!(len = content.len(), "ignoring non-label symbol payload");
                }
            }
        }

        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # shawl-core: Pure Business Logic for Shawl POS
//!
//! This crate is the **heart** of the scan-and-resolve pipeline. It
//! contains all pixel math and token normalization as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shawl POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Scan Surface (out of scope)                    │   │
//! │  │    Mode buttons ──► Live preview ──► Confirm ──► Sell          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shawl-scan (pipeline)                        │   │
//! │  │    camera session, decode loop, OCR gate, mode coordinator     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shawl-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  sampler  │  │ roi +     │  │ validation│  │   │
//! │  │   │  Product  │  │ 40x40 avg │  │ normalize │  │   rules   │  │   │
//! │  │   │ Candidate │  │  clamped  │  │ OCR clean │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CAMERA • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  shawl-api (backend client)                     │   │
//! │  │        resolver, sale intent, color classification              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ColorSample, CandidateIdentifier, ...)
//! - [`frame`] - Immutable RGBA camera snapshots
//! - [`sampler`] - Patch averaging for color detection
//! - [`roi`] - Text region extraction geometry
//! - [`normalize`] - OCR output cleaning and the length gate
//! - [`error`] - Domain error types
//! - [`validation`] - Payload validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Camera, network and file system access is FORBIDDEN here
//! 3. **Clamped Geometry**: No pixel operation ever reads outside a frame buffer
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use shawl_core::frame::Frame;
//! use shawl_core::sampler::sample_center;
//! use shawl_core::normalize::normalize_default;
//!
//! let frame = Frame::uniform(640, 480, [120, 45, 200, 255]).unwrap();
//! let color = sample_center(&frame);
//! assert_eq!((color.r, color.g, color.b), (120, 45, 200));
//!
//! let candidate = normalize_default(" SHL-1042.\n").unwrap();
//! assert_eq!(candidate.as_str(), "SHL-1042");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod frame;
pub mod normalize;
pub mod roi;
pub mod sampler;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shawl_core::Frame` instead of
// `use shawl_core::frame::Frame`

pub use error::{CoreError, CoreResult, ValidationError};
pub use frame::Frame;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Side length of the color sampling patch, in pixels.
///
/// A 40×40 window around the reticle is large enough to smooth over
/// weave texture and small enough to stay on a single color field.
pub const DEFAULT_PATCH_SIZE: u32 = 40;

/// Width of the OCR region of interest as a fraction of frame width.
pub const ROI_WIDTH_RATIO: f64 = 0.8;

/// Height of the OCR region of interest as a fraction of frame height.
pub const ROI_HEIGHT_RATIO: f64 = 0.3;

/// Minimum surviving length for an OCR candidate (exclusive).
///
/// Results of this length or shorter are treated as noise. The value is
/// a heuristic with no verified basis against real product codes, which
/// is why [`normalize::normalize_scan_text`] takes it as a parameter
/// instead of hard-coding it.
pub const DEFAULT_MIN_CANDIDATE_LEN: usize = 3;

//! # Scan Pipeline Errors
//!
//! One taxonomy for everything that can go wrong between the camera
//! sensor and the resolver: device acquisition, session misuse, decoder
//! or engine failures, and the core/api errors flowing through.
//!
//! Per-frame decode misses are NOT errors. A frame without a readable
//! symbol is the normal case in a live scan loop and is reported as
//! `None`, never as a variant here.

use thiserror::Error;

use shawl_api::ApiError;
use shawl_core::CoreError;

/// Errors surfaced by the scan pipeline.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The platform refused camera access. Surfaced verbatim to the
    /// operator; there is no programmatic recovery.
    #[error("camera permission denied")]
    PermissionDenied,

    /// The camera exists but could not be opened or streamed.
    #[error("camera unavailable: {reason}")]
    DeviceUnavailable { reason: String },

    /// A second acquisition was attempted while a stream is live.
    /// The session holds at most one stream; release first.
    #[error("camera already active")]
    CameraBusy,

    /// A frame was requested with no live stream.
    #[error("camera not active")]
    CameraInactive,

    /// The decoder failed terminally (not a per-frame miss).
    #[error("symbol decoder failure: {reason}")]
    Decoder { reason: String },

    /// The OCR engine itself failed (model load, worker crash). A
    /// recognition that finds no usable text is `Core(NoTextDetected)`,
    /// not this.
    #[error("ocr engine failure: {reason}")]
    OcrEngine { reason: String },

    /// An operation was invoked in a session state that does not
    /// support it.
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    /// Pure-logic failure (normalization, geometry, validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Backend failure during resolution, sale or color classification.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Convenience type alias for Results with ScanError.
pub type ScanResult<T> = Result<T, ScanError>;

//! Label composition errors.

use thiserror::Error;

/// Errors surfaced while composing a label.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The product code fails identifier rules; a label carrying it
    /// could never scan back into resolution.
    #[error("cannot label invalid code '{code}': {reason}")]
    InvalidCode { code: String, reason: String },

    /// QR encoding failed (payload too long for any version).
    #[error("qr encoding failed: {reason}")]
    QrEncode { reason: String },

    /// Code 128 encoding failed (character outside the symbology).
    #[error("barcode encoding failed: {reason}")]
    BarcodeEncode { reason: String },

    /// PNG serialization failed.
    #[error("png encoding failed: {reason}")]
    PngEncode { reason: String },
}

/// Convenience type alias for Results with LabelError.
pub type LabelResult<T> = Result<T, LabelError>;

//! # Error Types
//!
//! Domain-specific error types for shawl-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shawl-core errors (this file)                                         │
//! │  ├── CoreError        - Pure pipeline failures (no text, bad frame)    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shawl-api errors (separate crate)                                     │
//! │  └── ApiError         - Backend taxonomy (NotFound, OutOfStock, ...)   │
//! │                                                                         │
//! │  shawl-scan errors (separate crate)                                    │
//! │  └── ScanError        - Device taxonomy (PermissionDenied, ...)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ScanError/ApiError → Operator     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, lengths, bounds)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pure pipeline errors.
///
/// These never involve a device or the network; they describe why a
/// frame or a piece of recognized text could not become a candidate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// OCR output did not survive normalization.
    ///
    /// ## When This Occurs
    /// - Raw text was empty or whitespace
    /// - After stripping non `[A-Za-z0-9-]` characters the remainder is
    ///   at or below the configured minimum length
    ///
    /// This is an *expected* outcome on curved fabric surfaces; the
    /// operator is prompted to retry, nothing is logged as an error.
    #[error("no usable text detected (kept {kept} of {raw} characters, minimum {min})")]
    NoTextDetected { raw: usize, kept: usize, min: usize },

    /// A candidate identifier failed its shape invariant.
    ///
    /// Candidates must be non-empty and match `[A-Za-z0-9-]+` after
    /// normalization, regardless of which strategy produced them.
    #[error("invalid candidate identifier: {reason}")]
    InvalidCandidate { reason: String },

    /// Frame dimensions do not match the pixel buffer.
    #[error("frame geometry mismatch: {width}x{height} needs {expected} bytes, got {actual}")]
    FrameGeometry {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before anything reaches the backend.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed hex color, bad product code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NoTextDetected {
            raw: 12,
            kept: 2,
            min: 3,
        };
        assert_eq!(
            err.to_string(),
            "no usable text detected (kept 2 of 12 characters, minimum 3)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::InvalidFormat {
            field: "colorHex".to_string(),
            reason: "expected #RRGGBB".to_string(),
        };
        assert_eq!(err.to_string(), "colorHex has invalid format: expected #RRGGBB");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

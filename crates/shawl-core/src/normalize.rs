//! # OCR Text Normalization
//!
//! Cleans raw OCR output into a candidate identifier.
//!
//! ## Normalization Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               "  SHL~1O42.\n " ── raw engine output                     │
//! │                      │                                                  │
//! │                      ▼  trim whitespace                                 │
//! │               "SHL~1O42."                                               │
//! │                      │                                                  │
//! │                      ▼  strip everything outside [A-Za-z0-9-]           │
//! │               "SHL1O42"                                                 │
//! │                      │                                                  │
//! │                      ▼  length gate (> min_len, default 3)              │
//! │               CandidateIdentifier("SHL1O42")                            │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               operator confirmation (shawl-scan)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! OCR has no confidence score of its own, so the length gate plus a
//! human confirmation step stand in for one. The minimum length is a
//! heuristic and deliberately configurable.

use crate::error::{CoreError, CoreResult};
use crate::types::CandidateIdentifier;
use crate::DEFAULT_MIN_CANDIDATE_LEN;

/// Normalizes raw OCR text into a candidate identifier.
///
/// Trims whitespace, drops every character outside `[A-Za-z0-9-]` and
/// rejects results of length ≤ `min_len` with
/// [`CoreError::NoTextDetected`].
pub fn normalize_scan_text(raw: &str, min_len: usize) -> CoreResult<CandidateIdentifier> {
    let trimmed = raw.trim();
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    if cleaned.len() <= min_len {
        return Err(CoreError::NoTextDetected {
            raw: raw.len(),
            kept: cleaned.len(),
            min: min_len,
        });
    }

    CandidateIdentifier::new(cleaned)
}

/// Normalizes with the default minimum length (3).
pub fn normalize_default(raw: &str) -> CoreResult<CandidateIdentifier> {
    normalize_scan_text(raw, DEFAULT_MIN_CANDIDATE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_disallowed_characters() {
        let c = normalize_default("  SHL-1042! \n").unwrap();
        assert_eq!(c.as_str(), "SHL-1042");

        let c = normalize_default("sh_00*42").unwrap();
        assert_eq!(c.as_str(), "sh0042");
    }

    #[test]
    fn test_short_results_are_rejected() {
        // Length gate is ≤ min, so exactly 3 characters still fails.
        assert!(matches!(
            normalize_default("AB1"),
            Err(CoreError::NoTextDetected { kept: 3, .. })
        ));
        assert!(normalize_default("").is_err());
        assert!(normalize_default("!!!???").is_err());
        assert!(normalize_default("AB12").is_ok());
    }

    #[test]
    fn test_min_len_is_configurable() {
        assert!(normalize_scan_text("AB1", 2).is_ok());
        assert!(normalize_scan_text("SHL-1042", 8).is_err()); // kept == 8 ≤ 8
    }

    #[test]
    fn test_output_shape_property() {
        // For any input, a successful normalization only ever contains
        // [A-Za-z0-9-].
        let inputs = [
            "plain",
            "  spaced out  ",
            "Ünïcodé-ABCD",
            "line\nbreaks\tand\ttabs 99",
            "🧣🧣 SHL-1 🧣🧣",
            "____----____",
        ];
        for raw in inputs {
            if let Ok(c) = normalize_default(raw) {
                assert!(c
                    .as_str()
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '-'));
                assert!(c.as_str().len() > DEFAULT_MIN_CANDIDATE_LEN);
            }
        }
    }
}

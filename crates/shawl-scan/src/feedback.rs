//! # Scan Feedback
//!
//! Haptic and audio confirmation on successful capture. Strictly
//! best-effort: the coordinator fires a cue and moves on; a sink
//! failure never blocks or fails the scan flow.

use thiserror::Error;
use tracing::debug;

/// Haptic pulse length for a decoded symbol or confirmed text.
pub const SCAN_FEEDBACK_MS: u32 = 200;

/// Haptic pulse length for a color capture.
pub const COLOR_FEEDBACK_MS: u32 = 100;

/// A feedback channel was unavailable (no vibration motor, audio
/// device busy). Logged at debug and dropped.
#[derive(Debug, Error)]
#[error("feedback unavailable: {reason}")]
pub struct FeedbackError {
    pub reason: String,
}

/// Side-channel confirmation for capture events.
pub trait FeedbackSink {
    /// Vibrates for the given duration, where hardware exists.
    fn haptic_pulse(&mut self, duration_ms: u32) -> Result<(), FeedbackError>;

    /// Plays a short confirmation tone.
    fn audio_cue(&mut self) -> Result<(), FeedbackError>;
}

/// No-op sink for headless deployments and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn haptic_pulse(&mut self, _duration_ms: u32) -> Result<(), FeedbackError> {
        Ok(())
    }

    fn audio_cue(&mut self) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Fires both cues on a sink, swallowing failures.
pub(crate) fn emit_capture_cues<F: FeedbackSink>(sink: &mut F, duration_ms: u32) {
    if let Err(e) = sink.haptic_pulse(duration_ms) {
        debug!(error = %e, "haptic cue skipped");
    }
    if let Err(e) = sink.audio_cue() {
        debug!(error = %e, "audio cue skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl FeedbackSink for FailingSink {
        fn haptic_pulse(&mut self, _duration_ms: u32) -> Result<(), FeedbackError> {
            Err(FeedbackError {
                reason: "no vibration motor".into(),
            })
        }

        fn audio_cue(&mut self) -> Result<(), FeedbackError> {
            Err(FeedbackError {
                reason: "audio device busy".into(),
            })
        }
    }

    #[test]
    fn test_cues_swallow_sink_failures() {
        // Must not panic or propagate.
        emit_capture_cues(&mut FailingSink, SCAN_FEEDBACK_MS);
        emit_capture_cues(&mut SilentFeedback, COLOR_FEEDBACK_MS);
    }
}

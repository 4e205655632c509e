//! # Camera Session Management
//!
//! The camera is a single exclusive resource with a hardware activity
//! indicator. Everything in this module exists to make the indicator
//! truthful: at most one live stream, and when no strategy is active
//! the stream is gone and the light is off.
//!
//! ## Session Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  acquire ──► stream live (indicator ON)                                │
//! │  acquire while live ──► CameraBusy, never a second stream              │
//! │  release ──► stream stopped and dropped (indicator OFF)               │
//! │  release while idle ──► no-op (idempotent)                             │
//! │                                                                         │
//! │  INVARIANT: when idle, acquire_count == release_count                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`CameraDevice`] is the seam between the coordinator and real
//! hardware; tests drive the session with synthetic devices and the
//! `nokhwa-camera` feature plugs in the real backend.

use tracing::{debug, warn};

use shawl_core::Frame;

use crate::error::{ScanError, ScanResult};

// =============================================================================
// Device Seam
// =============================================================================

/// Which camera to prefer on multi-camera hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Rear camera, the default for scanning merchandise.
    Environment,
    /// Front camera.
    User,
}

/// Preferred capture resolution. The device may deliver the closest
/// mode it supports; callers must read dimensions off each [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionHint {
    pub width: u32,
    pub height: u32,
}

impl Default for ResolutionHint {
    fn default() -> Self {
        // 720p: enough pixels for QR modules and OCR glyphs without
        // flooding the decode loop.
        ResolutionHint {
            width: 1280,
            height: 720,
        }
    }
}

/// A live capture stream. Dropping the stream must stop capture.
pub trait FrameStream {
    /// Pulls the next frame. Blocks until one is available.
    fn next_frame(&mut self) -> ScanResult<Frame>;

    /// Stops capture. Called by the session on release, before drop,
    /// so the hardware indicator goes off deterministically.
    fn stop(&mut self);
}

/// A camera that can be opened into a [`FrameStream`].
pub trait CameraDevice {
    type Stream: FrameStream;

    /// Opens a capture stream.
    ///
    /// Fails `PermissionDenied` when the platform refuses access and
    /// `DeviceUnavailable` for every other open failure.
    fn acquire(&mut self, facing: Facing, hint: ResolutionHint) -> ScanResult<Self::Stream>;
}

// =============================================================================
// Session
// =============================================================================

/// Owns the at-most-one-stream invariant and the acquire/release
/// accounting the coordinator audits when it goes idle.
#[derive(Debug)]
pub struct CameraSession<D: CameraDevice> {
    device: D,
    stream: Option<D::Stream>,
    acquire_count: u64,
    release_count: u64,
}

impl<D: CameraDevice> CameraSession<D> {
    /// Wraps a device with no stream open.
    pub fn new(device: D) -> Self {
        CameraSession {
            device,
            stream: None,
            acquire_count: 0,
            release_count: 0,
        }
    }

    /// Opens the stream. Fails `CameraBusy` if one is already live;
    /// the caller must release first, never stack acquisitions.
    pub fn acquire(&mut self, facing: Facing, hint: ResolutionHint) -> ScanResult<()> {
        if self.stream.is_some() {
            warn!("acquire refused: stream already live");
            return Err(ScanError::CameraBusy);
        }
        let stream = self.device.acquire(facing, hint)?;
        self.stream = Some(stream);
        self.acquire_count += 1;
        debug!(acquires = self.acquire_count, "camera acquired");
        Ok(())
    }

    /// Stops and drops the stream. Idempotent: releasing an idle
    /// session does nothing and does not count.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            self.release_count += 1;
            debug!(releases = self.release_count, "camera released");
        }
    }

    /// Pulls a frame from the live stream.
    pub fn next_frame(&mut self) -> ScanResult<Frame> {
        match self.stream.as_mut() {
            Some(stream) => stream.next_frame(),
            None => Err(ScanError::CameraInactive),
        }
    }

    /// Whether a stream is currently live.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Lifetime (acquire, release) counts.
    #[inline]
    pub fn counts(&self) -> (u64, u64) {
        (self.acquire_count, self.release_count)
    }

    /// True when every acquisition has been matched by a release.
    /// Only meaningful while idle; a live stream is one acquire ahead.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.acquire_count == self.release_count
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

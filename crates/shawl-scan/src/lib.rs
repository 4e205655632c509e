//! # shawl-scan: Scan Pipeline for Shawl POS
//!
//! Everything between the camera sensor and the inventory backend: the
//! session that owns the camera, the three capture strategies, and the
//! coordinator that runs exactly one of them at a time.
//!
//! ## Modules
//!
//! - [`camera`] - device seam, session manager, acquire/release accounting
//! - [`barcode`] - per-frame QR decode loop with at-most-once emission
//! - [`ocr`] - single-shot text recognition behind a confirmation gate
//! - [`feedback`] - best-effort haptic/audio capture cues
//! - [`coordinator`] - the `{Idle, Active, Resolving, Resolved}` state machine
//! - [`error`] - pipeline error taxonomy
//!
//! ## Example
//! ```rust,no_run
//! use shawl_api::{BackendConfig, ShawlApiClient};
//! use shawl_scan::{ScanConfig, ScanCoordinator, ScanMode, SilentFeedback};
//! # use shawl_scan::{CameraDevice, Facing, FrameStream, ResolutionHint, ScanResult};
//! # struct SomeCamera;
//! # struct SomeStream;
//! # impl FrameStream for SomeStream {
//! #     fn next_frame(&mut self) -> ScanResult<shawl_core::Frame> { unimplemented!() }
//! #     fn stop(&mut self) {}
//! # }
//! # impl CameraDevice for SomeCamera {
//! #     type Stream = SomeStream;
//! #     fn acquire(&mut self, _: Facing, _: ResolutionHint) -> ScanResult<SomeStream> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! # async fn run(camera: SomeCamera) -> Result<(), Box<dyn std::error::Error>> {
//! let api = ShawlApiClient::new(BackendConfig::new("https://pos.example.com")?);
//! let mut session = ScanCoordinator::new(camera, api, SilentFeedback, ScanConfig::default());
//!
//! session.start(ScanMode::Barcode)?;
//! while session.poll_barcode().await?.is_none() {
//!     // keep feeding frames until a symbol latches
//! }
//! # Ok(())
//! # }
//! ```

pub mod barcode;
pub mod camera;
pub mod coordinator;
pub mod error;
pub mod feedback;
pub mod ocr;

#[cfg(feature = "nokhwa-camera")]
pub mod nokhwa_camera;

pub use camera::{CameraDevice, CameraSession, Facing, FrameStream, ResolutionHint};
pub use coordinator::{
    ColorOutcome, ResolveOutcome, ScanConfig, ScanCoordinator, ScanMode, SessionState,
};
pub use error::{ScanError, ScanResult};
pub use feedback::{FeedbackError, FeedbackSink, SilentFeedback};
pub use ocr::{OcrEngine, PendingText};

#[cfg(feature = "nokhwa-camera")]
pub use nokhwa_camera::NokhwaCamera;

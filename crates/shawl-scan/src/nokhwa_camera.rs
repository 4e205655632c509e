//! # nokhwa Camera Backend
//!
//! Real hardware behind the [`CameraDevice`] seam, via nokhwa's native
//! inputs (V4L2 / AVFoundation / MediaFoundation). Compiled only with
//! the `nokhwa-camera` feature.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::{Camera, NokhwaError};
use tracing::{debug, warn};

use shawl_core::Frame;

use crate::camera::{CameraDevice, Facing, FrameStream, ResolutionHint};
use crate::error::{ScanError, ScanResult};

/// A physical camera addressed by platform index.
///
/// Desktop platforms expose no facing metadata, so `Facing` only picks
/// between index 0 (environment) and index 1 (user) when both exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct NokhwaCamera;

/// A live nokhwa capture stream.
pub struct NokhwaStream {
    camera: Camera,
}

impl CameraDevice for NokhwaCamera {
    type Stream = NokhwaStream;

    fn acquire(&mut self, facing: Facing, hint: ResolutionHint) -> ScanResult<NokhwaStream> {
        let index = match facing {
            Facing::Environment => CameraIndex::Index(0),
            Facing::User => CameraIndex::Index(1),
        };
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(hint.width, hint.height),
                FrameFormat::MJPEG,
                30,
            ),
        ));

        let mut camera = Camera::new(index, requested).map_err(map_open_error)?;
        camera.open_stream().map_err(map_open_error)?;
        debug!(
            width = camera.resolution().width(),
            height = camera.resolution().height(),
            "camera stream opened"
        );
        Ok(NokhwaStream { camera })
    }
}

impl FrameStream for NokhwaStream {
    fn next_frame(&mut self) -> ScanResult<Frame> {
        let buffer = self.camera.frame().map_err(|e| ScanError::DeviceUnavailable {
            reason: e.to_string(),
        })?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| ScanError::DeviceUnavailable {
                reason: e.to_string(),
            })?;

        let (width, height) = (decoded.width(), decoded.height());
        let rgb = decoded.into_raw();
        let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
        for px in rgb.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }

        Frame::new(width, height, rgba).map_err(ScanError::Core)
    }

    fn stop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            warn!(error = %e, "stream did not stop cleanly");
        }
    }
}

/// Maps nokhwa open failures onto the session taxonomy.
///
/// nokhwa has no dedicated permission variant; the platform's refusal
/// only shows up in the message text.
fn map_open_error(err: NokhwaError) -> ScanError {
    let text = err.to_string();
    let lower = text.to_ascii_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
        ScanError::PermissionDenied
    } else {
        ScanError::DeviceUnavailable { reason: text }
    }
}

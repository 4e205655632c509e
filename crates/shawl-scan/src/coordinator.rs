//! # Scan Mode Coordinator
//!
//! The session state machine that owns which strategy runs, when the
//! camera is held, and what happens to a candidate once one exists.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │      start(mode)                candidate emitted                       │
//! │  Idle ──────────► Active(mode) ─────────────────► Resolving            │
//! │   ▲                  │    ▲                           │                 │
//! │   │                  │    │ switch_mode               │ resolved        │
//! │   │                  │    │ (release, then acquire)   ▼                 │
//! │   │                  │    └──────────────────── Resolved(product)      │
//! │   │                  │                                │                 │
//! │   │   stop() from ANY state                           │ sale recorded   │
//! │   └───────────────────────────────────────────────────┘                 │
//! │                                                                         │
//! │  not-found / transient resolution failure ──► Idle                     │
//! │  sale failure (out of stock, transient) ────► stays Resolved           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - Exactly one strategy is active at a time; switching releases the
//!   camera before re-acquiring it. The stream never stacks.
//! - Every candidate, whatever its strategy, funnels through the same
//!   resolution path. The camera is released the moment a candidate
//!   exists; resolution happens with the indicator off.
//! - `stop()` bumps the generation token. Any in-flight recognition or
//!   network result carrying an older token is discarded when it
//!   lands; a stale result must never mutate a newer session.
//! - Sales are submitted at most once and never retried here.

use tracing::{debug, info, warn};

use shawl_api::{ApiError, InventoryApi};
use shawl_core::{
    sampler, validation, CandidateIdentifier, ColorMatch, CoreError, Frame, Product, SaleIntent,
    SaleRecord, DEFAULT_MIN_CANDIDATE_LEN,
};

use crate::barcode::SymbolDecoder;
use crate::camera::{CameraDevice, CameraSession, Facing, ResolutionHint};
use crate::error::{ScanError, ScanResult};
use crate::feedback::{emit_capture_cues, FeedbackSink, COLOR_FEEDBACK_MS, SCAN_FEEDBACK_MS};
use crate::ocr::{capture_text, OcrEngine, PendingText};

// =============================================================================
// Session Types
// =============================================================================

/// The three capture strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Live QR/barcode decode loop.
    Barcode,
    /// Center-patch color capture.
    Color,
    /// Single-shot text recognition with confirmation.
    Ocr,
}

impl ScanMode {
    fn label(self) -> &'static str {
        match self {
            ScanMode::Barcode => "barcode",
            ScanMode::Color => "color",
            ScanMode::Ocr => "ocr",
        }
    }
}

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No strategy active, camera off.
    Idle,
    /// A strategy holds the camera.
    Active(ScanMode),
    /// A candidate is with the resolver; camera already off.
    Resolving,
    /// A product answered; a sale can be placed against it.
    Resolved(Product),
}

impl SessionState {
    fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Active(_) => "scanning",
            SessionState::Resolving => "resolving",
            SessionState::Resolved(_) => "resolved",
        }
    }
}

/// What resolution did with a candidate.
#[derive(Debug)]
pub enum ResolveOutcome {
    /// The candidate matched; the session is now `Resolved`.
    Resolved(Product),
    /// No product carries this code. The session is back at `Idle` and
    /// the candidate is returned for pre-filling a creation form.
    NotFound { prefill: CandidateIdentifier },
    /// The session was stopped or switched while the request was in
    /// flight; the result was discarded.
    Cancelled,
}

/// Result of a color capture.
#[derive(Debug)]
pub enum ColorOutcome {
    /// Classification for the sampled patch. The session stays in
    /// color mode; this strategy identifies, it does not resolve.
    Matched(ColorMatch),
    /// Session stopped or switched mid-request; result discarded.
    Cancelled,
}

/// Per-session tuning.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Noise gate for OCR candidates (exclusive minimum length).
    pub min_candidate_len: usize,
    /// Preferred camera on multi-camera hardware.
    pub facing: Facing,
    /// Preferred capture resolution.
    pub resolution: ResolutionHint,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            min_candidate_len: DEFAULT_MIN_CANDIDATE_LEN,
            facing: Facing::Environment,
            resolution: ResolutionHint::default(),
        }
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Drives one scan-and-sell session.
///
/// Generic over the camera, the backend and the feedback sink so the
/// whole state machine runs against in-memory fakes in tests.
pub struct ScanCoordinator<D: CameraDevice, A: InventoryApi, F: FeedbackSink> {
    camera: CameraSession<D>,
    api: A,
    feedback: F,
    config: ScanConfig,
    state: SessionState,
    /// Bumped on stop and mode switch; stale async results carrying an
    /// older value are discarded.
    generation: u64,
    /// Present only while barcode mode is active; recreated per item.
    decoder: Option<SymbolDecoder>,
}

impl<D: CameraDevice, A: InventoryApi, F: FeedbackSink> ScanCoordinator<D, A, F> {
    pub fn new(device: D, api: A, feedback: F, config: ScanConfig) -> Self {
        ScanCoordinator {
            camera: CameraSession::new(device),
            api,
            feedback,
            config,
            state: SessionState::Idle,
            generation: 0,
            decoder: None,
        }
    }

    /// Current session state.
    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Lifetime (acquire, release) counts for the camera, exposed so a
    /// host can audit the indicator invariant when idle.
    #[inline]
    pub fn camera_counts(&self) -> (u64, u64) {
        self.camera.counts()
    }

    // -------------------------------------------------------------------------
    // Mode control
    // -------------------------------------------------------------------------

    /// Starts a strategy from `Idle`.
    pub fn start(&mut self, mode: ScanMode) -> ScanResult<()> {
        if self.state != SessionState::Idle {
            return Err(ScanError::InvalidTransition {
                from: self.state.label(),
                action: "start scanning",
            });
        }

        self.camera.acquire(self.config.facing, self.config.resolution)?;
        self.decoder = match mode {
            ScanMode::Barcode => Some(SymbolDecoder::new()),
            _ => None,
        };
        self.state = SessionState::Active(mode);
        info!(mode = mode.label(), "scan session started");
        Ok(())
    }

    /// Switches the active strategy.
    ///
    /// Releases the camera before re-acquiring it, so there is never a
    /// moment with two streams. Switching to the current mode is a
    /// no-op; switching from `Idle` is a plain start.
    pub fn switch_mode(&mut self, mode: ScanMode) -> ScanResult<()> {
        match self.state {
            SessionState::Active(current) if current == mode => Ok(()),
            SessionState::Active(current) => {
                debug!(
                    from = current.label(),
                    to = mode.label(),
                    "switching scan mode"
                );
                self.camera.release();
                self.decoder = None;
                self.generation += 1;

                if let Err(e) = self.camera.acquire(self.config.facing, self.config.resolution) {
                    // The old stream is already gone; fall back to Idle
                    // rather than pretending the new mode is live.
                    warn!(error = %e, "re-acquire failed during switch");
                    self.state = SessionState::Idle;
                    return Err(e);
                }

                self.decoder = match mode {
                    ScanMode::Barcode => Some(SymbolDecoder::new()),
                    _ => None,
                };
                self.state = SessionState::Active(mode);
                Ok(())
            }
            SessionState::Idle => self.start(mode),
            _ => Err(ScanError::InvalidTransition {
                from: self.state.label(),
                action: "switch mode",
            }),
        }
    }

    /// Stops the session from any state.
    ///
    /// Releases the camera, discards any armed decoder, and bumps the
    /// generation so in-flight results land dead.
    pub fn stop(&mut self) {
        self.camera.release();
        self.decoder = None;
        self.generation += 1;
        if self.state != SessionState::Idle {
            debug!(from = self.state.label(), "scan session stopped");
        }
        self.state = SessionState::Idle;
    }

    /// Pulls a frame, or degrades the session to `Idle` on a device
    /// failure. A dead camera mid-scan ends the session cleanly; it
    /// never crashes it or leaves the state claiming a live stream.
    fn next_frame_or_degrade(&mut self) -> ScanResult<Frame> {
        match self.camera.next_frame() {
            Ok(frame) => Ok(frame),
            Err(e) => {
                warn!(error = %e, "frame pull failed, ending session");
                self.stop();
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Barcode strategy
    // -------------------------------------------------------------------------

    /// Feeds one frame through the decode loop.
    ///
    /// `Ok(None)` is the common case: no readable symbol this frame,
    /// keep polling. On a decode, the candidate goes straight to
    /// resolution and the outcome comes back.
    pub async fn poll_barcode(&mut self) -> ScanResult<Option<ResolveOutcome>> {
        if self.state != SessionState::Active(ScanMode::Barcode) {
            return Err(ScanError::InvalidTransition {
                from: self.state.label(),
                action: "poll for symbols",
            });
        }

        let frame = self.next_frame_or_degrade()?;
        let decoder = self.decoder.as_mut().ok_or(ScanError::Decoder {
            reason: "decoder missing while barcode mode active".into(),
        })?;

        match decoder.process_frame(&frame) {
            None => Ok(None),
            Some(candidate) => {
                // Latched; a fresh decoder arrives with the next start.
                self.decoder = None;
                let outcome = self.resolve_candidate(candidate).await?;
                Ok(Some(outcome))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Color strategy
    // -------------------------------------------------------------------------

    /// Captures one frame, averages the center patch and asks the
    /// backend to classify it.
    ///
    /// Color identifies fabric, it does not resolve a product: on a
    /// match the session stays in color mode for the next capture.
    pub async fn capture_color(&mut self) -> ScanResult<ColorOutcome> {
        if self.state != SessionState::Active(ScanMode::Color) {
            return Err(ScanError::InvalidTransition {
                from: self.state.label(),
                action: "capture color",
            });
        }

        let generation = self.generation;
        let frame = self.next_frame_or_degrade()?;
        let sample = sampler::sample_center(&frame);

        let result = self.api.detect_color(sample).await;
        if generation != self.generation {
            debug!("discarding color result from a stopped session");
            return Ok(ColorOutcome::Cancelled);
        }

        let matched = result?;
        emit_capture_cues(&mut self.feedback, COLOR_FEEDBACK_MS);
        info!(color = %matched.name.as_str(), confidence = matched.confidence, "color matched");
        Ok(ColorOutcome::Matched(matched))
    }

    // -------------------------------------------------------------------------
    // OCR strategy
    // -------------------------------------------------------------------------

    /// Runs one recognition pass over the current frame's ROI.
    ///
    /// A `Core(NoTextDetected)` error means nothing readable survived
    /// the noise gate; the operator re-aims and tries again. A returned
    /// [`PendingText`] still needs [`confirm_text`] before anything is
    /// resolved.
    ///
    /// [`confirm_text`]: ScanCoordinator::confirm_text
    pub async fn recognize_text<E: OcrEngine>(
        &mut self,
        engine: &E,
        progress: &mut dyn FnMut(u8),
    ) -> ScanResult<Option<PendingText>> {
        if self.state != SessionState::Active(ScanMode::Ocr) {
            return Err(ScanError::InvalidTransition {
                from: self.state.label(),
                action: "recognize text",
            });
        }

        let generation = self.generation;
        let frame = self.next_frame_or_degrade()?;
        let pending = capture_text(
            engine,
            &frame,
            self.config.min_candidate_len,
            generation,
            progress,
        )
        .await;

        if generation != self.generation {
            debug!("discarding recognition result from a stopped session");
            return Ok(None);
        }
        pending.map(Some)
    }

    /// Resolves a confirmed recognition result.
    ///
    /// Returns `Cancelled` without touching the backend if the session
    /// was stopped or switched since the text was captured.
    pub async fn confirm_text(&mut self, pending: PendingText) -> ScanResult<ResolveOutcome> {
        if pending.generation() != self.generation {
            debug!("refusing to resolve text from a stale session");
            return Ok(ResolveOutcome::Cancelled);
        }
        if self.state != SessionState::Active(ScanMode::Ocr) {
            return Err(ScanError::InvalidTransition {
                from: self.state.label(),
                action: "confirm text",
            });
        }
        self.resolve_candidate(pending.into_candidate()).await
    }

    /// Discards a recognition result the operator rejected. The session
    /// stays in OCR mode, camera live, ready for another attempt.
    pub fn reject_text(&mut self, pending: PendingText) {
        debug!(candidate = %pending.candidate(), "recognition rejected by operator");
    }

    // -------------------------------------------------------------------------
    // Resolution and sale
    // -------------------------------------------------------------------------

    /// Funnel for every strategy's candidate.
    ///
    /// Fires capture feedback, releases the camera (the indicator goes
    /// off before any network wait) and asks the resolver.
    async fn resolve_candidate(
        &mut self,
        candidate: CandidateIdentifier,
    ) -> ScanResult<ResolveOutcome> {
        emit_capture_cues(&mut self.feedback, SCAN_FEEDBACK_MS);
        self.camera.release();
        self.state = SessionState::Resolving;

        let generation = self.generation;
        debug!(candidate = %candidate, "resolving candidate");
        let result = self.api.resolve_product(&candidate).await;

        if generation != self.generation {
            // stop() already reset the state; leave it alone.
            debug!("discarding resolution result from a stopped session");
            return Ok(ResolveOutcome::Cancelled);
        }

        match result {
            Ok(product) => {
                info!(code = %product.code, name = %product.name, "candidate resolved");
                self.state = SessionState::Resolved(product.clone());
                Ok(ResolveOutcome::Resolved(product))
            }
            Err(ApiError::NotFound { .. }) => {
                info!(candidate = %candidate, "no product for candidate, offering creation");
                self.state = SessionState::Idle;
                Ok(ResolveOutcome::NotFound { prefill: candidate })
            }
            Err(e) => {
                warn!(error = %e, "resolution failed");
                self.state = SessionState::Idle;
                Err(e.into())
            }
        }
    }

    /// Places a sale against the resolved product.
    ///
    /// Submitted at most once and never retried here: an ambiguous
    /// failure retried blindly could decrement stock twice. On any
    /// failure the session stays `Resolved` so the operator sees the
    /// error against the same product and decides what to do.
    pub async fn record_sale(&mut self, quantity: i64) -> ScanResult<SaleRecord> {
        let product = match &self.state {
            SessionState::Resolved(product) => product.clone(),
            _ => {
                return Err(ScanError::InvalidTransition {
                    from: self.state.label(),
                    action: "record a sale",
                })
            }
        };
        validation::validate_quantity(quantity).map_err(CoreError::from)?;

        let intent = SaleIntent {
            product_code: product.code.clone(),
            quantity,
        };
        let generation = self.generation;
        let result = self.api.record_sale(&intent).await;

        match result {
            Ok(record) => {
                info!(code = %record.product_code, qty = record.quantity, "sale completed");
                // The sale stands either way, but a stopped session has
                // already moved on; only reset state if it is still ours.
                if generation == self.generation {
                    self.state = SessionState::Idle;
                }
                Ok(record)
            }
            Err(e) => {
                warn!(code = %intent.product_code, error = %e, "sale failed");
                Err(e.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use qrcode::{Color as QrColor, QrCode};
    use shawl_api::ApiResult;
    use shawl_core::{ColorName, ColorSample, Frame, ProductCategory};

    use crate::camera::FrameStream;
    use crate::error::ScanError;
    use crate::feedback::FeedbackError;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    #[derive(Clone)]
    struct FakeStream {
        frame: Frame,
        dead: bool,
    }

    impl FrameStream for FakeStream {
        fn next_frame(&mut self) -> ScanResult<Frame> {
            if self.dead {
                return Err(ScanError::DeviceUnavailable {
                    reason: "unplugged".into(),
                });
            }
            Ok(self.frame.clone())
        }

        fn stop(&mut self) {}
    }

    struct FakeCamera {
        frame: Frame,
        deny: bool,
        dead: bool,
    }

    impl FakeCamera {
        fn uniform() -> Self {
            FakeCamera {
                frame: Frame::uniform(640, 480, [120, 45, 200, 255]).unwrap(),
                deny: false,
                dead: false,
            }
        }

        fn showing(frame: Frame) -> Self {
            FakeCamera {
                frame,
                deny: false,
                dead: false,
            }
        }
    }

    impl CameraDevice for FakeCamera {
        type Stream = FakeStream;

        fn acquire(&mut self, _facing: Facing, _hint: ResolutionHint) -> ScanResult<FakeStream> {
            if self.deny {
                return Err(ScanError::PermissionDenied);
            }
            Ok(FakeStream {
                frame: self.frame.clone(),
                dead: self.dead,
            })
        }
    }

    /// In-memory backend with a product table and a sales ledger.
    #[derive(Default)]
    struct FakeApi {
        products: RefCell<HashMap<String, Product>>,
        sales: RefCell<Vec<SaleIntent>>,
        fail_transient: bool,
    }

    impl FakeApi {
        fn with_product(code: &str, stock: i64) -> Self {
            let api = FakeApi::default();
            api.products.borrow_mut().insert(
                code.to_string(),
                Product {
                    code: code.to_string(),
                    name: "Pashmina Classic".to_string(),
                    color_name: ColorName::Maroon,
                    color_hex: "#800000".to_string(),
                    price: 49.99,
                    category: ProductCategory::Cashmere,
                    stock_qty: stock,
                },
            );
            api
        }
    }

    impl InventoryApi for FakeApi {
        async fn resolve_product(&self, candidate: &CandidateIdentifier) -> ApiResult<Product> {
            if self.fail_transient {
                return Err(ApiError::Backend {
                    status: 500,
                    detail: "boom".into(),
                });
            }
            self.products
                .borrow()
                .get(candidate.as_str())
                .cloned()
                .ok_or_else(|| ApiError::NotFound {
                    code: candidate.as_str().to_string(),
                })
        }

        async fn record_sale(&self, intent: &SaleIntent) -> ApiResult<SaleRecord> {
            let mut products = self.products.borrow_mut();
            let product =
                products
                    .get_mut(&intent.product_code)
                    .ok_or_else(|| ApiError::NotFound {
                        code: intent.product_code.clone(),
                    })?;
            if product.stock_qty < intent.quantity {
                return Err(ApiError::OutOfStock {
                    code: intent.product_code.clone(),
                });
            }
            product.stock_qty -= intent.quantity;
            self.sales.borrow_mut().push(intent.clone());
            Ok(SaleRecord {
                id: uuid::Uuid::new_v4(),
                product_code: product.code.clone(),
                product_name: product.name.clone(),
                price_at_sale: product.price,
                color_at_sale: product.color_name.as_str().to_string(),
                timestamp: chrono::Utc::now(),
                quantity: intent.quantity,
            })
        }

        async fn detect_color(&self, sample: ColorSample) -> ApiResult<ColorMatch> {
            Ok(ColorMatch {
                name: ColorName::Purple,
                hex: sample.to_hex(),
                rgb: sample,
                hsv: shawl_core::Hsv {
                    h: 276.0,
                    s: 0.775,
                    v: 0.784,
                },
                confidence: 0.91,
            })
        }
    }

    /// Counts cues; optionally fails every call.
    #[derive(Default)]
    struct CountingFeedback {
        pulses: Vec<u32>,
        cues: u32,
        fail: bool,
    }

    impl FeedbackSink for CountingFeedback {
        fn haptic_pulse(&mut self, duration_ms: u32) -> Result<(), FeedbackError> {
            if self.fail {
                return Err(FeedbackError {
                    reason: "no motor".into(),
                });
            }
            self.pulses.push(duration_ms);
            Ok(())
        }

        fn audio_cue(&mut self) -> Result<(), FeedbackError> {
            if self.fail {
                return Err(FeedbackError {
                    reason: "audio busy".into(),
                });
            }
            self.cues += 1;
            Ok(())
        }
    }

    /// Engine returning canned text.
    struct CannedEngine(&'static str);

    impl OcrEngine for CannedEngine {
        async fn recognize(
            &self,
            _region: &Frame,
            progress: &mut dyn FnMut(u8),
        ) -> ScanResult<String> {
            progress(100);
            Ok(self.0.to_string())
        }
    }

    fn qr_frame(payload: &str) -> Frame {
        const SCALE: u32 = 8;
        const QUIET: u32 = 4;
        let code = QrCode::new(payload.as_bytes()).unwrap();
        let modules = code.width() as u32;
        let side = (modules + 2 * QUIET) * SCALE;
        let colors = code.to_colors();
        let mut buf = vec![255u8; (side * side * 4) as usize];
        for my in 0..modules {
            for mx in 0..modules {
                if colors[(my * modules + mx) as usize] != QrColor::Dark {
                    continue;
                }
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        let x = (QUIET + mx) * SCALE + dx;
                        let y = (QUIET + my) * SCALE + dy;
                        let idx = ((y * side + x) * 4) as usize;
                        buf[idx] = 0;
                        buf[idx + 1] = 0;
                        buf[idx + 2] = 0;
                    }
                }
            }
        }
        Frame::new(side, side, buf).unwrap()
    }

    fn coordinator(
        camera: FakeCamera,
        api: FakeApi,
    ) -> ScanCoordinator<FakeCamera, FakeApi, CountingFeedback> {
        ScanCoordinator::new(
            camera,
            api,
            CountingFeedback::default(),
            ScanConfig::default(),
        )
    }

    // -------------------------------------------------------------------------
    // Mode control
    // -------------------------------------------------------------------------

    #[test]
    fn test_start_and_stop_balance_the_camera() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        assert_eq!(*coord.state(), SessionState::Idle);

        coord.start(ScanMode::Color).unwrap();
        assert_eq!(*coord.state(), SessionState::Active(ScanMode::Color));
        assert_eq!(coord.camera_counts(), (1, 0));

        coord.stop();
        assert_eq!(*coord.state(), SessionState::Idle);
        assert_eq!(coord.camera_counts(), (1, 1));

        // Stop is idempotent.
        coord.stop();
        assert_eq!(coord.camera_counts(), (1, 1));
    }

    #[test]
    fn test_switch_releases_before_acquiring() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        coord.start(ScanMode::Color).unwrap();
        coord.switch_mode(ScanMode::Ocr).unwrap();

        // One release happened between the two acquisitions; the
        // session itself would have refused a stacked acquire.
        assert_eq!(coord.camera_counts(), (2, 1));
        assert_eq!(*coord.state(), SessionState::Active(ScanMode::Ocr));

        coord.stop();
        assert_eq!(coord.camera_counts(), (2, 2));
    }

    #[test]
    fn test_switch_to_same_mode_is_a_noop() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        coord.start(ScanMode::Barcode).unwrap();
        coord.switch_mode(ScanMode::Barcode).unwrap();
        assert_eq!(coord.camera_counts(), (1, 0));
    }

    #[test]
    fn test_start_requires_idle() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        coord.start(ScanMode::Color).unwrap();
        let err = coord.start(ScanMode::Ocr).unwrap_err();
        assert!(matches!(err, ScanError::InvalidTransition { .. }));
    }

    #[test]
    fn test_permission_denied_stays_idle() {
        let mut camera = FakeCamera::uniform();
        camera.deny = true;
        let mut coord = coordinator(camera, FakeApi::default());

        let err = coord.start(ScanMode::Barcode).unwrap_err();
        assert!(matches!(err, ScanError::PermissionDenied));
        assert_eq!(*coord.state(), SessionState::Idle);
        assert_eq!(coord.camera_counts(), (0, 0));
    }

    #[tokio::test]
    async fn test_dead_camera_degrades_to_idle() {
        let mut camera = FakeCamera::uniform();
        camera.dead = true;
        let mut coord = coordinator(camera, FakeApi::default());

        coord.start(ScanMode::Barcode).unwrap();
        let err = coord.poll_barcode().await.unwrap_err();
        assert!(matches!(err, ScanError::DeviceUnavailable { .. }));

        // The session ended cleanly instead of claiming a live stream.
        assert_eq!(*coord.state(), SessionState::Idle);
        assert_eq!(coord.camera_counts(), (1, 1));
    }

    // -------------------------------------------------------------------------
    // Barcode flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_barcode_scan_resolves_product() {
        let camera = FakeCamera::showing(qr_frame("SHL-1042"));
        let api = FakeApi::with_product("SHL-1042", 5);
        let mut coord = coordinator(camera, api);

        coord.start(ScanMode::Barcode).unwrap();
        let outcome = coord.poll_barcode().await.unwrap().unwrap();

        match outcome {
            ResolveOutcome::Resolved(product) => assert_eq!(product.code, "SHL-1042"),
            other => panic!("expected resolution, got {:?}", other),
        }
        assert!(matches!(coord.state(), SessionState::Resolved(_)));
        // Camera went off the moment the symbol latched.
        assert_eq!(coord.camera_counts(), (1, 1));
        // Capture feedback fired once.
        assert_eq!(coord.feedback.pulses, vec![SCAN_FEEDBACK_MS]);
        assert_eq!(coord.feedback.cues, 1);
    }

    #[tokio::test]
    async fn test_blank_frames_keep_polling() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        coord.start(ScanMode::Barcode).unwrap();

        for _ in 0..5 {
            assert!(coord.poll_barcode().await.unwrap().is_none());
        }
        assert_eq!(*coord.state(), SessionState::Active(ScanMode::Barcode));
        assert!(coord.feedback.pulses.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_symbol_offers_creation() {
        let camera = FakeCamera::showing(qr_frame("SHL-1042"));
        let mut coord = coordinator(camera, FakeApi::default());

        coord.start(ScanMode::Barcode).unwrap();
        let outcome = coord.poll_barcode().await.unwrap().unwrap();

        match outcome {
            ResolveOutcome::NotFound { prefill } => assert_eq!(prefill.as_str(), "SHL-1042"),
            other => panic!("expected creation offer, got {:?}", other),
        }
        assert_eq!(*coord.state(), SessionState::Idle);
        assert!(coord.camera_counts().0 == coord.camera_counts().1);
    }

    #[tokio::test]
    async fn test_transient_resolution_failure_goes_idle() {
        let camera = FakeCamera::showing(qr_frame("SHL-1042"));
        let api = FakeApi {
            fail_transient: true,
            ..FakeApi::default()
        };
        let mut coord = coordinator(camera, api);

        coord.start(ScanMode::Barcode).unwrap();
        let err = coord.poll_barcode().await.unwrap_err();
        assert!(matches!(err, ScanError::Api(e) if e.is_transient()));
        assert_eq!(*coord.state(), SessionState::Idle);
    }

    // -------------------------------------------------------------------------
    // Color flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_color_capture_stays_in_color_mode() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        coord.start(ScanMode::Color).unwrap();

        let outcome = coord.capture_color().await.unwrap();
        match outcome {
            ColorOutcome::Matched(m) => {
                // Fake frame is uniform (120, 45, 200).
                assert_eq!((m.rgb.r, m.rgb.g, m.rgb.b), (120, 45, 200));
                assert_eq!(m.name, ColorName::Purple);
            }
            ColorOutcome::Cancelled => panic!("not cancelled"),
        }

        // Still live for the next capture; shorter pulse than a scan.
        assert_eq!(*coord.state(), SessionState::Active(ScanMode::Color));
        assert_eq!(coord.camera_counts(), (1, 0));
        assert_eq!(coord.feedback.pulses, vec![COLOR_FEEDBACK_MS]);
    }

    // -------------------------------------------------------------------------
    // OCR flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_ocr_confirm_resolves() {
        let api = FakeApi::with_product("SHL-1042", 3);
        let mut coord = coordinator(FakeCamera::uniform(), api);

        coord.start(ScanMode::Ocr).unwrap();
        let pending = coord
            .recognize_text(&CannedEngine("  SHL-1042.\n"), &mut |_| {})
            .await
            .unwrap()
            .unwrap();
        assert_eq!(pending.candidate().as_str(), "SHL-1042");

        let outcome = coord.confirm_text(pending).await.unwrap();
        assert!(matches!(outcome, ResolveOutcome::Resolved(_)));
        assert!(matches!(coord.state(), SessionState::Resolved(_)));
        assert_eq!(coord.camera_counts(), (1, 1));
    }

    #[tokio::test]
    async fn test_ocr_unknown_code_prefills_creation() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        coord.start(ScanMode::Ocr).unwrap();

        let pending = coord
            .recognize_text(&CannedEngine("SHL-1042"), &mut |_| {})
            .await
            .unwrap()
            .unwrap();
        let outcome = coord.confirm_text(pending).await.unwrap();

        match outcome {
            ResolveOutcome::NotFound { prefill } => assert_eq!(prefill.as_str(), "SHL-1042"),
            other => panic!("expected creation offer, got {:?}", other),
        }
        assert_eq!(*coord.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_ocr_noise_keeps_scanning() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        coord.start(ScanMode::Ocr).unwrap();

        let err = coord
            .recognize_text(&CannedEngine("~. ,"), &mut |_| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Core(CoreError::NoTextDetected { .. })
        ));
        // Camera stays live for the retry.
        assert_eq!(*coord.state(), SessionState::Active(ScanMode::Ocr));
        assert_eq!(coord.camera_counts(), (1, 0));
    }

    #[tokio::test]
    async fn test_rejected_text_is_discarded() {
        let api = FakeApi::with_product("SHL-1042", 3);
        let mut coord = coordinator(FakeCamera::uniform(), api);
        coord.start(ScanMode::Ocr).unwrap();

        let pending = coord
            .recognize_text(&CannedEngine("SHL-1042"), &mut |_| {})
            .await
            .unwrap()
            .unwrap();
        coord.reject_text(pending);

        assert_eq!(*coord.state(), SessionState::Active(ScanMode::Ocr));
        assert!(coord.api.sales.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_stale_text_is_cancelled() {
        let api = FakeApi::with_product("SHL-1042", 3);
        let mut coord = coordinator(FakeCamera::uniform(), api);
        coord.start(ScanMode::Ocr).unwrap();

        let pending = coord
            .recognize_text(&CannedEngine("SHL-1042"), &mut |_| {})
            .await
            .unwrap()
            .unwrap();

        // Operator stops the session before confirming.
        coord.stop();
        coord.start(ScanMode::Ocr).unwrap();

        let outcome = coord.confirm_text(pending).await.unwrap();
        assert!(matches!(outcome, ResolveOutcome::Cancelled));
        // The stale confirm never reached the resolver.
        assert_eq!(*coord.state(), SessionState::Active(ScanMode::Ocr));
    }

    // -------------------------------------------------------------------------
    // Sale flow
    // -------------------------------------------------------------------------

    async fn resolve_via_ocr(
        coord: &mut ScanCoordinator<FakeCamera, FakeApi, CountingFeedback>,
        code: &'static str,
    ) {
        coord.start(ScanMode::Ocr).unwrap();
        let pending = coord
            .recognize_text(&CannedEngine(code), &mut |_| {})
            .await
            .unwrap()
            .unwrap();
        let outcome = coord.confirm_text(pending).await.unwrap();
        assert!(matches!(outcome, ResolveOutcome::Resolved(_)));
    }

    #[tokio::test]
    async fn test_sale_completes_and_resets() {
        let api = FakeApi::with_product("SHL-1042", 5);
        let mut coord = coordinator(FakeCamera::uniform(), api);
        resolve_via_ocr(&mut coord, "SHL-1042").await;

        let record = coord.record_sale(2).await.unwrap();
        assert_eq!(record.product_code, "SHL-1042");
        assert_eq!(record.quantity, 2);
        // The record snapshots the product as sold, wire names included.
        assert_eq!(record.color_at_sale, "maroon");
        assert_eq!(record.price_at_sale, 49.99);

        assert_eq!(*coord.state(), SessionState::Idle);
        assert_eq!(coord.api.sales.borrow().len(), 1);
        assert_eq!(
            coord.api.products.borrow()["SHL-1042"].stock_qty,
            3
        );
    }

    #[tokio::test]
    async fn test_out_of_stock_keeps_session_resolved() {
        let api = FakeApi::with_product("SHL-1042", 1);
        let mut coord = coordinator(FakeCamera::uniform(), api);
        resolve_via_ocr(&mut coord, "SHL-1042").await;

        let err = coord.record_sale(2).await.unwrap_err();
        assert!(matches!(err, ScanError::Api(ApiError::OutOfStock { .. })));

        // Session still shows the product; nothing was submitted twice.
        assert!(matches!(coord.state(), SessionState::Resolved(_)));
        assert!(coord.api.sales.borrow().is_empty());
        assert_eq!(coord.api.products.borrow()["SHL-1042"].stock_qty, 1);
    }

    #[tokio::test]
    async fn test_sale_quantity_is_validated_locally() {
        let api = FakeApi::with_product("SHL-1042", 5);
        let mut coord = coordinator(FakeCamera::uniform(), api);
        resolve_via_ocr(&mut coord, "SHL-1042").await;

        assert!(coord.record_sale(0).await.is_err());
        assert!(coord.record_sale(1000).await.is_err());
        // Local rejection: nothing hit the ledger.
        assert!(coord.api.sales.borrow().is_empty());
        assert!(matches!(coord.state(), SessionState::Resolved(_)));
    }

    #[tokio::test]
    async fn test_sale_requires_resolved_state() {
        let mut coord = coordinator(FakeCamera::uniform(), FakeApi::default());
        let err = coord.record_sale(1).await.unwrap_err();
        assert!(matches!(err, ScanError::InvalidTransition { .. }));
    }

    // -------------------------------------------------------------------------
    // Feedback
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_feedback_failure_never_blocks_the_flow() {
        let api = FakeApi::with_product("SHL-1042", 5);
        let mut coord = ScanCoordinator::new(
            FakeCamera::uniform(),
            api,
            CountingFeedback {
                fail: true,
                ..CountingFeedback::default()
            },
            ScanConfig::default(),
        );

        resolve_via_ocr(&mut coord, "SHL-1042").await;
        assert!(matches!(coord.state(), SessionState::Resolved(_)));
    }
}

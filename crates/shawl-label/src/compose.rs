//! # Label Composition
//!
//! Lays out the fixed 400×600 product label and encodes it to PNG.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  y=40    product name, scale 3, centered (uppercased by the font)      │
//! │  y=120   QR symbol of the product code, 200×200 box, centered          │
//! │  y=340   Code 128 barcode of the code, ≤300×100, centered              │
//! │  y=470   "CODE: {code}"   scale 2, centered                             │
//! │  y=505   "PRICE: ${price}" scale 2, centered                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both symbols carry the same payload, the bare product code, so
//! any scanner that reads either one feeds the same candidate back
//! into resolution. Composition is deterministic: the same product
//! yields byte-identical PNG output.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use qrcode::QrCode;
use tracing::debug;

use shawl_core::{validation, Product};

use crate::canvas::{LabelCanvas, BLACK};
use crate::error::{LabelError, LabelResult};

/// Label width in pixels.
pub const LABEL_WIDTH: u32 = 400;

/// Label height in pixels.
pub const LABEL_HEIGHT: u32 = 600;

/// Side of the QR box.
const QR_BOX: u32 = 200;
/// Top of the QR box.
const QR_TOP: u32 = 120;
/// Quiet-zone width around the QR symbol, in modules.
const QR_QUIET_MODULES: u32 = 4;

/// Maximum barcode width.
const BARCODE_MAX_WIDTH: u32 = 300;
/// Barcode bar height.
const BARCODE_HEIGHT: u32 = 100;
/// Top of the barcode.
const BARCODE_TOP: u32 = 340;

const NAME_TOP: u32 = 40;
const NAME_SCALE: u32 = 3;
const LINE_SCALE: u32 = 2;
const CODE_LINE_TOP: u32 = 470;
/// Gap between the code and price lines.
const LINE_GAP: u32 = 21;
const PRICE_LINE_TOP: u32 = CODE_LINE_TOP + LabelCanvas::text_height(LINE_SCALE) + LINE_GAP;

// Code 128 character set B selector expected by the encoder.
const CODE128_CHARSET_B: char = '\u{0181}';

/// Renders a product label.
///
/// The product code must already satisfy the identifier rules; it is
/// re-checked here because a label with an unscannable payload is
/// worse than no label.
pub fn compose_label(product: &Product) -> LabelResult<RgbaImage> {
    validation::validate_product_code(&product.code)
        .map_err(|e| LabelError::InvalidCode {
            code: product.code.clone(),
            reason: e.to_string(),
        })?;

    let mut canvas = LabelCanvas::new(LABEL_WIDTH, LABEL_HEIGHT);
    let center_x = LABEL_WIDTH / 2;

    canvas.draw_text_centered(&product.name, center_x, NAME_TOP, NAME_SCALE);
    draw_qr(&mut canvas, &product.code)?;
    draw_barcode(&mut canvas, &product.code)?;
    canvas.draw_text_centered(
        &format!("CODE: {}", product.code),
        center_x,
        CODE_LINE_TOP,
        LINE_SCALE,
    );
    canvas.draw_text_centered(
        &format!("PRICE: ${:.2}", product.price),
        center_x,
        PRICE_LINE_TOP,
        LINE_SCALE,
    );

    debug!(code = %product.code, "label composed");
    Ok(canvas.into_image())
}

/// Renders a product label and encodes it as PNG bytes.
pub fn compose_png(product: &Product) -> LabelResult<Vec<u8>> {
    let img = compose_label(product)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| LabelError::PngEncode {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

/// Draws the QR symbol centered in its box.
fn draw_qr(canvas: &mut LabelCanvas, code: &str) -> LabelResult<()> {
    let qr = QrCode::new(code.as_bytes()).map_err(|e| LabelError::QrEncode {
        reason: e.to_string(),
    })?;
    let modules = qr.width() as u32;
    let colors = qr.to_colors();

    // Largest whole-pixel module size that fits symbol plus quiet zone.
    let total_modules = modules + 2 * QR_QUIET_MODULES;
    let module_px = (QR_BOX / total_modules).max(1);
    let side = modules * module_px;
    let left = (LABEL_WIDTH - side) / 2;
    let top = QR_TOP + (QR_BOX - side) / 2;

    for my in 0..modules {
        for mx in 0..modules {
            if colors[(my * modules + mx) as usize] == qrcode::Color::Dark {
                canvas.fill_rect(
                    left + mx * module_px,
                    top + my * module_px,
                    module_px,
                    module_px,
                    BLACK,
                );
            }
        }
    }
    Ok(())
}

/// Draws the Code 128 barcode centered in its band.
fn draw_barcode(canvas: &mut LabelCanvas, code: &str) -> LabelResult<()> {
    let payload = format!("{}{}", CODE128_CHARSET_B, code);
    let barcode =
        barcoders::sym::code128::Code128::new(&payload).map_err(|e| LabelError::BarcodeEncode {
            reason: e.to_string(),
        })?;
    let modules = barcode.encode();

    let bar_px = (BARCODE_MAX_WIDTH / modules.len() as u32).max(1);
    let width = modules.len() as u32 * bar_px;
    let left = (LABEL_WIDTH.saturating_sub(width)) / 2;

    for (i, module) in modules.iter().enumerate() {
        if *module == 1 {
            canvas.fill_rect(
                left + i as u32 * bar_px,
                BARCODE_TOP,
                bar_px,
                BARCODE_HEIGHT,
                BLACK,
            );
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

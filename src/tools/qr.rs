//! QR symbol rendering: payload text → secret image for the codec.

use qrcode::{Color, EcLevel, QrCode};

use crate::error::{Result, VcsError};
use crate::models::{BinaryImage, Pixel};

/// Width of the quiet zone in modules when enabled
const QUIET_ZONE_MODULES: usize = 4;

/// Configuration for QR rendering.
#[derive(Debug, Clone, Copy)]
pub struct QrOptions {
    /// Pixels per module side (default: 10)
    pub module_px: usize,
    /// Surround the symbol with a 4-module white border (default: true)
    pub quiet_zone: bool,
    /// Error correction level (default: Medium)
    pub ec_level: EcLevel,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            module_px: 10,
            quiet_zone: true,
            ec_level: EcLevel::M,
        }
    }
}

/// Render `payload` as a black/white QR symbol
pub fn render_qr(payload: &str, options: &QrOptions) -> Result<BinaryImage> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), options.ec_level)
        .map_err(|e| VcsError::QrEncode(e.to_string()))?;

    let modules = code.width();
    let colors = code.to_colors();
    let scale = options.module_px.max(1);
    let border = if options.quiet_zone { QUIET_ZONE_MODULES } else { 0 };
    let side = (modules + 2 * border) * scale;

    BinaryImage::from_fn(side, side, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        if mx < border || my < border || mx >= modules + border || my >= modules + border {
            return Pixel::White;
        }
        Pixel::from(colors[(my - border) * modules + (mx - border)] == Color::Dark)
    })
}

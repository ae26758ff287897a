//! Token Encoder
//!
//! Serializes an invitation's identity-relevant fields into the closed
//! [`TokenPayload`] record and rasterizes it as a QR matrix at two
//! densities:
//!
//! - a **canvas** rendering at the requested pixel size, for immediate
//!   on-screen display
//! - a **share** rendering ~1.5× larger, PNG-encoded so the compositor
//!   can embed it into the shareable artifact and the barcode stays
//!   scannable after the surrounding composition is flattened
//!
//! Error correction defaults to [`ErrorCorrection::High`] to tolerate
//! real-world print and scan damage.

#![forbid(unsafe_code)]

use image::{GrayImage, Luma};
use perla_core::{Invitation, TokenPayload};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

/// Quiet-zone width in modules on each side of the matrix.
const QUIET_ZONE: u32 = 4;

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    #[default]
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(ec: ErrorCorrection) -> Self {
        match ec {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Encoding options for one token.
#[derive(Debug, Clone)]
pub struct TokenOptions {
    /// Side length of the on-screen rendering in pixels; must be > 0
    pub pixel_size: u32,
    /// Redundancy level baked into the matrix
    pub error_correction: ErrorCorrection,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            pixel_size: 200,
            error_correction: ErrorCorrection::High,
        }
    }
}

impl TokenOptions {
    /// Side length of the share rendering embedded into the artifact.
    pub fn share_size(&self) -> u32 {
        self.pixel_size.saturating_mul(3) / 2
    }
}

/// A serialized, rasterized token derived from one invitation.
///
/// Ephemeral: regenerated whenever the source invitation changes, never
/// mutated in place.
#[derive(Debug, Clone)]
pub struct EncodedToken {
    /// On-screen rendering at the requested pixel size
    pub canvas: GrayImage,
    /// Larger rendering, PNG-encoded for embedding into the artifact
    pub share_png: Vec<u8>,
    /// The serialized payload the matrix carries
    pub payload: String,
}

/// Error raised when a token cannot be produced.
///
/// Terminal for the current render attempt; never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Options are out of range
    #[error("invalid token options: {0}")]
    InvalidOptions(String),

    /// The payload could not be serialized
    #[error("payload serialization failed: {0}")]
    Serialize(String),

    /// The rasterizer rejected the payload or density
    #[error("QR generation failed: {0}")]
    Rasterize(String),
}

/// Encodes invitations into [`EncodedToken`]s.
#[derive(Debug, Clone, Default)]
pub struct TokenEncoder {
    options: TokenOptions,
}

impl TokenEncoder {
    /// Create an encoder with the given options.
    pub fn new(options: TokenOptions) -> Self {
        Self { options }
    }

    /// Options this encoder renders with.
    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// Encode one invitation into its token renderings.
    pub fn encode(&self, invitation: &Invitation) -> Result<EncodedToken, EncodeError> {
        if self.options.pixel_size == 0 {
            return Err(EncodeError::InvalidOptions(
                "pixel_size must be greater than zero".into(),
            ));
        }

        let payload = TokenPayload::from(invitation)
            .to_json()
            .map_err(|e| EncodeError::Serialize(e.to_string()))?;

        let code = QrCode::with_error_correction_level(
            payload.as_bytes(),
            self.options.error_correction.into(),
        )
        .map_err(|e| EncodeError::Rasterize(e.to_string()))?;

        let canvas = render_matrix(&code, self.options.pixel_size);
        let share = render_matrix(&code, self.options.share_size());
        let share_png = encode_png(&share)?;

        tracing::debug!(
            invitation = %invitation.id,
            canvas_px = canvas.width(),
            share_px = share.width(),
            "token encoded"
        );

        Ok(EncodedToken {
            canvas,
            share_png,
            payload,
        })
    }
}

/// Rasterize the matrix at the smallest integer module scale that
/// reaches `min_size` pixels per side, quiet zone included.
fn render_matrix(code: &QrCode, min_size: u32) -> GrayImage {
    let modules = code.width() as u32;
    let total = modules + 2 * QUIET_ZONE;
    let scale = min_size.div_ceil(total).max(1);
    let side = total * scale;

    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));
    for my in 0..modules {
        for mx in 0..modules {
            if code[(mx as usize, my as usize)] != Color::Dark {
                continue;
            }
            let px = (mx + QUIET_ZONE) * scale;
            let py = (my + QUIET_ZONE) * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(px + dx, py + dy, Luma([0u8]));
                }
            }
        }
    }
    img
}

fn encode_png(img: &GrayImage) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| EncodeError::Rasterize(e.to_string()))?;
    Ok(bytes)
}

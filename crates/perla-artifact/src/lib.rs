//! Artifact Compositor
//!
//! Draws the fixed-layout shareable image for one invitation: background
//! wash, shadowed content panel, title, recipient metadata, the QR token
//! on its own panel, footer caption and divider rule, then encodes the
//! result as PNG, JPEG or WebP.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌───────────────┐    ┌──────────────┐
//! │ Invitation │    │ EncodedToken  │    │ ComposeOpts  │
//! └─────┬──────┘    └──────┬────────┘    └──────┬───────┘
//!       │                  │ decode PNG         │
//!       └──────────┬───────┴────────────────────┘
//!                  v
//!          compose(): proportional layout, pixel drawing
//!                  │
//!                  v
//!          Artifact { bytes, content_type }
//! ```
//!
//! All coordinates are proportional to the requested canvas size, never
//! tied to one invitation's text length. Overlong names clip at the
//! canvas edge; that is acceptable degradation, not an error. The one
//! mandatory suspension point is decoding the embedded token image;
//! a decode failure is reported as [`ComposeError::ImageDecode`], never
//! drawn as a blank region.

#![forbid(unsafe_code)]

mod compose;
mod draw;
mod layout;

pub use compose::compose;
pub use layout::{Layout, Rect};

/// Output encoding for a composed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    /// Lossless, recommended for barcodes
    #[default]
    Png,
    /// Lossy; honors the quality option
    Jpeg,
    /// Lossless (the encoder ignores the quality option)
    WebP,
}

impl ArtifactFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Png => "image/png",
            ArtifactFormat::Jpeg => "image/jpeg",
            ArtifactFormat::WebP => "image/webp",
        }
    }

    /// Filename extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Png => "png",
            ArtifactFormat::Jpeg => "jpg",
            ArtifactFormat::WebP => "webp",
        }
    }
}

/// Composition options for one artifact.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Output encoding
    pub format: ArtifactFormat,
    /// Encoder quality 1..=100; meaningful for JPEG only
    pub quality: u8,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            width: 300,
            height: 450,
            format: ArtifactFormat::Png,
            quality: 90,
        }
    }
}

/// A composited, encoded invitation image.
///
/// Ephemeral and immutable: superseded, never updated, when a new
/// invitation is rendered.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Encoded image bytes
    pub bytes: Vec<u8>,
    /// MIME content type matching `format`
    pub content_type: &'static str,
    /// Encoding the bytes carry
    pub format: ArtifactFormat,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

/// Error raised when composition fails.
///
/// Terminal for the current render attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// Options are out of range
    #[error("invalid compose options: {0}")]
    InvalidOptions(String),

    /// The embedded token image failed to decode
    #[error("token image decode failed: {0}")]
    ImageDecode(String),

    /// Output encoding failed
    #[error("artifact encoding failed: {0}")]
    Encode(String),
}

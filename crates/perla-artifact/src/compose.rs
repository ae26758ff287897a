//! Artifact composition and output encoding.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{imageops, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use perla_core::Invitation;
use perla_token::EncodedToken;
use std::io::Cursor;

use crate::draw;
use crate::layout::Layout;
use crate::{Artifact, ArtifactFormat, ComposeError, ComposeOptions};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const WASH_TOP: Rgba<u8> = Rgba([248, 250, 252, 255]);
const WASH_BOTTOM: Rgba<u8> = Rgba([226, 232, 240, 255]);
const PANEL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const MUTED_INK: Rgba<u8> = Rgba([75, 85, 99, 255]);
const RULE: Rgba<u8> = Rgba([226, 232, 240, 255]);

/// Composite one invitation and its encoded token into a distributable
/// image.
///
/// The token's share rendering arrives as encoded PNG bytes and is fully
/// decoded before any drawing happens; a decode failure aborts the
/// composition with [`ComposeError::ImageDecode`]. The returned byte
/// stream is complete; nothing is streamed incrementally and no state
/// outlives the call.
pub fn compose(
    invitation: &Invitation,
    token: &EncodedToken,
    options: &ComposeOptions,
) -> Result<Artifact, ComposeError> {
    if options.width < 120 || options.height < 160 {
        return Err(ComposeError::InvalidOptions(format!(
            "canvas {}x{} is too small to hold the layout",
            options.width, options.height
        )));
    }
    if options.quality == 0 || options.quality > 100 {
        return Err(ComposeError::InvalidOptions(format!(
            "quality {} outside 1..=100",
            options.quality
        )));
    }

    // Mandatory suspension point: the token image must be fully decoded
    // before compositing proceeds.
    let qr = image::load_from_memory(&token.share_png)
        .map_err(|e| ComposeError::ImageDecode(e.to_string()))?
        .to_luma8();

    let layout = Layout::for_canvas(options.width, options.height);
    let mut canvas = RgbaImage::new(options.width, options.height);

    draw::fill(&mut canvas, BACKGROUND);
    draw::vertical_gradient(&mut canvas, WASH_TOP, WASH_BOTTOM);

    draw::drop_shadow(&mut canvas, layout.panel, layout.corner_radius, 3);
    draw::fill_rounded_rect(&mut canvas, layout.panel, layout.corner_radius, PANEL);

    let center_x = options.width / 2;
    draw::draw_text_centered(
        &mut canvas,
        &invitation.title,
        center_x,
        layout.title_y,
        layout.title_scale,
        INK,
    );
    draw::draw_text_centered(
        &mut canvas,
        &format!("Para: {}", invitation.name),
        center_x,
        layout.name_y,
        layout.text_scale,
        INK,
    );
    draw::draw_text_centered(
        &mut canvas,
        &format!("Acompañantes: {}", invitation.guest_count),
        center_x,
        layout.guests_y,
        layout.text_scale,
        INK,
    );

    // The QR sits on its own rounded white panel so the matrix keeps a
    // quiet border over the gradient wash.
    draw::fill_rounded_rect(
        &mut canvas,
        layout.qr.grow(layout.corner_radius / 2),
        layout.corner_radius,
        PANEL,
    );
    let qr_scaled = imageops::resize(
        &qr,
        layout.qr.w,
        layout.qr.h,
        imageops::FilterType::Nearest,
    );
    draw::blit_luma(&mut canvas, &qr_scaled, layout.qr.x, layout.qr.y);

    draw::draw_text_centered(
        &mut canvas,
        &invitation.description,
        center_x,
        layout.footer_y,
        layout.text_scale,
        MUTED_INK,
    );
    draw::hline(
        &mut canvas,
        layout.panel.x + layout.panel.w / 5,
        layout.panel.x + layout.panel.w * 4 / 5,
        layout.divider_y,
        2,
        RULE,
    );

    let bytes = encode(&canvas, options)?;

    tracing::debug!(
        invitation = %invitation.id,
        format = ?options.format,
        size = bytes.len(),
        "artifact composed"
    );

    Ok(Artifact {
        bytes,
        content_type: options.format.content_type(),
        format: options.format,
        width: options.width,
        height: options.height,
    })
}

fn encode(canvas: &RgbaImage, options: &ComposeOptions) -> Result<Vec<u8>, ComposeError> {
    // The artifact carries no alpha; flatten before encoding so every
    // format sees the same channel layout.
    let rgb = image::DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
    let (w, h) = rgb.dimensions();
    let mut bytes = Vec::new();
    let cursor = Cursor::new(&mut bytes);

    let result = match options.format {
        ArtifactFormat::Png => {
            PngEncoder::new(cursor).write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)
        }
        ArtifactFormat::Jpeg => JpegEncoder::new_with_quality(cursor, options.quality)
            .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8),
        ArtifactFormat::WebP => {
            // Lossless encoder; the quality option does not apply.
            WebPEncoder::new_lossless(cursor).write_image(
                rgb.as_raw(),
                w,
                h,
                ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|e| ComposeError::Encode(e.to_string()))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use perla_token::TokenEncoder;

    fn sample() -> (Invitation, EncodedToken) {
        let inv = Invitation::new("Ana Torres", 3, false).unwrap();
        let token = TokenEncoder::default().encode(&inv).unwrap();
        (inv, token)
    }

    #[test]
    fn test_compose_png() {
        let (inv, token) = sample();
        let artifact = compose(&inv, &token, &ComposeOptions::default()).unwrap();

        assert!(!artifact.bytes.is_empty());
        assert_eq!(artifact.content_type, "image/png");

        let decoded = image::load_from_memory(&artifact.bytes).unwrap();
        assert_eq!(decoded.width(), 300);
        assert_eq!(decoded.height(), 450);
    }

    #[test]
    fn test_compose_is_structurally_idempotent() {
        let (inv, token) = sample();
        let opts = ComposeOptions::default();
        let a = compose(&inv, &token, &opts).unwrap();
        let b = compose(&inv, &token, &opts).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_corrupt_token_image_is_decode_error() {
        let (inv, mut token) = sample();
        token.share_png = vec![0xde, 0xad, 0xbe, 0xef];
        let err = compose(&inv, &token, &ComposeOptions::default()).unwrap_err();
        assert!(matches!(err, ComposeError::ImageDecode(_)));
    }

    #[test]
    fn test_tiny_canvas_rejected() {
        let (inv, token) = sample();
        let opts = ComposeOptions {
            width: 40,
            height: 40,
            ..ComposeOptions::default()
        };
        assert!(matches!(
            compose(&inv, &token, &opts),
            Err(ComposeError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_metadata_text_is_drawn() {
        // Same blank token image for both renders, so any byte
        // difference comes from the text lines alone.
        let blank = image::GrayImage::from_pixel(40, 40, image::Luma([255]));
        let mut png = Vec::new();
        image::DynamicImage::ImageLuma8(blank)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let (inv_a, mut token) = sample();
        token.share_png = png;

        let mut inv_b = inv_a.clone();
        inv_b.name = "Benito Jurado".to_string();

        let opts = ComposeOptions::default();
        let a = compose(&inv_a, &token, &opts).unwrap();
        let a_again = compose(&inv_a, &token, &opts).unwrap();
        let b = compose(&inv_b, &token, &opts).unwrap();

        assert_eq!(a.bytes, a_again.bytes);
        assert_ne!(a.bytes, b.bytes);
    }

    #[test]
    fn test_artifact_differs_per_invitation() {
        let (inv_a, token_a) = sample();
        let inv_b = Invitation::new("Benito Jurado", 7, false).unwrap();
        let token_b = TokenEncoder::default().encode(&inv_b).unwrap();

        let opts = ComposeOptions::default();
        let a = compose(&inv_a, &token_a, &opts).unwrap();
        let b = compose(&inv_b, &token_b, &opts).unwrap();
        assert_ne!(a.bytes, b.bytes);
    }
}

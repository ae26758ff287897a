//! Output-format coverage for the compositor.

use perla_artifact::{compose, ArtifactFormat, ComposeError, ComposeOptions};
use perla_core::Invitation;
use perla_token::{EncodedToken, TokenEncoder};

fn sample() -> (Invitation, EncodedToken) {
    let inv = Invitation::new("María Pérez", 2, true).unwrap();
    let token = TokenEncoder::default().encode(&inv).unwrap();
    (inv, token)
}

#[test]
fn every_format_produces_a_decodable_image() {
    let (inv, token) = sample();

    for format in [ArtifactFormat::Png, ArtifactFormat::Jpeg, ArtifactFormat::WebP] {
        let opts = ComposeOptions {
            format,
            ..ComposeOptions::default()
        };
        let artifact = compose(&inv, &token, &opts).expect("compose");
        assert_eq!(artifact.content_type, format.content_type());
        assert!(!artifact.bytes.is_empty());

        let decoded = image::load_from_memory(&artifact.bytes).expect("decode");
        assert_eq!(decoded.width(), opts.width);
        assert_eq!(decoded.height(), opts.height);
    }
}

#[test]
fn artifact_contains_barcode_ink() {
    let (inv, token) = sample();
    let artifact = compose(&inv, &token, &ComposeOptions::default()).expect("compose");

    let decoded = image::load_from_memory(&artifact.bytes).expect("decode").to_luma8();
    let dark = decoded.pixels().filter(|p| p.0[0] < 64).count();
    let total = (decoded.width() * decoded.height()) as usize;

    // A QR matrix plus text must ink a visible share of the canvas.
    assert!(dark * 20 > total, "only {}/{} dark pixels", dark, total);
}

#[test]
fn jpeg_quality_changes_output_size() {
    let (inv, token) = sample();

    let small = compose(
        &inv,
        &token,
        &ComposeOptions {
            format: ArtifactFormat::Jpeg,
            quality: 10,
            ..ComposeOptions::default()
        },
    )
    .expect("low quality");
    let large = compose(
        &inv,
        &token,
        &ComposeOptions {
            format: ArtifactFormat::Jpeg,
            quality: 95,
            ..ComposeOptions::default()
        },
    )
    .expect("high quality");

    assert!(large.bytes.len() > small.bytes.len());
}

#[test]
fn out_of_range_quality_rejected() {
    let (inv, token) = sample();
    let err = compose(
        &inv,
        &token,
        &ComposeOptions {
            quality: 0,
            ..ComposeOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ComposeError::InvalidOptions(_)));
}

#[test]
fn larger_canvas_scales_layout() {
    let (inv, token) = sample();
    let artifact = compose(
        &inv,
        &token,
        &ComposeOptions {
            width: 600,
            height: 900,
            ..ComposeOptions::default()
        },
    )
    .expect("compose");

    let decoded = image::load_from_memory(&artifact.bytes).expect("decode");
    assert_eq!((decoded.width(), decoded.height()), (600, 900));
}

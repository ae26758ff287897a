//! End-to-end dispatch behavior against scripted hosts.

use perla_artifact::{compose, Artifact, ComposeOptions};
use perla_core::Invitation;
use perla_share::{
    copy, detect, download, share, DistributionError, HostCall, MockShareHost, ShareDelivery,
};
use perla_token::TokenEncoder;

fn rendered() -> (Invitation, Artifact) {
    let inv = Invitation::new("Ana Torres", 3, false).unwrap();
    let token = TokenEncoder::default().encode(&inv).unwrap();
    let artifact = compose(&inv, &token, &ComposeOptions::default()).unwrap();
    (inv, artifact)
}

#[tokio::test]
async fn share_prefers_file_attachment() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::full();
    let caps = detect(&host, &artifact).await;

    let delivery = share(&host, caps, &inv, &artifact).await.unwrap();
    assert_eq!(delivery, ShareDelivery::File);

    let calls = host.calls();
    assert!(calls
        .iter()
        .any(|c| matches!(c, HostCall::ShareFile { file_name } if file_name == "ana-torres.png")));
    assert!(!calls.iter().any(|c| matches!(c, HostCall::ShareText { .. })));
}

#[tokio::test]
async fn share_falls_back_to_text_when_files_unsupported() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::text_only();
    let caps = detect(&host, &artifact).await;
    assert!(caps.native_share && !caps.native_file_share);

    let delivery = share(&host, caps, &inv, &artifact).await.unwrap();
    assert_eq!(delivery, ShareDelivery::TextOnly);

    assert!(host
        .calls()
        .iter()
        .any(|c| matches!(c, HostCall::ShareText { title } if title == "Jardines de La Perla")));
}

#[tokio::test]
async fn share_reports_unsupported_without_primitives() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::unsupported();
    let caps = detect(&host, &artifact).await;

    let err = share(&host, caps, &inv, &artifact).await.unwrap_err();
    assert_eq!(err, DistributionError::Unsupported);
}

#[tokio::test]
async fn cancelled_share_is_not_an_error() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::full().with_cancelled_shares();
    let caps = detect(&host, &artifact).await;

    let delivery = share(&host, caps, &inv, &artifact).await.unwrap();
    assert_eq!(delivery, ShareDelivery::Cancelled);
}

#[tokio::test]
async fn copy_writes_artifact_bytes() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::full();

    copy(&host, &inv, &artifact).await.unwrap();
    assert!(host
        .calls()
        .iter()
        .any(|c| matches!(c, HostCall::CopyImage { len } if *len == artifact.bytes.len())));
}

#[tokio::test]
async fn copy_failure_is_clipboard_unavailable() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::full().with_clipboard_failure();

    let err = copy(&host, &inv, &artifact).await.unwrap_err();
    assert!(matches!(err, DistributionError::ClipboardUnavailable(_)));
}

#[tokio::test]
async fn download_persists_under_derived_name() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::unsupported();

    let path = download(&host, &inv, &artifact).await.unwrap();
    assert_eq!(path.to_str().unwrap(), "ana-torres.png");

    let saved = host.downloads();
    assert_eq!(saved["ana-torres.png"], artifact.bytes);
}

#[tokio::test]
async fn download_twice_downloads_twice() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::unsupported();

    download(&host, &inv, &artifact).await.unwrap();
    download(&host, &inv, &artifact).await.unwrap();

    let saves = host
        .calls()
        .iter()
        .filter(|c| matches!(c, HostCall::SaveDownload { .. }))
        .count();
    assert_eq!(saves, 2);
}

#[tokio::test]
async fn download_failure_is_write_failed() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::unsupported().with_download_failure();

    let err = download(&host, &inv, &artifact).await.unwrap_err();
    assert!(matches!(err, DistributionError::WriteFailed(_)));
}

#[tokio::test]
async fn one_failure_leaves_artifact_usable_for_others() {
    let (inv, artifact) = rendered();
    let host = MockShareHost::unsupported().with_clipboard_failure();
    let caps = detect(&host, &artifact).await;

    assert!(share(&host, caps, &inv, &artifact).await.is_err());
    assert!(copy(&host, &inv, &artifact).await.is_err());

    // The cached artifact still downloads unchanged.
    download(&host, &inv, &artifact).await.unwrap();
    assert_eq!(host.downloads()["ana-torres.png"], artifact.bytes);
}

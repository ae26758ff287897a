//! Render pipeline seam.

use async_trait::async_trait;
use perla_artifact::{compose, Artifact, ComposeError, ComposeOptions};
use perla_core::Invitation;
use perla_token::{EncodeError, TokenEncoder};
use std::time::Duration;

/// Error raised while rendering one invitation.
///
/// All variants are terminal for the attempt and recoverable for the
/// session: the next identity change starts a fresh render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Token encoding failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Artifact composition failed
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The configured render deadline elapsed
    #[error("render timed out after {0:?}")]
    Timeout(Duration),

    /// A worker task died before delivering a result
    #[error("render task failed: {0}")]
    TaskFailed(String),
}

/// Turns an invitation into a finished artifact.
///
/// Injectable so the session controller is testable without touching
/// the real encoder or compositor.
#[async_trait]
pub trait Renderer: Send + Sync + 'static {
    /// Render one invitation to completion.
    async fn render(&self, invitation: &Invitation) -> Result<Artifact, RenderError>;
}

/// Production renderer: token encoding followed by composition, each on
/// a blocking worker thread.
///
/// Compositing never starts before encoding completes; the artifact is
/// returned only after composition completes.
#[derive(Debug, Clone, Default)]
pub struct PipelineRenderer {
    encoder: TokenEncoder,
    compose_options: ComposeOptions,
}

impl PipelineRenderer {
    /// Create a renderer with explicit encoder and compositor options.
    pub fn new(encoder: TokenEncoder, compose_options: ComposeOptions) -> Self {
        Self {
            encoder,
            compose_options,
        }
    }
}

#[async_trait]
impl Renderer for PipelineRenderer {
    async fn render(&self, invitation: &Invitation) -> Result<Artifact, RenderError> {
        let encoder = self.encoder.clone();
        let inv = invitation.clone();
        let token = tokio::task::spawn_blocking(move || encoder.encode(&inv))
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))??;

        let options = self.compose_options.clone();
        let inv = invitation.clone();
        let artifact = tokio::task::spawn_blocking(move || compose(&inv, &token, &options))
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))??;

        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pipeline_renders_default_artifact() {
        let inv = Invitation::new("Ana Torres", 3, false).unwrap();
        let artifact = PipelineRenderer::default().render(&inv).await.unwrap();

        assert_eq!(artifact.content_type, "image/png");
        assert!(!artifact.bytes.is_empty());
        assert_eq!((artifact.width, artifact.height), (300, 450));
    }
}

//! Session state machine.
//!
//! `Idle → Rendering → Ready | Failed`, re-entering `Rendering` only on
//! invitation identity change. The host environment offers no reliable
//! abort for in-flight image work, so cancellation is suppression: a
//! generation counter is captured when a render starts and compared
//! when it resolves; results for a superseded generation are discarded
//! without touching visible state.

use perla_artifact::Artifact;
use perla_core::Invitation;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::render::{PipelineRenderer, RenderError, Renderer};

/// Where the current render stands.
#[derive(Debug, Clone, Default)]
pub enum RenderPhase {
    /// No invitation is being displayed
    #[default]
    Idle,
    /// A render is in flight; no artifact or error is visible
    Rendering,
    /// The artifact for the current invitation is available
    Ready(Arc<Artifact>),
    /// The render failed; stable until the next identity change
    Failed(RenderError),
}

impl RenderPhase {
    /// True while a render is in flight.
    pub fn is_rendering(&self) -> bool {
        matches!(self, RenderPhase::Rendering)
    }

    /// The artifact, if the phase is `Ready`.
    pub fn artifact(&self) -> Option<&Arc<Artifact>> {
        match self {
            RenderPhase::Ready(artifact) => Some(artifact),
            _ => None,
        }
    }

    /// The error, if the phase is `Failed`.
    pub fn error(&self) -> Option<&RenderError> {
        match self {
            RenderPhase::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Observable session snapshot.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    /// The invitation currently being displayed, if any
    pub invitation: Option<Invitation>,
    /// Render progress for that invitation
    pub phase: RenderPhase,
}

/// Configuration for the session controller.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Optional deadline per render attempt.
    ///
    /// The source system defines no timeout, so the default is `None`;
    /// when set, an elapsed deadline reports [`RenderError::Timeout`].
    pub render_timeout: Option<Duration>,
}

impl SessionConfig {
    /// Config for tests (tight render deadline).
    pub fn for_testing() -> Self {
        Self {
            render_timeout: Some(Duration::from_secs(2)),
        }
    }
}

/// Orchestrates rendering for one invitation at a time.
///
/// Only ever one active render per controller surface: entering
/// `Rendering` clears the previous artifact and error, and only the
/// latest triggered render may update visible state.
pub struct SessionController {
    renderer: Arc<dyn Renderer>,
    config: SessionConfig,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<RenderState>>,
}

impl SessionController {
    /// Create a controller over an injected renderer.
    pub fn new(renderer: Arc<dyn Renderer>, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(RenderState::default());
        Self {
            renderer,
            config,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Controller over the production pipeline with default options.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(PipelineRenderer::default()), SessionConfig::default())
    }

    /// Subscribe to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    pub fn current(&self) -> RenderState {
        self.state.borrow().clone()
    }

    /// Display an invitation, triggering a render.
    ///
    /// A call with the currently displayed invitation's identity is a
    /// no-op; a new identity re-enters `Rendering` even if the previous
    /// render has not completed.
    pub fn show(&self, invitation: Invitation) {
        if let Some(current) = &self.state.borrow().invitation {
            if current.id == invitation.id {
                tracing::debug!(invitation = %invitation.id, "identity unchanged, ignoring");
                return;
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(invitation = %invitation.id, generation, "entering rendering");

        // Entering Rendering always clears the previous artifact and
        // error before any work starts.
        self.state.send_replace(RenderState {
            invitation: Some(invitation.clone()),
            phase: RenderPhase::Rendering,
        });

        let renderer = Arc::clone(&self.renderer);
        let counter = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);
        let timeout = self.config.render_timeout;

        tokio::spawn(async move {
            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, renderer.render(&invitation)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(RenderError::Timeout(limit)),
                },
                None => renderer.render(&invitation).await,
            };

            // Stale-result suppression keyed on generation, not arrival
            // order: publish only if no newer render has been triggered.
            state.send_if_modified(|snapshot| {
                if counter.load(Ordering::SeqCst) != generation {
                    tracing::debug!(
                        invitation = %invitation.id,
                        generation,
                        "discarding stale render result"
                    );
                    return false;
                }
                snapshot.phase = match result {
                    Ok(artifact) => {
                        tracing::info!(invitation = %invitation.id, "render ready");
                        RenderPhase::Ready(Arc::new(artifact))
                    }
                    Err(error) => {
                        tracing::warn!(invitation = %invitation.id, %error, "render failed");
                        RenderPhase::Failed(error)
                    }
                };
                true
            });
        });
    }

    /// Explicit reset back to `Idle` (form cleared).
    ///
    /// Any in-flight render is superseded and its result discarded.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(RenderState::default());
        tracing::debug!("session reset to idle");
    }

    /// Wait until the current render settles (`Ready`, `Failed`, or
    /// `Idle`) and return the snapshot.
    pub async fn settled(&self) -> RenderState {
        let mut rx = self.subscribe();
        loop {
            let snapshot = rx.borrow_and_update().clone();
            if !snapshot.phase.is_rendering() {
                return snapshot;
            }
            if rx.changed().await.is_err() {
                return snapshot;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let controller = SessionController::with_defaults();
        let state = controller.current();
        assert!(state.invitation.is_none());
        assert!(matches!(state.phase, RenderPhase::Idle));
    }

    #[test]
    fn test_phase_accessors() {
        assert!(RenderPhase::Rendering.is_rendering());
        assert!(RenderPhase::Idle.artifact().is_none());
        let failed = RenderPhase::Failed(RenderError::TaskFailed("x".into()));
        assert!(failed.error().is_some());
    }
}

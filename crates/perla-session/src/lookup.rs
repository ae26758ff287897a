//! Guard-side invitation lookup.
//!
//! The scan-and-lookup screen has no real backend yet: fetches resolve
//! mock data after a fixed artificial delay. What is real is the
//! schema seam: a scanned string that parses as [`TokenPayload`]
//! fills the details from the payload, which is the contract the
//! encoder side must keep.

use perla_core::TokenPayload;
use std::time::Duration;
use time::OffsetDateTime;

use crate::notice::Notice;

/// Gate decision state for a scanned invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    /// Awaiting a decision
    Pending,
    /// Access approved
    Approved,
    /// Access declined
    Declined,
}

/// Details shown to the guard for one scanned invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationDetails {
    /// Scanned identifier (raw string when the scan was not a payload)
    pub id: String,
    /// Resident who created the invitation (mock)
    pub resident_name: String,
    /// Guest the invitation admits
    pub guest_name: String,
    /// Companion count
    pub guest_count: u8,
    /// Scan timestamp
    pub scanned_at: OffsetDateTime,
    /// Current decision state
    pub status: LookupStatus,
}

/// Delays for the stubbed backend round-trips.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Artificial fetch latency
    pub fetch_delay: Duration,
    /// Artificial approve/decline latency
    pub decision_delay: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            fetch_delay: Duration::from_millis(1000),
            decision_delay: Duration::from_millis(500),
        }
    }
}

impl LookupConfig {
    /// Config for tests (near-zero delays).
    pub fn for_testing() -> Self {
        Self {
            fetch_delay: Duration::from_millis(5),
            decision_delay: Duration::from_millis(2),
        }
    }
}

/// Stubbed lookup backend for the guard station.
#[derive(Debug, Clone, Default)]
pub struct LookupService {
    config: LookupConfig,
}

impl LookupService {
    /// Service with explicit delays.
    pub fn new(config: LookupConfig) -> Self {
        Self { config }
    }

    /// Resolve details for a scanned string.
    ///
    /// Parses the scan as a token payload when possible; otherwise the
    /// raw string stands in as the id and the rest is mock data.
    pub async fn fetch(&self, scanned: &str) -> InvitationDetails {
        tokio::time::sleep(self.config.fetch_delay).await;

        let (id, guest_name, guest_count) = match TokenPayload::from_json(scanned) {
            Ok(payload) => (payload.id.to_string(), payload.name, payload.guests),
            Err(_) => (scanned.to_string(), "Jane Smith".to_string(), 2),
        };

        InvitationDetails {
            id,
            resident_name: "John Doe".to_string(),
            guest_name,
            guest_count,
            scanned_at: OffsetDateTime::now_utc(),
            status: LookupStatus::Pending,
        }
    }

    /// Approve access for a scanned invitation.
    pub async fn approve(&self, details: &mut InvitationDetails) -> Notice {
        tokio::time::sleep(self.config.decision_delay).await;
        details.status = LookupStatus::Approved;
        tracing::info!(invitation = %details.id, "access approved");
        Notice::info("Acceso aprobado", "Se ha aprobado el acceso del invitado.")
    }

    /// Decline access for a scanned invitation.
    pub async fn decline(&self, details: &mut InvitationDetails) -> Notice {
        tokio::time::sleep(self.config.decision_delay).await;
        details.status = LookupStatus::Declined;
        tracing::info!(invitation = %details.id, "access declined");
        Notice::error("Acceso denegado", "Se ha denegado el acceso del invitado.")
    }
}

//! In-memory invitation working set.
//!
//! Invitations live only in transient session state; there is no
//! persistence across sessions. The invitation id is the dedup key.

use perla_core::{Invitation, InvitationId};

use crate::notice::Notice;

/// Ordered working set of created invitations.
#[derive(Debug, Default)]
pub struct InvitationRegistry {
    invitations: Vec<Invitation>,
}

impl InvitationRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an invitation, returning the creation notice.
    ///
    /// A duplicate id is ignored and produces no notice.
    pub fn add(&mut self, invitation: Invitation) -> Option<Notice> {
        if self.invitations.iter().any(|i| i.id == invitation.id) {
            tracing::debug!(invitation = %invitation.id, "duplicate id ignored");
            return None;
        }
        let notice = Notice::info(
            "Invitación creada",
            format!(
                "Se ha creado la invitación para {} exitosamente.",
                invitation.name
            ),
        );
        self.invitations.push(invitation);
        Some(notice)
    }

    /// Remove by id, returning the deletion notice if it existed.
    pub fn remove(&mut self, id: InvitationId) -> Option<Notice> {
        let index = self.invitations.iter().position(|i| i.id == id)?;
        let removed = self.invitations.remove(index);
        Some(Notice::info(
            "Invitación eliminada",
            format!("Se ha eliminado la invitación para {}.", removed.name),
        ))
    }

    /// Look up by id.
    pub fn get(&self, id: InvitationId) -> Option<&Invitation> {
        self.invitations.iter().find(|i| i.id == id)
    }

    /// Number of active invitations.
    pub fn len(&self) -> usize {
        self.invitations.len()
    }

    /// True when no invitations exist.
    pub fn is_empty(&self) -> bool {
        self.invitations.is_empty()
    }

    /// Iterate in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Invitation> {
        self.invitations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation(name: &str) -> Invitation {
        Invitation::new(name, 1, false).unwrap()
    }

    #[test]
    fn test_add_produces_notice() {
        let mut registry = InvitationRegistry::new();
        let notice = registry.add(invitation("Ana Torres")).unwrap();
        assert!(notice.description.unwrap().contains("Ana Torres"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_id_ignored() {
        let mut registry = InvitationRegistry::new();
        let inv = invitation("Ana Torres");
        assert!(registry.add(inv.clone()).is_some());
        assert!(registry.add(inv).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_returns_notice() {
        let mut registry = InvitationRegistry::new();
        let inv = invitation("Ana Torres");
        let id = inv.id;
        registry.add(inv);

        let notice = registry.remove(id).unwrap();
        assert!(notice.description.unwrap().contains("Ana Torres"));
        assert!(registry.is_empty());
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn test_iteration_keeps_creation_order() {
        let mut registry = InvitationRegistry::new();
        registry.add(invitation("Ana Torres"));
        registry.add(invitation("Benito Jurado"));

        let names: Vec<_> = registry.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Ana Torres", "Benito Jurado"]);
    }
}

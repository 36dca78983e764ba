use bevy_ecs::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::{
    physics::BodyId,
    protocol::ParticipantId,
    replication::{Permissions, Replication},
};

// ============================================================================
// Net State
// ============================================================================

/// Authority-side view of ownership claims and replicated tags.
///
/// A claim is granted to the first participant that asks while the hierarchy is
/// under default ownership; later claims by anyone else fail until it is dropped.
#[derive(Resource, Debug, Default)]
pub struct NetState {
    claims: HashMap<BodyId, ParticipantId>,
    tags: HashMap<BodyId, HashSet<&'static str>>,
}

impl Replication for NetState {
    fn take_ownership(&mut self, root: BodyId, participant: ParticipantId) -> bool {
        match self.claims.get(&root) {
            Some(current) if *current != participant => false,
            _ => {
                self.claims.insert(root, participant);
                true
            }
        }
    }

    fn drop_ownership(&mut self, root: BodyId) {
        self.claims.remove(&root);
    }

    fn owner(&self, root: BodyId) -> Option<ParticipantId> {
        self.claims.get(&root).copied()
    }

    fn add_tag(&mut self, root: BodyId, tag: &'static str) {
        self.tags.entry(root).or_default().insert(tag);
    }

    fn remove_tag(&mut self, root: BodyId, tag: &'static str) {
        if let Some(tags) = self.tags.get_mut(&root) {
            tags.remove(tag);
            if tags.is_empty() {
                self.tags.remove(&root);
            }
        }
    }

    fn has_tag(&self, root: BodyId, tag: &str) -> bool {
        self.tags.get(&root).is_some_and(|tags| tags.contains(tag))
    }
}

// ============================================================================
// Admin List
// ============================================================================

// Participants allowed to use privileged movement.
#[derive(Resource, Debug, Default, Clone)]
pub struct AdminList(pub HashSet<ParticipantId>);

impl Permissions for AdminList {
    fn can_noclip(&self, participant: ParticipantId) -> bool {
        self.0.contains(&participant)
    }
}

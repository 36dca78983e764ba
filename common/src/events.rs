use bevy_ecs::prelude::*;
use bevy_math::Vec3;

use crate::{grab::ReleaseReason, physics::BodyId, protocol::ParticipantId};

// ============================================================================
// Effect Events
// ============================================================================

/// Fire-and-forget notifications for sounds, particles and haptics.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum EffectEvent {
    CannotPickUp {
        holder: ParticipantId,
    },
    Grabbed {
        holder: ParticipantId,
        body: BodyId,
    },
    Dropped {
        holder: ParticipantId,
        body: BodyId,
    },
    Thrown {
        holder: ParticipantId,
        body: BodyId,
        impulse: Vec3,
    },
    Frozen {
        holder: ParticipantId,
        body: BodyId,
        position: Vec3,
    },
    Unfrozen {
        holder: ParticipantId,
        root: BodyId,
        count: usize,
    },
    ForcedRelease {
        holder: ParticipantId,
        body: BodyId,
        reason: ReleaseReason,
    },
    Jumped {
        participant: ParticipantId,
    },
    NoclipDenied {
        participant: ParticipantId,
    },
}

// Queue filled by the simulation core and drained by the presentation layer.
#[derive(Resource, Debug, Default)]
pub struct EffectQueue {
    events: Vec<EffectEvent>,
}

impl EffectQueue {
    pub fn push(&mut self, event: EffectEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = EffectEvent> + '_ {
        self.events.drain(..)
    }

    #[must_use]
    pub fn pending(&self) -> &[EffectEvent] {
        &self.events
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

use bevy_ecs::prelude::*;
use tracing::debug;

use crate::resources::EffectStats;
use common::{EffectEvent, EffectQueue};

// ============================================================================
// Effect Presentation
// ============================================================================

// Moves the core's queued cues onto the ECS message bus.
pub fn drain_effects_system(mut queue: ResMut<EffectQueue>, mut effects: MessageWriter<EffectEvent>) {
    for event in queue.drain() {
        effects.write(event);
    }
}

// Headless presentation: log every cue and keep totals.
pub fn present_effects_system(mut effects: MessageReader<EffectEvent>, mut stats: ResMut<EffectStats>) {
    for event in effects.read() {
        debug!("effect: {event:?}");
        stats.total += 1;
        match event {
            EffectEvent::CannotPickUp { .. } => stats.cannot_pick_up += 1,
            EffectEvent::Grabbed { .. } => stats.grabs += 1,
            EffectEvent::Dropped { .. }
            | EffectEvent::Thrown { .. }
            | EffectEvent::Frozen { .. }
            | EffectEvent::ForcedRelease { .. } => stats.releases += 1,
            EffectEvent::Unfrozen { .. } | EffectEvent::Jumped { .. } | EffectEvent::NoclipDenied { .. } => {}
        }
    }
}

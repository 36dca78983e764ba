use bevy_ecs::prelude::*;

use common::{ActionSet, GrabToolKind};

// ============================================================================
// Bevy Components
// ============================================================================

/// Random-input avatar. `held` is what the bot is currently holding down.
#[derive(Component, Debug, Default)]
pub struct Bot {
    pub held: ActionSet,
}

/// Request to swap the equipped grab tool at the top of the next tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct EquipRequest(pub GrabToolKind);

/// Marker component: the participant disconnected and the avatar must be removed.
#[derive(Component)]
pub struct Leaving;

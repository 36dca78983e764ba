use bevy_ecs::prelude::*;
use tracing::{debug, info};

use super::SimParams;
use crate::components::{EquipRequest, Leaving};
use common::{GrabTool, protocol::ParticipantId};

// ============================================================================
// Tool Switching
// ============================================================================

pub fn equip_system(
    mut commands: Commands,
    mut sim: SimParams,
    mut avatars: Query<(Entity, &ParticipantId, &EquipRequest, &mut GrabTool)>,
) {
    let mut ctx = sim.ctx();
    for (entity, id, request, mut tool) in &mut avatars {
        if tool.kind() != request.0 {
            tool.unequip(&mut ctx);
            *tool = GrabTool::new(*id, request.0);
            debug!("{id:?} equipped {:?}", request.0);
        }
        commands.entity(entity).remove::<EquipRequest>();
    }
}

// ============================================================================
// Leaving
// ============================================================================

// A departing participant lets go of whatever it holds before the avatar goes away.
pub fn leave_system(
    mut commands: Commands,
    mut sim: SimParams,
    mut leaving: Query<(Entity, &ParticipantId, Option<&mut GrabTool>), With<Leaving>>,
) {
    let mut ctx = sim.ctx();
    for (entity, id, tool) in &mut leaving {
        if let Some(mut tool) = tool {
            tool.unequip(&mut ctx);
        }
        commands.entity(entity).despawn();
        info!("{id:?} left");
    }
}

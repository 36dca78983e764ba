use bevy_ecs::prelude::*;
use tracing::info;

use crate::{
    components::Bot,
    config::SimConfig,
    map::{generate_arena, spawn_points},
    resources::BotRng,
};
use common::{
    GrabTool, GrabToolKind, InputFrame, LocomotionController, LocomotionTuning,
    protocol::ParticipantId,
    sandbox::{AdminList, NetState, PhysicsScene},
};

// ============================================================================
// World Setup
// ============================================================================

pub fn setup_world_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut rng: ResMut<BotRng>,
    mut scene: ResMut<PhysicsScene>,
    mut net: ResMut<NetState>,
    mut admins: ResMut<AdminList>,
) {
    let layout = generate_arena(&mut scene, &mut net, &mut rng.0, config.props);

    for (i, point) in spawn_points(config.bots).into_iter().enumerate() {
        let id = ParticipantId(i as u32 + 1);
        let kind = GrabToolKind::ALL[i % GrabToolKind::ALL.len()];
        commands.spawn((
            id,
            LocomotionController::new(id, point, LocomotionTuning::default()),
            InputFrame::default(),
            GrabTool::new(id, kind),
            Bot::default(),
        ));
        if config.admin {
            admins.0.insert(id);
        }
    }

    info!(
        "arena ready: {} props, {} bots{}",
        layout.props.len(),
        config.bots,
        if config.admin { " (admin)" } else { "" }
    );
}

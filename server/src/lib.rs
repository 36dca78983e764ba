pub mod components;
pub mod config;
pub mod constants;
pub mod map;
pub mod resources;
pub mod systems;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_time::Time;

use crate::{
    config::SimConfig,
    resources::{BotRng, EffectStats, LatestFrame, SimClock},
    systems::*,
};
use common::{
    EffectEvent, EffectQueue,
    sandbox::{AdminList, NetState, PhysicsScene},
};

// ============================================================================
// App Assembly
// ============================================================================

/// Headless simulation app. The caller drives it with `App::update`, one fixed tick per call.
#[must_use]
pub fn build_app(config: SimConfig) -> App {
    let mut app = App::new();

    app.insert_resource(Time::<()>::default())
        .insert_resource(BotRng::seeded(config.seed))
        .insert_resource(config)
        .init_resource::<SimClock>()
        .init_resource::<PhysicsScene>()
        .init_resource::<NetState>()
        .init_resource::<EffectQueue>()
        .init_resource::<AdminList>()
        .init_resource::<LatestFrame>()
        .init_resource::<EffectStats>()
        .add_message::<EffectEvent>()
        .add_systems(Startup, setup_world_system)
        .add_systems(
            Update,
            (
                // Tick order matters:
                // 1. Clock and input for this tick
                // 2. Lifecycle changes (tool swaps, departures) before anyone moves
                // 3. Locomotion, then grab tools aiming from the new eye position
                // 4. Physics integrates the velocities the tools just set
                // 5. Cues and replication see the settled state
                advance_time_system,
                bot_input_system,
                equip_system,
                leave_system,
                locomotion_system,
                grab_system,
                physics_step_system,
                drain_effects_system,
                present_effects_system,
                replication_system,
            )
                .chain(),
        );

    app
}

use bevy_ecs::{prelude::*, system::SystemParam};
use bevy_time::Time;

use common::{
    SimContext,
    events::EffectQueue,
    sandbox::{AdminList, NetState, PhysicsScene},
};

pub mod bots;
pub mod effects;
pub mod lifecycle;
pub mod replication;
pub mod setup;
pub mod simulation;

pub use bots::bot_input_system;
pub use effects::{drain_effects_system, present_effects_system};
pub use lifecycle::{equip_system, leave_system};
pub use replication::replication_system;
pub use setup::setup_world_system;
pub use simulation::{advance_time_system, grab_system, locomotion_system, physics_step_system};

// ============================================================================
// Simulation Context Param
// ============================================================================

/// World singletons every core operation needs, borrowed together so a system can
/// hand out one `SimContext` per run.
#[derive(SystemParam)]
pub struct SimParams<'w> {
    time: Res<'w, Time>,
    scene: ResMut<'w, PhysicsScene>,
    net: ResMut<'w, NetState>,
    effects: ResMut<'w, EffectQueue>,
    admins: Res<'w, AdminList>,
}

impl SimParams<'_> {
    pub fn ctx(&mut self) -> SimContext<'_> {
        let dt = self.time.delta_secs();
        let now = self.time.elapsed_secs();
        SimContext::new(
            &mut *self.scene,
            &mut *self.net,
            &mut *self.effects,
            &*self.admins,
            dt,
            now,
        )
    }
}

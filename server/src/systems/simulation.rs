use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_time::Time;
use std::time::Duration;

use super::SimParams;
use crate::{config::SimConfig, resources::SimClock};
use common::{GrabTool, InputFrame, LocomotionController, sandbox::PhysicsScene};

// ============================================================================
// Clock
// ============================================================================

// Advances the virtual clock by exactly one fixed step so the simulation never
// depends on how late the host loop woke up.
pub fn advance_time_system(mut time: ResMut<Time>, config: Res<SimConfig>, mut clock: ResMut<SimClock>) {
    time.advance_by(Duration::from_secs_f32(config.dt()));
    clock.tick += 1;
}

// ============================================================================
// Locomotion
// ============================================================================

pub fn locomotion_system(
    mut sim: SimParams,
    mut avatars: Query<(Entity, &mut LocomotionController, &InputFrame, Option<&GrabTool>)>,
) {
    // positions from the start of the tick, so push-apart does not depend on iteration order
    let feet: Vec<(Entity, Vec3)> = avatars
        .iter()
        .map(|(entity, controller, _, _)| (entity, controller.position()))
        .collect();

    let mut ctx = sim.ctx();
    for (entity, mut controller, input, tool) in &mut avatars {
        let others: Vec<Vec3> = feet
            .iter()
            .filter(|(other, _)| *other != entity)
            .map(|(_, position)| *position)
            .collect();

        controller.lock_eyes(tool.is_some_and(|tool| tool.locks_view(input)));
        controller.tick(input, &others, &mut ctx);
    }
}

// ============================================================================
// Grab Tools
// ============================================================================

// Runs after locomotion so every tool aims from this tick's eye position.
pub fn grab_system(mut sim: SimParams, mut avatars: Query<(&LocomotionController, &InputFrame, &mut GrabTool)>) {
    let mut ctx = sim.ctx();
    for (controller, input, mut tool) in &mut avatars {
        tool.tick(&controller.view(), input, &mut ctx);
    }
}

// ============================================================================
// Physics
// ============================================================================

pub fn physics_step_system(time: Res<Time>, mut scene: ResMut<PhysicsScene>) {
    scene.step(time.delta_secs());
}

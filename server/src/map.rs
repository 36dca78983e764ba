use bevy_math::{Quat, Vec3};
use rand::Rng;
use tracing::debug;

use crate::constants::*;
use common::{
    physics::{BodyId, BodyType, PhysicsWorld},
    replication::{MAP_TAG, Replication},
    sandbox::{BodyDesc, NetState, PhysicsScene},
};

/// Bodies created for the arena.
#[derive(Debug, Default)]
pub struct ArenaLayout {
    pub geometry: Vec<BodyId>,
    pub props: Vec<BodyId>,
}

// ============================================================================
// Arena Generation
// ============================================================================

// Floor top face is y = 0; walls enclose the square arena.
pub fn generate_arena(scene: &mut PhysicsScene, net: &mut NetState, rng: &mut impl Rng, props: usize) -> ArenaLayout {
    let mut layout = ArenaLayout::default();

    let floor = scene.spawn(BodyDesc::fixed(
        Vec3::new(0.0, -FLOOR_THICKNESS / 2.0, 0.0),
        Vec3::new(ARENA_HALF_SIZE, FLOOR_THICKNESS / 2.0, ARENA_HALF_SIZE),
    ));
    layout.geometry.push(floor);

    for (x, z, half_x, half_z) in [
        (ARENA_HALF_SIZE, 0.0, WALL_THICKNESS, ARENA_HALF_SIZE),
        (-ARENA_HALF_SIZE, 0.0, WALL_THICKNESS, ARENA_HALF_SIZE),
        (0.0, ARENA_HALF_SIZE, ARENA_HALF_SIZE, WALL_THICKNESS),
        (0.0, -ARENA_HALF_SIZE, ARENA_HALF_SIZE, WALL_THICKNESS),
    ] {
        let wall = scene.spawn(BodyDesc::fixed(
            Vec3::new(x, WALL_HEIGHT / 2.0, z),
            Vec3::new(half_x, WALL_HEIGHT / 2.0, half_z),
        ));
        layout.geometry.push(wall);
    }

    for body in &layout.geometry {
        net.add_tag(*body, MAP_TAG);
    }

    for index in 0..props {
        let half = rng.random_range(PROP_MIN_HALF_SIZE..=PROP_MAX_HALF_SIZE);
        let position = Vec3::new(
            rng.random_range(-PROP_SPREAD..=PROP_SPREAD),
            half,
            rng.random_range(-PROP_SPREAD..=PROP_SPREAD),
        );
        let yaw = Quat::from_rotation_y(rng.random_range(0.0..std::f32::consts::TAU));
        let prop = scene.spawn(BodyDesc::dynamic(position, Vec3::splat(half)).rotated(yaw));

        // every fourth prop is articulated: a second box hanging off the first
        if index % 4 == 3 {
            let limb_offset = yaw * Vec3::new(half * 2.5, 0.0, 0.0);
            scene.spawn_child(prop, BodyDesc::dynamic(position + limb_offset, Vec3::splat(half / 2.0)).rotated(yaw));
        }
        if rng.random_bool(FROZEN_PROP_PROBABILITY) {
            for member in scene.hierarchy(prop) {
                scene.set_body_type(member, BodyType::Static);
            }
        }
        layout.props.push(prop);
    }

    debug!(
        "generated arena: {} geometry bodies, {} props ({} bodies total)",
        layout.geometry.len(),
        layout.props.len(),
        scene.len()
    );
    layout
}

// Evenly spaced feet positions on a circle around the centre.
#[must_use]
pub fn spawn_points(count: usize) -> Vec<Vec3> {
    let step = std::f32::consts::TAU / count.max(1) as f32;
    (0..count)
        .map(|i| {
            let angle = step * i as f32;
            Vec3::new(angle.cos() * BOT_SPAWN_RADIUS, 0.0, angle.sin() * BOT_SPAWN_RADIUS)
        })
        .collect()
}

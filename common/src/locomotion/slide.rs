use bevy_math::Vec3;

use crate::{
    constants::{MAX_SLIDE_BUMPS, PHYSICS_EPSILON, SLIDE_OVERBOUNCE},
    physics::{Hull, PhysicsWorld},
};

// Removes the part of `v` heading into the plane with normal `normal`.
#[must_use]
pub fn clip_velocity(v: Vec3, normal: Vec3) -> Vec3 {
    let into = v.dot(normal);
    if into >= 0.0 {
        return v;
    }
    v - normal * (into * SLIDE_OVERBOUNCE)
}

/// Collision-swept move of `hull` by `motion`, sliding along whatever it hits.
///
/// `velocity` is clipped against every plane touched so the avatar does not keep
/// pushing into walls on later ticks. Returns the new feet position.
pub fn slide_move(physics: &dyn PhysicsWorld, hull: Hull, start: Vec3, motion: Vec3, velocity: &mut Vec3) -> Vec3 {
    let mut position = start;
    let mut remaining = motion;
    let mut planes: Vec<Vec3> = Vec::with_capacity(MAX_SLIDE_BUMPS);

    for _ in 0..MAX_SLIDE_BUMPS {
        if remaining.length_squared() < PHYSICS_EPSILON {
            break;
        }

        let trace = physics.trace_hull(hull, position, position + remaining);
        position = trace.end;
        if trace.hit.is_none() {
            break;
        }

        remaining *= 1.0 - trace.fraction;
        planes.push(trace.normal);
        for plane in &planes {
            remaining = clip_velocity(remaining, *plane);
            *velocity = clip_velocity(*velocity, *plane);
        }

        // wedged between planes: stop rather than jitter
        if planes.iter().any(|plane| remaining.dot(*plane) < -PHYSICS_EPSILON) {
            break;
        }
    }

    position
}

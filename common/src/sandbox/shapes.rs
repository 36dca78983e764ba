use bevy_math::{Mat3, Quat, Vec3};

use crate::constants::PHYSICS_EPSILON;

/// Result of a sweep collision test: surface normal and time of impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub normal: Vec3,
    pub t: f32,
    // The segment started inside the box.
    pub inside: bool,
}

/// Segment `origin + dir * t` for t in [0,1] against a box centred at the local origin.
///
/// Touching a face while moving along or away from it is not a hit.
#[must_use]
pub fn sweep_segment_vs_box(origin: Vec3, dir: Vec3, half: Vec3) -> Option<Collision> {
    if (0..3).all(|axis| origin[axis].abs() < half[axis]) {
        return Some(Collision {
            normal: Vec3::ZERO,
            t: 0.0,
            inside: true,
        });
    }

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let (local, ray_dir, half_extent) = (origin[axis], dir[axis], half[axis]);
        if ray_dir.abs() <= PHYSICS_EPSILON {
            if local.abs() >= half_extent {
                return None;
            }
            continue;
        }

        let t1 = (-half_extent - local) / ray_dir;
        let t2 = (half_extent - local) / ray_dir;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            normal = Vec3::ZERO;
            normal[axis] = -ray_dir.signum();
        }
        t_exit = t_exit.min(far);
    }

    if t_enter > t_exit || !(0.0..=1.0).contains(&t_enter) {
        return None;
    }

    Some(Collision {
        normal,
        t: t_enter,
        inside: false,
    })
}

// Half extents of the world-space AABB enclosing a rotated box.
#[must_use]
pub fn rotated_half_extents(rotation: Quat, half: Vec3) -> Vec3 {
    let m = Mat3::from_quat(rotation);
    m.x_axis.abs() * half.x + m.y_axis.abs() * half.y + m.z_axis.abs() * half.z
}

// Check if two boxes overlap on every axis (touching faces do not count).
#[must_use]
pub fn boxes_overlap(center_a: Vec3, half_a: Vec3, center_b: Vec3, half_b: Vec3) -> bool {
    let delta = (center_a - center_b).abs();
    let reach = half_a + half_b;
    delta.x < reach.x && delta.y < reach.y && delta.z < reach.z
}

use bevy_math::Vec3;

use crate::{constants::PHYSICS_EPSILON, math::horizontal};

#[derive(Debug, Clone, Copy)]
pub struct SeparationTuning {
    pub radius: f32,
    pub inward_damping: f32,
    pub push_speed: f32,
}

/// Soft avatar-avatar separation.
///
/// Cancels part of any velocity heading into a nearby avatar and returns an outward push
/// velocity to add to this tick's motion. The push is not stored in `velocity`, so it
/// never accumulates across ticks.
pub fn separate(position: Vec3, velocity: &mut Vec3, repulsors: &[Vec3], tuning: SeparationTuning) -> Vec3 {
    let mut push = Vec3::ZERO;

    for other in repulsors {
        let offset = horizontal(position - *other);
        let distance = offset.length();
        if distance >= tuning.radius {
            continue;
        }

        // coincident avatars still need some direction to part along
        let direction = if distance > PHYSICS_EPSILON { offset / distance } else { Vec3::X };
        let falloff = 1.0 - distance / tuning.radius;

        let inward = velocity.dot(direction);
        if inward < 0.0 {
            *velocity -= direction * (inward * tuning.inward_damping);
        }
        push += direction * (falloff * tuning.push_speed);
    }

    push
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SEPARATION_INWARD_DAMPING, SEPARATION_PUSH_SPEED, SEPARATION_RADIUS};

    const TUNING: SeparationTuning = SeparationTuning {
        radius: SEPARATION_RADIUS,
        inward_damping: SEPARATION_INWARD_DAMPING,
        push_speed: SEPARATION_PUSH_SPEED,
    };

    #[test]
    fn moving_into_another_avatar_is_damped_and_pushed_back() {
        let mut velocity = Vec3::new(100.0, 0.0, 0.0);
        let push = separate(Vec3::ZERO, &mut velocity, &[Vec3::new(20.0, 0.0, 0.0)], TUNING);

        assert!((velocity.x - 40.0).abs() < 1e-3);
        assert!((push - Vec3::new(-64.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn moving_away_keeps_velocity() {
        let mut velocity = Vec3::new(-100.0, 0.0, 0.0);
        let push = separate(Vec3::ZERO, &mut velocity, &[Vec3::new(20.0, 0.0, 0.0)], TUNING);

        assert!((velocity.x + 100.0).abs() < 1e-3);
        assert!(push.x < 0.0);
    }

    #[test]
    fn avatars_out_of_range_and_height_are_ignored_correctly() {
        let mut velocity = Vec3::new(100.0, 0.0, 0.0);
        let push = separate(Vec3::ZERO, &mut velocity, &[Vec3::new(50.0, 0.0, 0.0)], TUNING);
        assert_eq!(push, Vec3::ZERO);

        // vertical offset does not reduce the horizontal push
        let above = separate(Vec3::ZERO, &mut velocity, &[Vec3::new(20.0, 30.0, 0.0)], TUNING);
        assert!((above.x + 64.0).abs() < 1e-3);
        assert!(above.y.abs() < f32::EPSILON);
    }
}

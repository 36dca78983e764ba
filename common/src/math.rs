use bevy_math::{EulerRot, Quat, Vec3};

use crate::constants::{PHYSICS_EPSILON, PITCH_LIMIT_DEGREES};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

// ============================================================================
// Look Angles
// ============================================================================

/// View angles in degrees. Yaw turns about +Y, positive pitch looks up, roll is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl LookAngles {
    #[must_use]
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch, roll: 0.0 }
    }

    /// Applies a yaw/pitch delta, clamps pitch and forces roll to zero.
    pub fn apply_delta(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(360.0);
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.roll = 0.0;
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw.to_radians(), self.pitch.to_radians(), 0.0)
    }

    #[must_use]
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

// ============================================================================
// Rotation Helpers
// ============================================================================

// Rotation vector (axis * angle) of the shortest arc taking `from` onto `to`.
#[must_use]
pub fn rotation_error(from: Quat, to: Quat) -> Vec3 {
    let mut delta = (to * from.inverse()).normalize();
    // q and -q are the same rotation; pick the short way round
    if delta.w < 0.0 {
        delta = -delta;
    }
    let (axis, angle) = delta.to_axis_angle();
    if angle.abs() < PHYSICS_EPSILON {
        Vec3::ZERO
    } else {
        axis * angle
    }
}

// Quantizes every Euler component of `rotation` to a multiple of `step_degrees`.
#[must_use]
pub fn snap_rotation(rotation: Quat, step_degrees: f32) -> Quat {
    let step = step_degrees.to_radians();
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    let snap = |angle: f32| (angle / step).round() * step;
    Quat::from_euler(EulerRot::YXZ, snap(y), snap(x), snap(z))
}

// Frame-rate independent exponential approach of `current` toward `target`.
#[must_use]
pub fn approach_exp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let blend = 1.0 - (-rate * dt).exp();
    (target - current).mul_add(blend, current)
}

#[must_use]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped_and_roll_zeroed() {
        let mut angles = LookAngles { yaw: 10.0, pitch: 80.0, roll: 5.0 };
        angles.apply_delta(0.0, 45.0);
        assert!((angles.pitch - PITCH_LIMIT_DEGREES).abs() < 1e-4);
        assert!(angles.roll.abs() < f32::EPSILON);

        angles.apply_delta(0.0, -500.0);
        assert!((angles.pitch + PITCH_LIMIT_DEGREES).abs() < 1e-4);
    }

    #[test]
    fn zero_angles_look_down_negative_z() {
        let forward = LookAngles::default().forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);

        let up = LookAngles::new(0.0, 90.0).forward();
        assert!((up - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn rotation_error_takes_short_arc() {
        let from = Quat::from_rotation_y(0.1);
        let to = Quat::from_rotation_y(0.4);
        let err = rotation_error(from, to);
        assert!((err - Vec3::new(0.0, 0.3, 0.0)).length() < 1e-4);
        assert_eq!(rotation_error(to, to), Vec3::ZERO);
    }

    #[test]
    fn snapping_rounds_to_nearest_step() {
        let snapped = snap_rotation(Quat::from_rotation_y(50_f32.to_radians()), 45.0);
        assert!(snapped.angle_between(Quat::from_rotation_y(45_f32.to_radians())) < 1e-4);
    }

    #[test]
    fn exponential_approach_never_overshoots() {
        let mut value = 64.0;
        for _ in 0..200 {
            value = approach_exp(value, 28.0, 10.0, 1.0 / 66.0);
            assert!(value >= 28.0);
        }
        assert!((value - 28.0).abs() < 0.01);
    }
}

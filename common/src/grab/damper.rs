use bevy_math::Vec3;

use crate::constants::PHYSICS_EPSILON;

/// Critically damped spring pulling an offset toward zero without overshoot.
///
/// The target is allowed to move between steps, so the damper works on the offset
/// `current - target` and keeps its own rate of change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalDamper {
    pub smooth_time: f32,
    velocity: Vec3,
}

impl CriticalDamper {
    // Starts from an existing rate of change so grabbing a moving body does not jolt it.
    #[must_use]
    pub const fn seeded(smooth_time: f32, velocity: Vec3) -> Self {
        Self { smooth_time, velocity }
    }

    /// Advances by `dt` and returns the new offset.
    pub fn step(&mut self, offset: Vec3, dt: f32) -> Vec3 {
        let smooth_time = self.smooth_time.max(PHYSICS_EPSILON);
        let omega = 2.0 / smooth_time;
        let x = omega * dt;
        // Pade-style approximation of exp(-x), stable for large steps
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let temp = (self.velocity + offset * omega) * dt;
        self.velocity = (self.velocity - temp * omega) * decay;
        (offset + temp) * decay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 66.0;

    #[test]
    fn converges_without_overshoot() {
        let mut damper = CriticalDamper::seeded(0.2, Vec3::ZERO);
        let mut offset = Vec3::new(100.0, 0.0, 0.0);
        for _ in 0..300 {
            let next = damper.step(offset, DT);
            assert!(next.x >= 0.0);
            assert!(next.x <= offset.x);
            offset = next;
        }
        assert!(offset.x < 0.01);
    }

    #[test]
    fn shorter_smooth_time_is_stiffer() {
        let mut soft = CriticalDamper::seeded(0.2, Vec3::ZERO);
        let mut stiff = CriticalDamper::seeded(0.05, Vec3::ZERO);
        let start = Vec3::splat(10.0);
        assert!(stiff.step(start, DT).length() < soft.step(start, DT).length());
    }

    #[test]
    fn seeded_velocity_carries_momentum() {
        let mut damper = CriticalDamper::seeded(0.2, Vec3::new(0.0, 0.0, 300.0));
        let next = damper.step(Vec3::ZERO, DT);
        assert!(next.z > 0.0);
    }
}

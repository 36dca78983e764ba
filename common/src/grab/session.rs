use bevy_math::{Quat, Vec3};
use tracing::debug;

use super::{ReleaseReason, damper::CriticalDamper, tool::ToolProfile};
use crate::{
    constants::{HOLD_SCROLL_STEP, PHYSICS_EPSILON, ROTATE_SNAP_DEGREES},
    context::SimContext,
    events::EffectEvent,
    locomotion::ViewPoint,
    math::{rotation_error, snap_rotation},
    physics::{BodyId, BodyType, PhysicsWorld, Pose},
    protocol::{GrabState, ParticipantId},
    replication::{GRABBED_TAG, Replication},
};

/// Where the holder took hold of the target, resolved at acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grip {
    pub target: BodyId,
    pub root: BodyId,
    pub sub_body: u32,
    pub local_offset: Vec3,
    pub hold_distance: f32,
}

// ============================================================================
// Grab Session
// ============================================================================

/// One live holding relationship between a holder and a physics body.
///
/// Sessions only exist while holding; releasing consumes the session.
#[derive(Debug)]
pub struct GrabSession {
    holder: ParticipantId,
    grip: Grip,
    desired: Pose,
    // Held rotation relative to the holder's yaw frame.
    rotation_offset: Quat,
    linear: CriticalDamper,
    angular: CriticalDamper,
    grabbed_at: f32,
}

impl GrabSession {
    /// Starts holding `grip`. The desired pose begins at the body's current pose.
    #[must_use]
    pub fn begin(
        holder: ParticipantId,
        grip: Grip,
        pose: Pose,
        view: &ViewPoint,
        profile: &ToolProfile,
        ctx: &SimContext,
    ) -> Self {
        let physics = &*ctx.physics;
        let velocity = physics.velocity(grip.target).unwrap_or(Vec3::ZERO);
        let angular_velocity = physics.angular_velocity(grip.target).unwrap_or(Vec3::ZERO);
        let rotation_offset = (view.yaw_rotation.inverse() * pose.rotation).normalize();

        Self {
            holder,
            grip,
            desired: pose,
            rotation_offset,
            linear: CriticalDamper::seeded(profile.smooth_time, velocity),
            angular: CriticalDamper::seeded(profile.smooth_time, angular_velocity),
            grabbed_at: ctx.now,
        }
    }

    #[must_use]
    pub const fn holder(&self) -> ParticipantId {
        self.holder
    }

    #[must_use]
    pub const fn target(&self) -> BodyId {
        self.grip.target
    }

    #[must_use]
    pub const fn root(&self) -> BodyId {
        self.grip.root
    }

    #[must_use]
    pub const fn local_grip_offset(&self) -> Vec3 {
        self.grip.local_offset
    }

    #[must_use]
    pub const fn hold_distance(&self) -> f32 {
        self.grip.hold_distance
    }

    #[must_use]
    pub const fn desired_pose(&self) -> Pose {
        self.desired
    }

    #[must_use]
    pub const fn rotation_offset(&self) -> Quat {
        self.rotation_offset
    }

    #[must_use]
    pub fn held_for(&self, now: f32) -> f32 {
        now - self.grabbed_at
    }

    // ------------------------------------------------------------------------
    // Holding
    // ------------------------------------------------------------------------

    // Top-of-tick check for changes made behind the session's back.
    pub fn validate(&self, physics: &dyn PhysicsWorld, net: &dyn Replication) -> Result<(), ReleaseReason> {
        if !physics.contains(self.grip.target) || physics.root_of(self.grip.target) != Some(self.grip.root) {
            return Err(ReleaseReason::TargetInvalid);
        }
        if net.owner(self.grip.root) != Some(self.holder) {
            return Err(ReleaseReason::OwnershipLost);
        }
        Ok(())
    }

    // Straight-line distance from the eye to the nearest point of the held body.
    #[must_use]
    pub fn distance_from(&self, physics: &dyn PhysicsWorld, eye: Vec3) -> Option<f32> {
        physics.closest_point(self.grip.target, eye).map(|point| point.distance(eye))
    }

    /// Spins the held body about the holder's up and right axes (degrees).
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let spin = Quat::from_rotation_y(yaw_delta.to_radians()) * Quat::from_rotation_x(pitch_delta.to_radians());
        self.rotation_offset = (spin * self.rotation_offset).normalize();
    }

    // Zeroes the held rotation: the body lines up with the holder's yaw frame.
    pub const fn reset_rotation(&mut self) {
        self.rotation_offset = Quat::IDENTITY;
    }

    pub fn scroll(&mut self, notches: f32, profile: &ToolProfile) {
        self.grip.hold_distance = notches
            .mul_add(HOLD_SCROLL_STEP, self.grip.hold_distance)
            .clamp(profile.min_hold, profile.max_hold);
    }

    /// Recomputes where the body should be for the current view.
    pub fn aim(&mut self, view: &ViewPoint, snap: bool) {
        let offset = if snap {
            snap_rotation(self.rotation_offset, ROTATE_SNAP_DEGREES)
        } else {
            self.rotation_offset
        };
        // offset lives in the yaw frame, so it composes on the right of the yaw rotation
        let rotation = (view.yaw_rotation * offset).normalize();
        let position = view.origin + view.forward() * self.grip.hold_distance - rotation * self.grip.local_offset;
        self.desired = Pose::new(position, rotation);
    }

    /// Sets the body's velocities so it tracks the desired pose over the next step.
    pub fn drive(&mut self, physics: &mut dyn PhysicsWorld, dt: f32) {
        if dt <= PHYSICS_EPSILON {
            return;
        }
        let Some(pose) = physics.pose(self.grip.target) else {
            return;
        };

        let offset = pose.position - self.desired.position;
        let next = self.linear.step(offset, dt);
        physics.set_velocity(self.grip.target, (next - offset) / dt);

        let error = rotation_error(self.desired.rotation, pose.rotation);
        let next_error = self.angular.step(error, dt);
        physics.set_angular_velocity(self.grip.target, (next_error - error) / dt);
    }

    #[must_use]
    pub fn snapshot(&self) -> GrabState {
        GrabState {
            holder: self.holder,
            target: self.grip.target,
            sub_body: self.grip.sub_body,
            desired_position: self.desired.position.into(),
            desired_rotation: self.desired.rotation.into(),
            hold_distance: self.grip.hold_distance,
        }
    }

    // ------------------------------------------------------------------------
    // Ending
    // ------------------------------------------------------------------------

    /// Lets go, keeping whatever momentum the body has.
    pub fn release(self, reason: ReleaseReason, ctx: &mut SimContext) {
        let (holder, body) = (self.holder, self.grip.target);
        self.end(ctx.net);
        let event = if reason.is_forced() {
            EffectEvent::ForcedRelease { holder, body, reason }
        } else {
            EffectEvent::Dropped { holder, body }
        };
        ctx.effects.push(event);
        debug!("{holder:?} released {body:?}: {reason:?}");
    }

    pub fn throw(self, direction: Vec3, force: f32, ctx: &mut SimContext) {
        let (holder, body) = (self.holder, self.grip.target);
        let impulse = direction.normalize_or_zero() * force;
        if let Some(velocity) = ctx.physics.velocity(body) {
            ctx.physics.set_velocity(body, velocity + impulse);
        }
        self.end(ctx.net);
        ctx.effects.push(EffectEvent::Thrown { holder, body, impulse });
        debug!("{holder:?} threw {body:?}");
    }

    /// Pins the body in place as static geometry with no residual motion.
    pub fn freeze(self, ctx: &mut SimContext) {
        let (holder, body) = (self.holder, self.grip.target);
        ctx.physics.set_velocity(body, Vec3::ZERO);
        ctx.physics.set_angular_velocity(body, Vec3::ZERO);
        ctx.physics.set_body_type(body, BodyType::Static);
        let position = ctx.physics.pose(body).map_or(Vec3::ZERO, |pose| pose.position);
        self.end(ctx.net);
        ctx.effects.push(EffectEvent::Frozen { holder, body, position });
        debug!("{holder:?} froze {body:?}");
    }

    // Clears the grabbed marker and hands ownership back, unless someone else has since taken it.
    fn end(self, net: &mut dyn Replication) {
        let root = self.grip.root;
        match net.owner(root) {
            Some(owner) if owner == self.holder => {
                net.drop_ownership(root);
                net.remove_tag(root, GRABBED_TAG);
            }
            Some(_) => {}
            None => net.remove_tag(root, GRABBED_TAG),
        }
    }
}

use bevy_ecs::prelude::*;
use tracing::{debug, trace};

use super::{
    GrabToolKind, ReleaseReason,
    acquire::{AcquireError, acquire},
    session::GrabSession,
};
use crate::{
    constants::*,
    context::SimContext,
    events::EffectEvent,
    input::{Action, InputFrame},
    locomotion::ViewPoint,
    physics::{BodyType, Ray, RayFilter},
    protocol::{GrabState, ParticipantId},
    replication::MAP_TAG,
};

// ============================================================================
// Tool Profiles
// ============================================================================

/// Reach, hold and release tuning for one tool kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolProfile {
    pub kind: GrabToolKind,
    pub range: f32,
    pub min_hold: f32,
    pub max_hold: f32,
    // Eye-to-body distance past which the session breaks.
    pub break_distance: f32,
    pub throw_force: f32,
    pub smooth_time: f32,
    // Static bodies are made dynamic instead of refused.
    pub converts_static: bool,
    // Minimum time between pickup and drop, and between drop and the next pickup.
    pub pickup_cooldown: f32,
}

impl ToolProfile {
    #[must_use]
    pub const fn for_kind(kind: GrabToolKind) -> Self {
        match kind {
            GrabToolKind::Suspend => Self {
                kind,
                range: SUSPEND_RANGE,
                min_hold: SUSPEND_HOLD_MIN,
                max_hold: SUSPEND_HOLD_MAX,
                break_distance: SUSPEND_BREAK_DISTANCE,
                throw_force: SUSPEND_THROW_FORCE,
                smooth_time: SUSPEND_SMOOTH_TIME,
                converts_static: false,
                pickup_cooldown: 0.0,
            },
            GrabToolKind::RigidLock => Self {
                kind,
                range: RIGID_LOCK_RANGE,
                min_hold: RIGID_LOCK_HOLD_MIN,
                max_hold: RIGID_LOCK_HOLD_MAX,
                break_distance: RIGID_LOCK_BREAK_DISTANCE,
                throw_force: 0.0,
                smooth_time: RIGID_LOCK_SMOOTH_TIME,
                converts_static: true,
                pickup_cooldown: 0.0,
            },
            GrabToolKind::HandCarry => Self {
                kind,
                range: HAND_CARRY_RANGE,
                min_hold: HAND_CARRY_HOLD_MIN,
                max_hold: HAND_CARRY_HOLD_MAX,
                break_distance: HAND_CARRY_BREAK_DISTANCE,
                throw_force: HAND_CARRY_THROW_FORCE,
                smooth_time: HAND_CARRY_SMOOTH_TIME,
                converts_static: true,
                pickup_cooldown: HAND_CARRY_PICKUP_COOLDOWN,
            },
        }
    }
}

// ============================================================================
// Grab Tool
// ============================================================================

/// An equipped grab tool: idle, or holding exactly one session.
///
/// Input mapping per kind:
/// - `Suspend`: secondary picks up or sets down, primary throws.
/// - `RigidLock`: hold primary to grab, secondary freezes in place, unfreeze-all while idle.
/// - `HandCarry`: grab toggles pick up / drop behind a short cooldown, primary throws.
#[derive(Component, Debug)]
pub struct GrabTool {
    holder: ParticipantId,
    profile: ToolProfile,
    session: Option<GrabSession>,
    last_release: f32,
}

impl GrabTool {
    #[must_use]
    pub const fn new(holder: ParticipantId, kind: GrabToolKind) -> Self {
        Self {
            holder,
            profile: ToolProfile::for_kind(kind),
            session: None,
            last_release: f32::NEG_INFINITY,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> GrabToolKind {
        self.profile.kind
    }

    #[must_use]
    pub const fn profile(&self) -> &ToolProfile {
        &self.profile
    }

    #[must_use]
    pub const fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_holding(&self) -> bool {
        self.session.is_some()
    }

    // Whether this tick's look input spins the held body instead of the camera.
    #[must_use]
    pub const fn locks_view(&self, input: &InputFrame) -> bool {
        self.session.is_some() && input.down(Action::Rotate)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<GrabState> {
        self.session.as_ref().map(GrabSession::snapshot)
    }

    /// Runs one fixed tick. `view` must come from this tick's locomotion update.
    pub fn tick(&mut self, view: &ViewPoint, input: &InputFrame, ctx: &mut SimContext) {
        if ctx.dt <= PHYSICS_EPSILON {
            return;
        }

        if let Some(Err(reason)) = self.session.as_ref().map(|s| s.validate(&*ctx.physics, &*ctx.net)) {
            self.release(reason, ctx);
        }

        let was_holding = self.is_holding();
        match self.profile.kind {
            GrabToolKind::Suspend => self.suspend_input(view, input, ctx),
            GrabToolKind::RigidLock => self.rigid_lock_input(view, input, ctx),
            GrabToolKind::HandCarry => self.hand_carry_input(view, input, ctx),
        }

        // a session acquired this tick keeps the body's own pose as its target
        if was_holding {
            self.hold(view, input, ctx);
        }
    }

    /// Switching away from the tool always lets go.
    pub fn unequip(&mut self, ctx: &mut SimContext) {
        self.release(ReleaseReason::Unequipped, ctx);
    }

    // ------------------------------------------------------------------------
    // Per-kind input
    // ------------------------------------------------------------------------

    fn suspend_input(&mut self, view: &ViewPoint, input: &InputFrame, ctx: &mut SimContext) {
        if input.pressed(Action::Secondary) {
            if self.is_holding() {
                self.release(ReleaseReason::Dropped, ctx);
            } else {
                self.try_acquire(view, ctx);
            }
        } else if input.pressed(Action::Primary) && self.is_holding() {
            self.throw(view, ctx);
        }
    }

    fn rigid_lock_input(&mut self, view: &ViewPoint, input: &InputFrame, ctx: &mut SimContext) {
        if self.is_holding() {
            if input.pressed(Action::Secondary) {
                self.freeze(ctx);
            } else if !input.down(Action::Primary) {
                self.release(ReleaseReason::Dropped, ctx);
            }
        } else if input.pressed(Action::Primary) {
            self.try_acquire(view, ctx);
        } else if input.pressed(Action::UnfreezeAll) {
            self.unfreeze_all(view, ctx);
        }
    }

    fn hand_carry_input(&mut self, view: &ViewPoint, input: &InputFrame, ctx: &mut SimContext) {
        match self.session.as_ref().map(|s| s.held_for(ctx.now)) {
            Some(_) if input.pressed(Action::Primary) => self.throw(view, ctx),
            Some(held_for) if input.pressed(Action::Grab) && held_for >= self.profile.pickup_cooldown => {
                self.release(ReleaseReason::Dropped, ctx);
            }
            None if input.pressed(Action::Grab) => self.try_acquire(view, ctx),
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn try_acquire(&mut self, view: &ViewPoint, ctx: &mut SimContext) {
        let result = if ctx.now - self.last_release < self.profile.pickup_cooldown {
            Err(AcquireError::Cooldown)
        } else {
            acquire(self.holder, view, &self.profile, ctx)
        };

        match result {
            Ok(session) => self.session = Some(session),
            Err(err) => {
                ctx.effects.push(EffectEvent::CannotPickUp { holder: self.holder });
                debug!("{:?} cannot pick up: {err}", self.holder);
            }
        }
    }

    fn hold(&mut self, view: &ViewPoint, input: &InputFrame, ctx: &mut SimContext) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let distance = session.distance_from(&*ctx.physics, view.origin);
        if distance.is_some_and(|d| d > self.profile.break_distance) {
            self.release(ReleaseReason::DistanceExceeded, ctx);
            return;
        }

        if input.down(Action::Rotate) {
            session.rotate(input.look_delta.x, input.look_delta.y);
        }
        if input.pressed(Action::ResetRotation) {
            session.reset_rotation();
        }
        if input.scroll.abs() > PHYSICS_EPSILON {
            session.scroll(input.scroll, &self.profile);
        }

        session.aim(view, input.down(Action::Snap));
        session.drive(ctx.physics, ctx.dt);
        trace!("{:?} holding {:?} at {:.1}", self.holder, session.target(), session.hold_distance());
    }

    fn release(&mut self, reason: ReleaseReason, ctx: &mut SimContext) {
        if let Some(session) = self.session.take() {
            session.release(reason, ctx);
            self.last_release = ctx.now;
        }
    }

    fn throw(&mut self, view: &ViewPoint, ctx: &mut SimContext) {
        if let Some(session) = self.session.take() {
            session.throw(view.forward(), self.profile.throw_force, ctx);
            self.last_release = ctx.now;
        }
    }

    fn freeze(&mut self, ctx: &mut SimContext) {
        if let Some(session) = self.session.take() {
            session.freeze(ctx);
            self.last_release = ctx.now;
        }
    }

    // Makes every static body in the struck hierarchy dynamic again.
    fn unfreeze_all(&mut self, view: &ViewPoint, ctx: &mut SimContext) {
        let ray = Ray {
            origin: view.origin,
            direction: view.forward(),
            max_distance: self.profile.range,
        };
        let root = ctx
            .physics
            .raycast(&ray, &RayFilter::default())
            .filter(|hit| !hit.start_solid)
            .and_then(|hit| ctx.physics.root_of(hit.body))
            .filter(|root| !ctx.net.has_tag(*root, MAP_TAG));

        let mut count = 0;
        if let Some(root) = root {
            for body in ctx.physics.hierarchy(root) {
                if ctx.physics.body_type(body) == Some(BodyType::Static) {
                    ctx.physics.set_body_type(body, BodyType::Dynamic);
                    count += 1;
                }
            }
        }

        match root {
            Some(root) if count > 0 => {
                ctx.effects.push(EffectEvent::Unfrozen {
                    holder: self.holder,
                    root,
                    count,
                });
                debug!("{:?} unfroze {count} bodies under {root:?}", self.holder);
            }
            _ => ctx.effects.push(EffectEvent::CannotPickUp { holder: self.holder }),
        }
    }
}

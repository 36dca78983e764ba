use bevy_ecs::prelude::*;
use bevy_math::{Quat, Vec3};
use tracing::{debug, trace};

use super::{
    LocomotionTuning,
    crouch::{CrouchRequest, CrouchState, CrouchTransition, next_crouch_transition},
    separation::{SeparationTuning, separate},
    slide::slide_move,
};
use crate::{
    constants::{
        GROUND_MAX_RISE_SPEED, GROUND_MIN_NORMAL_Y, GROUND_PROBE_DISTANCE, NOCLIP_BLEND_RATE, NOCLIP_DAMPING,
        PHYSICS_EPSILON, SEPARATION_INWARD_DAMPING, SEPARATION_PUSH_SPEED,
    },
    context::SimContext,
    events::EffectEvent,
    input::{Action, InputFrame},
    math::{LookAngles, approach_exp},
    physics::{Hull, PhysicsWorld},
    protocol::{AvatarPose, ParticipantId},
    replication::Permissions,
};

/// Movement regime driving friction and acceleration for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRegime {
    Grounded,
    Airborne,
    Noclip,
}

/// Where the avatar looks from, published for the grab tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    pub origin: Vec3,
    pub rotation: Quat,
    pub yaw_rotation: Quat,
}

impl ViewPoint {
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

// ============================================================================
// Locomotion Controller
// ============================================================================

/// One avatar's kinematic state, advanced once per fixed tick by its owner.
#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
    owner: ParticipantId,
    tuning: LocomotionTuning,
    position: Vec3, // feet
    angles: LookAngles,
    velocity: Vec3,
    crouch: CrouchState,
    noclip: bool,
    grounded: bool,
    height: f32,
    eye_height: f32,
    eye_target: f32,
    time_since_grounded: f32,
    time_since_ungrounded: f32,
    time_since_jump: f32,
    eyes_locked: bool,
}

impl LocomotionController {
    #[must_use]
    pub fn new(owner: ParticipantId, position: Vec3, tuning: LocomotionTuning) -> Self {
        Self {
            owner,
            tuning,
            position,
            angles: LookAngles::default(),
            velocity: Vec3::ZERO,
            crouch: CrouchState::Standing,
            noclip: false,
            grounded: false,
            height: tuning.stand_height,
            eye_height: tuning.stand_eye_height,
            eye_target: tuning.stand_eye_height,
            time_since_grounded: 0.0,
            time_since_ungrounded: 0.0,
            time_since_jump: tuning.jump_cooldown,
            eyes_locked: false,
        }
    }

    #[must_use]
    pub fn with_angles(mut self, angles: LookAngles) -> Self {
        self.angles = angles;
        self
    }

    /// Advances the avatar by one fixed tick.
    ///
    /// `repulsors` are the feet positions of other nearby avatars.
    pub fn tick(&mut self, input: &InputFrame, repulsors: &[Vec3], ctx: &mut SimContext) {
        let dt = ctx.dt;
        if dt <= PHYSICS_EPSILON {
            return;
        }

        if input.pressed(Action::ToggleNoclip) && !self.toggle_noclip(ctx.permissions) {
            ctx.effects.push(EffectEvent::NoclipDenied { participant: self.owner });
        }

        if !self.eyes_locked {
            self.angles.apply_delta(input.look_delta.x, input.look_delta.y);
        }

        self.time_since_jump += dt;
        if self.noclip {
            self.noclip_move(input, dt);
        } else {
            self.walk_move(input, repulsors, ctx);
        }

        self.update_crouch(input.down(Action::Crouch), &*ctx.physics);
        self.eye_height = approach_exp(self.eye_height, self.eye_target, self.tuning.eye_smoothing, dt);
    }

    /// Flips noclip if the owner is authorized. Returns false when refused.
    pub fn toggle_noclip(&mut self, permissions: &dyn Permissions) -> bool {
        if !permissions.can_noclip(self.owner) {
            debug!("{:?} refused noclip", self.owner);
            return false;
        }

        self.noclip = !self.noclip;
        self.grounded = false;
        debug!("{:?} noclip {}", self.owner, if self.noclip { "on" } else { "off" });
        true
    }

    // Freezes look angles while a grab tool spins the held object.
    pub const fn lock_eyes(&mut self, locked: bool) {
        self.eyes_locked = locked;
    }

    pub const fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
    }

    // ------------------------------------------------------------------------
    // Grounded / airborne regime
    // ------------------------------------------------------------------------

    fn walk_move(&mut self, input: &InputFrame, repulsors: &[Vec3], ctx: &mut SimContext) {
        let dt = ctx.dt;
        let tuning = self.tuning;

        if input.pressed(Action::Jump) && self.can_jump() {
            self.velocity.y = tuning.jump_impulse;
            self.grounded = false;
            self.time_since_jump = 0.0;
            ctx.effects.push(EffectEvent::Jumped { participant: self.owner });
            trace!("{:?} jumped", self.owner);
        }

        let mut wish = self.wish_velocity(input);
        if !self.grounded {
            wish = wish.clamp_length_max(tuning.air_wish_limit);
        }

        let friction = if self.grounded { tuning.ground_friction } else { tuning.air_friction };
        self.apply_friction(friction, dt);

        if self.grounded {
            self.accelerate(wish, tuning.ground_acceleration, dt);
            self.velocity.y = 0.0;
        } else {
            // first half of the split gravity step
            self.velocity.y -= tuning.gravity * dt * 0.5;
            self.accelerate(wish, tuning.air_acceleration, dt);
        }

        let push = separate(
            self.position,
            &mut self.velocity,
            repulsors,
            SeparationTuning {
                radius: tuning.separation_radius,
                inward_damping: SEPARATION_INWARD_DAMPING,
                push_speed: SEPARATION_PUSH_SPEED,
            },
        );

        let motion = (self.velocity + push) * dt;
        self.position = slide_move(&*ctx.physics, self.hull(), self.position, motion, &mut self.velocity);

        self.categorize_ground(&*ctx.physics);
        if self.grounded {
            self.velocity.y = 0.0;
            self.time_since_grounded = 0.0;
            self.time_since_ungrounded += dt;
        } else {
            self.velocity.y -= tuning.gravity * dt * 0.5;
            self.time_since_ungrounded = 0.0;
            self.time_since_grounded += dt;
        }
    }

    fn can_jump(&self) -> bool {
        let recently_grounded = self.grounded || self.time_since_grounded <= self.tuning.coyote_time;
        recently_grounded && self.time_since_jump >= self.tuning.jump_cooldown
    }

    fn apply_friction(&mut self, friction: f32, dt: f32) {
        let speed = self.velocity.length();
        if speed < PHYSICS_EPSILON {
            return;
        }
        let control = speed.max(self.tuning.stop_speed);
        let new_speed = control.mul_add(-friction * dt, speed).max(0.0);
        self.velocity *= new_speed / speed;
    }

    fn accelerate(&mut self, wish: Vec3, acceleration: f32, dt: f32) {
        let wish_speed = wish.length();
        if wish_speed < PHYSICS_EPSILON {
            return;
        }
        let direction = wish / wish_speed;
        let add_speed = wish_speed - self.velocity.dot(direction);
        if add_speed <= 0.0 {
            return;
        }
        let accel_speed = (acceleration * wish_speed * dt).min(add_speed);
        self.velocity += direction * accel_speed;
    }

    fn categorize_ground(&mut self, physics: &dyn PhysicsWorld) {
        let was_grounded = self.grounded;

        if self.velocity.y > GROUND_MAX_RISE_SPEED {
            self.grounded = false;
        } else {
            let below = self.position - Vec3::Y * GROUND_PROBE_DISTANCE;
            let trace = physics.trace_hull(self.hull(), self.position, below);
            self.grounded = trace.hit.is_some() && trace.normal.y >= GROUND_MIN_NORMAL_Y;
            if self.grounded {
                self.position = trace.end;
            }
        }

        if was_grounded != self.grounded {
            trace!("{:?} grounded={}", self.owner, self.grounded);
        }
    }

    // ------------------------------------------------------------------------
    // Noclip regime
    // ------------------------------------------------------------------------

    fn noclip_move(&mut self, input: &InputFrame, dt: f32) {
        self.grounded = false;

        let rotation = self.angles.rotation();
        let axes = input.move_axes;
        let wish = ((rotation * Vec3::NEG_Z) * axes.z + (rotation * Vec3::X) * axes.x + Vec3::Y * axes.y)
            .clamp_length_max(1.0)
            * self.wish_speed(input);

        let blend = 1.0 - (-NOCLIP_BLEND_RATE * dt).exp();
        self.velocity = self.velocity.lerp(wish, blend);
        self.velocity *= (-NOCLIP_DAMPING * dt).exp();
        self.velocity = self
            .velocity
            .clamp_length_max(self.tuning.noclip_speed * self.tuning.noclip_boost);

        self.position += self.velocity * dt;
        self.time_since_grounded += dt;
    }

    // ------------------------------------------------------------------------
    // Wish velocity
    // ------------------------------------------------------------------------

    fn wish_speed(&self, input: &InputFrame) -> f32 {
        let tuning = &self.tuning;
        if self.crouch == CrouchState::Crouched {
            tuning.crouch_speed
        } else if self.noclip {
            if input.down(Action::Sprint) {
                tuning.noclip_speed * tuning.noclip_boost
            } else {
                tuning.noclip_speed
            }
        } else if input.down(Action::Sprint) {
            tuning.sprint_speed
        } else if input.down(Action::Walk) {
            tuning.walk_speed
        } else {
            tuning.run_speed
        }
    }

    fn wish_velocity(&self, input: &InputFrame) -> Vec3 {
        let yaw = self.angles.yaw_rotation();
        let forward = yaw * Vec3::NEG_Z;
        let right = yaw * Vec3::X;
        (forward * input.move_axes.z + right * input.move_axes.x).clamp_length_max(1.0) * self.wish_speed(input)
    }

    // ------------------------------------------------------------------------
    // Crouch
    // ------------------------------------------------------------------------

    fn update_crouch(&mut self, wants_crouch: bool, physics: &dyn PhysicsWorld) {
        let request = CrouchRequest {
            wants_crouch,
            grounded: self.grounded,
            airborne_for: if self.grounded { 0.0 } else { self.time_since_grounded },
            noclip: self.noclip,
        };
        let stand_hull = Hull::new(self.tuning.half_width, self.tuning.stand_height);
        let crouch_hull = self.hull();
        let feet = self.position;
        let delta = self.tuning.stand_height - self.tuning.crouch_height;
        let airborne = !self.grounded && !self.noclip;
        let transition = next_crouch_transition(self.crouch, request, self.tuning.stand_grace, || {
            // airborne avatars grow downward, so probe the stand hull where it will end up
            let probe_feet = if airborne {
                physics.trace_hull(crouch_hull, feet, feet - Vec3::Y * delta).end
            } else {
                feet
            };
            physics.hull_blocked(stand_hull, probe_feet)
        });

        if let Some(transition) = transition {
            self.apply_crouch(transition, physics);
        }
    }

    fn apply_crouch(&mut self, transition: CrouchTransition, physics: &dyn PhysicsWorld) {
        let delta = self.tuning.stand_height - self.tuning.crouch_height;
        match transition {
            CrouchTransition::Crouch { airborne } => {
                if airborne {
                    // keep the top of the hull in place: feet come up, camera stays put
                    let hull = Hull::new(self.tuning.half_width, self.tuning.crouch_height);
                    let raised = physics.trace_hull(hull, self.position, self.position + Vec3::Y * delta).end;
                    self.eye_height = (self.eye_height - (raised.y - self.position.y)).max(0.0);
                    self.position = raised;
                }
                self.crouch = CrouchState::Crouched;
                self.height = self.tuning.crouch_height;
                self.eye_target = self.tuning.crouch_eye_height;
            }
            CrouchTransition::Stand { airborne } => {
                if airborne {
                    // grow back out of the bottom, no further than the ground allows
                    let lowered = physics.trace_hull(self.hull(), self.position, self.position - Vec3::Y * delta).end;
                    self.eye_height += self.position.y - lowered.y;
                    self.position = lowered;
                }
                self.crouch = CrouchState::Standing;
                self.height = self.tuning.stand_height;
                self.eye_target = self.tuning.stand_eye_height;
            }
        }
        debug!("{:?} {:?} (height {})", self.owner, self.crouch, self.height);
    }

    // ------------------------------------------------------------------------
    // Published state
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn hull(&self) -> Hull {
        Hull::new(self.tuning.half_width, self.height)
    }

    #[must_use]
    pub const fn owner(&self) -> ParticipantId {
        self.owner
    }

    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[must_use]
    pub const fn angles(&self) -> LookAngles {
        self.angles
    }

    #[must_use]
    pub const fn crouch(&self) -> CrouchState {
        self.crouch
    }

    #[must_use]
    pub fn is_crouching(&self) -> bool {
        self.crouch == CrouchState::Crouched
    }

    #[must_use]
    pub const fn is_noclip(&self) -> bool {
        self.noclip
    }

    #[must_use]
    pub const fn is_grounded(&self) -> bool {
        self.grounded
    }

    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub const fn eye_height(&self) -> f32 {
        self.eye_height
    }

    #[must_use]
    pub const fn eye_target(&self) -> f32 {
        self.eye_target
    }

    #[must_use]
    pub const fn eyes_locked(&self) -> bool {
        self.eyes_locked
    }

    #[must_use]
    pub const fn regime(&self) -> MoveRegime {
        if self.noclip {
            MoveRegime::Noclip
        } else if self.grounded {
            MoveRegime::Grounded
        } else {
            MoveRegime::Airborne
        }
    }

    #[must_use]
    pub fn view(&self) -> ViewPoint {
        ViewPoint {
            origin: self.position + Vec3::Y * self.eye_height,
            rotation: self.angles.rotation(),
            yaw_rotation: self.angles.yaw_rotation(),
        }
    }

    #[must_use]
    pub fn pose(&self) -> AvatarPose {
        let span = self.tuning.stand_eye_height - self.tuning.crouch_eye_height;
        let crouch_level = if span > PHYSICS_EPSILON {
            ((self.tuning.stand_eye_height - self.eye_height) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        AvatarPose {
            id: self.owner,
            position: self.position.into(),
            rotation: self.angles.yaw_rotation().into(),
            velocity: self.velocity.into(),
            look: self.angles,
            grounded: self.grounded,
            noclip: self.noclip,
            crouch_level,
            eye_height: self.eye_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::{AIR_WISH_SPEED_LIMIT, NOCLIP_BOOST, NOCLIP_SPEED},
        input::ActionSet,
        sandbox::BodyDesc,
        test_support::{DT, TestWorld},
    };
    use bevy_math::Vec2;

    const ME: ParticipantId = ParticipantId(1);

    fn step(world: &mut TestWorld, controller: &mut LocomotionController, input: &InputFrame) {
        step_among(world, controller, input, &[]);
    }

    fn step_among(world: &mut TestWorld, controller: &mut LocomotionController, input: &InputFrame, others: &[Vec3]) {
        world.advance();
        controller.tick(input, others, &mut world.ctx());
    }

    fn open_air() -> TestWorld {
        let mut world = TestWorld::with_floor();
        world.scene.despawn(world.floor);
        world
    }

    fn held(actions: &[Action]) -> InputFrame {
        InputFrame::from_held(ActionSet::EMPTY, ActionSet::of(actions))
    }

    fn settle(world: &mut TestWorld, controller: &mut LocomotionController) {
        for _ in 0..5 {
            step(world, controller, &InputFrame::default());
        }
        assert!(controller.is_grounded());
    }

    #[test]
    fn grounded_moves_end_with_zero_vertical_velocity() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        settle(&mut world, &mut controller);

        let forward = InputFrame::default().with_move(Vec3::Z);
        for _ in 0..30 {
            step(&mut world, &mut controller, &forward);
            assert_eq!(controller.regime(), MoveRegime::Grounded);
            assert!(controller.velocity().y.abs() < f32::EPSILON);
        }
        assert!(controller.position().z < -50.0);
    }

    #[test]
    fn airborne_moves_integrate_gravity() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        settle(&mut world, &mut controller);

        step(&mut world, &mut controller, &held(&[Action::Jump]));
        assert_eq!(controller.regime(), MoveRegime::Airborne);
        assert!(matches!(world.effects.pending(), [EffectEvent::Jumped { .. }]));

        let mut previous = controller.velocity().y;
        for _ in 0..10 {
            step(&mut world, &mut controller, &InputFrame::default());
            let vy = controller.velocity().y;
            assert!(vy.abs() > f32::EPSILON);
            assert!(vy < previous);
            previous = vy;
        }
    }

    #[test]
    fn holding_jump_does_not_bunny_hop() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        settle(&mut world, &mut controller);

        let mut input = held(&[Action::Jump]);
        step(&mut world, &mut controller, &input);
        for _ in 0..120 {
            input = input.next(ActionSet::of(&[Action::Jump]));
            step(&mut world, &mut controller, &input);
        }
        let jumps = world.effects.drain().filter(|e| matches!(e, EffectEvent::Jumped { .. })).count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn airborne_steering_is_weak() {
        let mut world = open_air();
        let mut controller = LocomotionController::new(ME, Vec3::new(0.0, 1000.0, 0.0), LocomotionTuning::default());

        let forward = InputFrame::default().with_move(Vec3::Z);
        for _ in 0..200 {
            step(&mut world, &mut controller, &forward);
        }
        let horizontal_speed = Vec2::new(controller.velocity().x, controller.velocity().z).length();
        assert!(horizontal_speed <= AIR_WISH_SPEED_LIMIT + 0.01);
    }

    #[test]
    fn speed_precedence_picks_crouch_then_sprint_then_walk() {
        let controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        let tuning = LocomotionTuning::default();

        assert!((controller.wish_speed(&held(&[])) - tuning.run_speed).abs() < f32::EPSILON);
        assert!((controller.wish_speed(&held(&[Action::Walk])) - tuning.walk_speed).abs() < f32::EPSILON);
        assert!(
            (controller.wish_speed(&held(&[Action::Walk, Action::Sprint])) - tuning.sprint_speed).abs() < f32::EPSILON
        );

        let mut crouched = controller.clone();
        crouched.crouch = CrouchState::Crouched;
        assert!((crouched.wish_speed(&held(&[Action::Sprint])) - tuning.crouch_speed).abs() < f32::EPSILON);

        let mut flying = controller;
        flying.noclip = true;
        assert!(
            (flying.wish_speed(&held(&[Action::Sprint])) - tuning.noclip_speed * tuning.noclip_boost).abs()
                < f32::EPSILON
        );
    }

    #[test]
    fn crouch_and_stand_scenario() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        settle(&mut world, &mut controller);
        assert!((controller.eye_height() - 64.0).abs() < 1e-3);

        step(&mut world, &mut controller, &held(&[Action::Crouch]));
        assert!(controller.is_crouching());
        assert!((controller.height() - 36.0).abs() < f32::EPSILON);
        assert!((controller.eye_target() - 28.0).abs() < f32::EPSILON);

        // walk off into the air while crouched, then let the grace window pass
        controller.teleport(controller.position() + Vec3::Y * 500.0);
        let mut input = held(&[Action::Crouch]);
        for _ in 0..20 {
            input = input.next(ActionSet::of(&[Action::Crouch]));
            step(&mut world, &mut controller, &input);
        }
        assert!(!controller.is_grounded());
        assert!(controller.is_crouching());

        step(&mut world, &mut controller, &input.next(ActionSet::EMPTY));
        assert!(!controller.is_crouching());
        assert!((controller.height() - 64.0).abs() < f32::EPSILON);
        assert!((controller.eye_target() - 64.0).abs() < f32::EPSILON);
    }

    #[test]
    fn standing_is_refused_under_a_low_ceiling() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        settle(&mut world, &mut controller);

        step(&mut world, &mut controller, &held(&[Action::Crouch]));
        assert!(controller.is_crouching());

        // ceiling between crouch and stand height, spawned after crouching under it
        let ceiling = world
            .scene
            .spawn(BodyDesc::fixed(Vec3::new(0.0, 50.0, 0.0), Vec3::new(500.0, 5.0, 500.0)));
        for _ in 0..10 {
            step(&mut world, &mut controller, &InputFrame::default());
            assert!(controller.is_crouching());
        }

        world.scene.despawn(ceiling);
        step(&mut world, &mut controller, &InputFrame::default());
        assert!(!controller.is_crouching());
    }

    #[test]
    fn airborne_crouch_lifts_feet_and_keeps_the_camera() {
        let mut world = open_air();
        let mut controller = LocomotionController::new(ME, Vec3::new(0.0, 500.0, 0.0), LocomotionTuning::default());
        step(&mut world, &mut controller, &InputFrame::default());

        let eye_before = controller.view().origin.y;
        let feet_before = controller.position().y;
        step(&mut world, &mut controller, &held(&[Action::Crouch]));

        let fall = controller.velocity().y.abs() * DT * 2.0;
        assert!(controller.position().y > feet_before + 27.0 - fall);
        assert!((controller.view().origin.y - eye_before).abs() < fall + 2.0);
    }

    #[test]
    fn noclip_requires_authorization() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());

        step(&mut world, &mut controller, &held(&[Action::ToggleNoclip]));
        assert!(!controller.is_noclip());
        assert!(matches!(world.effects.pending(), [EffectEvent::NoclipDenied { .. }]));

        world.admins.0.insert(ME);
        step(&mut world, &mut controller, &held(&[Action::ToggleNoclip]));
        assert!(controller.is_noclip());
        assert_eq!(controller.regime(), MoveRegime::Noclip);
    }

    #[test]
    fn noclip_flies_through_geometry_and_ignores_crouch() {
        let mut world = TestWorld::with_floor();
        world.admins.0.insert(ME);
        let mut controller = LocomotionController::new(ME, Vec3::new(0.0, 10.0, 0.0), LocomotionTuning::default())
            .with_angles(LookAngles::new(0.0, -90.0));
        assert!(controller.toggle_noclip(&world.admins));

        let mut input = InputFrame::default();
        for _ in 0..60 {
            input = input.next(ActionSet::of(&[Action::Crouch])).with_move(Vec3::Z);
            step(&mut world, &mut controller, &input);
        }
        assert!(controller.position().y < -20.0);
        assert!(!controller.is_crouching());
        assert!(controller.velocity().length() <= NOCLIP_SPEED * NOCLIP_BOOST + 1e-3);
    }

    #[test]
    fn locked_eyes_ignore_look_input() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        let look = InputFrame::default().with_look(Vec2::new(30.0, 10.0));

        controller.lock_eyes(true);
        step(&mut world, &mut controller, &look);
        assert_eq!(controller.angles(), LookAngles::default());

        controller.lock_eyes(false);
        step(&mut world, &mut controller, &look);
        assert!((controller.angles().yaw - 30.0).abs() < 1e-4);
        assert!((controller.angles().pitch - 10.0).abs() < 1e-4);
    }

    #[test]
    fn walking_into_another_avatar_never_overlaps() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        settle(&mut world, &mut controller);

        let other = Vec3::new(0.0, 0.0, -60.0);
        let forward = InputFrame::default().with_move(Vec3::Z);
        for _ in 0..200 {
            step_among(&mut world, &mut controller, &forward, &[other]);
        }
        let gap = (controller.position() - other).length();
        assert!(gap > 5.0, "avatars overlapped: gap {gap}");
    }

    #[test]
    fn published_pose_reports_crouch_level() {
        let mut world = TestWorld::with_floor();
        let mut controller = LocomotionController::new(ME, Vec3::ZERO, LocomotionTuning::default());
        settle(&mut world, &mut controller);
        assert!(controller.pose().crouch_level.abs() < 1e-3);

        let mut input = held(&[Action::Crouch]);
        for _ in 0..120 {
            step(&mut world, &mut controller, &input);
            input = input.next(ActionSet::of(&[Action::Crouch]));
        }
        let pose = controller.pose();
        assert!(pose.crouch_level > 0.99);
        assert!(pose.grounded);
        assert_eq!(pose.id, ME);
    }

    #[test]
    fn airborne_stand_probes_the_space_below() {
        let mut world = open_air();
        let mut controller = LocomotionController::new(ME, Vec3::new(0.0, 500.0, 0.0), LocomotionTuning::default());
        step(&mut world, &mut controller, &held(&[Action::Crouch]));
        assert!(controller.is_crouching());

        // a ceiling just over the crouched head blocks growing upward but not downward
        let top = controller.position().y + controller.height();
        world
            .scene
            .spawn(BodyDesc::fixed(Vec3::new(0.0, top + 7.0, 0.0), Vec3::new(500.0, 5.0, 500.0)));
        step(&mut world, &mut controller, &InputFrame::default());

        assert!(!controller.is_grounded());
        assert!(!controller.is_crouching());
        assert!(controller.position().y + controller.height() < top + 1.0);
    }
}

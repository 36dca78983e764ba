pub mod controller;
pub mod crouch;
pub mod separation;
pub mod slide;

pub use controller::{LocomotionController, MoveRegime, ViewPoint};
pub use crouch::{CrouchState, CrouchTransition};

use crate::constants::*;

/// Gameplay tuning for avatar locomotion.
///
/// Kept separate from host runtime configuration (tick rate, bot counts).
#[derive(Debug, Clone, Copy)]
pub struct LocomotionTuning {
    pub run_speed: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    pub noclip_speed: f32,
    pub noclip_boost: f32,
    /// Maximum wish speed while airborne (weak air steering).
    pub air_wish_limit: f32,

    pub ground_friction: f32,
    pub air_friction: f32,
    pub stop_speed: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    pub gravity: f32,

    pub jump_impulse: f32,
    pub jump_cooldown: f32,
    /// Jumps are still accepted this long after walking off a ledge.
    pub coyote_time: f32,

    pub half_width: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    pub stand_eye_height: f32,
    pub crouch_eye_height: f32,
    pub eye_smoothing: f32,
    /// Airborne time after which standing up ignores the head probe.
    pub stand_grace: f32,

    pub separation_radius: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            run_speed: RUN_SPEED,
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            crouch_speed: CROUCH_SPEED,
            noclip_speed: NOCLIP_SPEED,
            noclip_boost: NOCLIP_BOOST,
            air_wish_limit: AIR_WISH_SPEED_LIMIT,
            ground_friction: GROUND_FRICTION,
            air_friction: AIR_FRICTION,
            stop_speed: STOP_SPEED,
            ground_acceleration: GROUND_ACCELERATION,
            air_acceleration: AIR_ACCELERATION,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            jump_cooldown: JUMP_COOLDOWN,
            coyote_time: COYOTE_TIME,
            half_width: AVATAR_HALF_WIDTH,
            stand_height: STAND_HEIGHT,
            crouch_height: CROUCH_HEIGHT,
            stand_eye_height: STAND_EYE_HEIGHT,
            crouch_eye_height: CROUCH_EYE_HEIGHT,
            eye_smoothing: EYE_HEIGHT_SMOOTHING,
            stand_grace: AIRBORNE_STAND_GRACE,
            separation_radius: SEPARATION_RADIUS,
        }
    }
}

// All distances are world units (1 unit ~ 1 inch), all times are seconds.

// ============================================================================
// Floating-Point Comparisons
// ============================================================================

// Small value for floating-point comparisons (near-zero checks, division guards).
pub const PHYSICS_EPSILON: f32 = 1e-6;

// ============================================================================
// World
// ============================================================================

pub const GRAVITY: f32 = 800.0; // units per second squared, pulls along -Y

// ============================================================================
// Avatar Dimensions
// ============================================================================

pub const AVATAR_HALF_WIDTH: f32 = 16.0; // collision hull half extent on X and Z
pub const STAND_HEIGHT: f32 = 64.0;
pub const CROUCH_HEIGHT: f32 = 36.0;
pub const STAND_EYE_HEIGHT: f32 = 64.0;
pub const CROUCH_EYE_HEIGHT: f32 = 28.0;
pub const EYE_HEIGHT_SMOOTHING: f32 = 10.0; // 1/s, exponential approach rate toward the eye target

// ============================================================================
// Look
// ============================================================================

pub const PITCH_LIMIT_DEGREES: f32 = 90.0;

// ============================================================================
// Locomotion Speeds (units per second)
// ============================================================================

pub const RUN_SPEED: f32 = 200.0;
pub const WALK_SPEED: f32 = 110.0;
pub const SPRINT_SPEED: f32 = 320.0;
pub const CROUCH_SPEED: f32 = 90.0;
pub const NOCLIP_SPEED: f32 = 500.0;
pub const NOCLIP_BOOST: f32 = 4.0;
pub const AIR_WISH_SPEED_LIMIT: f32 = 50.0; // weak mid-air steering

// ============================================================================
// Locomotion Physics
// ============================================================================

pub const GROUND_FRICTION: f32 = 6.0;
pub const AIR_FRICTION: f32 = 0.2;
pub const STOP_SPEED: f32 = 100.0; // friction control floor
pub const GROUND_ACCELERATION: f32 = 10.0;
pub const AIR_ACCELERATION: f32 = 10.0;
pub const JUMP_IMPULSE: f32 = 268.3; // sqrt(2 * GRAVITY * 45 units)
pub const JUMP_COOLDOWN: f32 = 0.3;
pub const COYOTE_TIME: f32 = 0.1; // jump still allowed this long after leaving the ground
pub const AIRBORNE_STAND_GRACE: f32 = 0.2;
pub const GROUND_PROBE_DISTANCE: f32 = 2.0;
pub const GROUND_MIN_NORMAL_Y: f32 = 0.7; // ~45 degree walkable slope
pub const GROUND_MAX_RISE_SPEED: f32 = 140.0; // moving up faster than this is never grounded
pub const MAX_SLIDE_BUMPS: usize = 4;
pub const SLIDE_OVERBOUNCE: f32 = 1.001;

// Noclip: velocity blends toward the wish with NOCLIP_BLEND_RATE, then decays by NOCLIP_DAMPING.
pub const NOCLIP_BLEND_RATE: f32 = 8.0; // 1/s
pub const NOCLIP_DAMPING: f32 = 2.0; // 1/s

// ============================================================================
// Avatar Separation
// ============================================================================

pub const SEPARATION_RADIUS: f32 = 40.0;
pub const SEPARATION_INWARD_DAMPING: f32 = 0.6; // share of inward velocity cancelled
pub const SEPARATION_PUSH_SPEED: f32 = 128.0; // outward push at full overlap

// ============================================================================
// Grab Tools
// ============================================================================

pub const HOLD_SCROLL_STEP: f32 = 10.0; // hold distance change per scroll notch
pub const ROTATE_SNAP_DEGREES: f32 = 45.0;

// Suspend: soft hold, must already be dynamic
pub const SUSPEND_RANGE: f32 = 500.0;
pub const SUSPEND_HOLD_MIN: f32 = 40.0;
pub const SUSPEND_HOLD_MAX: f32 = 500.0;
pub const SUSPEND_BREAK_DISTANCE: f32 = SUSPEND_RANGE * 1.5;
pub const SUSPEND_THROW_FORCE: f32 = 1200.0;
pub const SUSPEND_SMOOTH_TIME: f32 = 0.2;

// RigidLock: long reach, stiff tracking, can freeze
pub const RIGID_LOCK_RANGE: f32 = 1000.0;
pub const RIGID_LOCK_HOLD_MIN: f32 = 25.0;
pub const RIGID_LOCK_HOLD_MAX: f32 = 1000.0;
pub const RIGID_LOCK_BREAK_DISTANCE: f32 = RIGID_LOCK_RANGE * 1.25;
pub const RIGID_LOCK_SMOOTH_TIME: f32 = 0.05;

// HandCarry: arm reach, short cooldown against re-grab oscillation
pub const HAND_CARRY_RANGE: f32 = 100.0;
pub const HAND_CARRY_HOLD_MIN: f32 = 40.0;
pub const HAND_CARRY_HOLD_MAX: f32 = 80.0;
pub const HAND_CARRY_BREAK_DISTANCE: f32 = HAND_CARRY_RANGE * 1.5;
pub const HAND_CARRY_THROW_FORCE: f32 = 600.0;
pub const HAND_CARRY_SMOOTH_TIME: f32 = 0.08;
pub const HAND_CARRY_PICKUP_COOLDOWN: f32 = 0.35;

// ============================================================================
// Host Defaults
// ============================================================================

pub const DEFAULT_TICK_RATE: u16 = 66;
pub const DEFAULT_BOTS: usize = 4;
pub const DEFAULT_PROPS: usize = 12;

// ============================================================================
// Arena Layout
// ============================================================================

pub const ARENA_HALF_SIZE: f32 = 1024.0;
pub const FLOOR_THICKNESS: f32 = 16.0;
pub const WALL_HEIGHT: f32 = 256.0;
pub const WALL_THICKNESS: f32 = 16.0;

pub const PROP_SPREAD: f32 = 400.0; // props land within this distance of the centre
pub const PROP_MIN_HALF_SIZE: f32 = 6.0;
pub const PROP_MAX_HALF_SIZE: f32 = 18.0;
pub const FROZEN_PROP_PROBABILITY: f64 = 0.2;

pub const BOT_SPAWN_RADIUS: f32 = 200.0;

// ============================================================================
// Bot Behaviour
// ============================================================================

pub const BOT_TURN_RATE: f32 = 90.0; // max degrees of look change per second
pub const BOT_RETHINK_PROBABILITY: f64 = 0.05; // chance per tick to pick new move axes
pub const BOT_PRESS_PROBABILITY: f64 = 0.02; // chance per tick to toggle each action
pub const BOT_SWITCH_TOOL_PROBABILITY: f64 = 0.002;

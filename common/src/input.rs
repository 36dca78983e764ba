use bevy_ecs::prelude::*;
use bevy_math::{Vec2, Vec3};

// ============================================================================
// Actions
// ============================================================================

/// Named input actions polled once per simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Jump,
    Crouch,
    Walk,
    Sprint,
    Primary,
    Secondary,
    Grab,
    Rotate,
    Snap,
    ResetRotation,
    UnfreezeAll,
    ToggleNoclip,
}

impl Action {
    pub const ALL: [Self; 12] = [
        Self::Jump,
        Self::Crouch,
        Self::Walk,
        Self::Sprint,
        Self::Primary,
        Self::Secondary,
        Self::Grab,
        Self::Rotate,
        Self::Snap,
        Self::ResetRotation,
        Self::UnfreezeAll,
        Self::ToggleNoclip,
    ];

    const fn bit(self) -> u16 {
        1 << self as u8
    }
}

// Compact set of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub fn of(actions: &[Action]) -> Self {
        actions.iter().fold(Self::EMPTY, |set, action| set.with(*action))
    }

    #[must_use]
    pub const fn with(self, action: Action) -> Self {
        Self(self.0 | action.bit())
    }

    pub const fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub const fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    #[must_use]
    pub const fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }
}

// ============================================================================
// Input Frame
// ============================================================================

/// Everything the owning participant pressed or moved during one tick.
///
/// `move_axes` is x = right, y = up (noclip only), z = forward, each in [-1, 1].
/// `look_delta` is in degrees: x = yaw, y = pitch.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct InputFrame {
    pub move_axes: Vec3,
    pub look_delta: Vec2,
    pub scroll: f32,
    down: ActionSet,
    pressed: ActionSet,
    released: ActionSet,
}

impl InputFrame {
    // Build a frame from the held set, deriving edges against the previous tick's held set.
    #[must_use]
    pub fn from_held(previous: ActionSet, held: ActionSet) -> Self {
        Self {
            down: held,
            pressed: ActionSet(held.0 & !previous.0),
            released: ActionSet(previous.0 & !held.0),
            ..Self::default()
        }
    }

    // Next frame with `held`, carrying over edge detection from this one.
    #[must_use]
    pub fn next(&self, held: ActionSet) -> Self {
        Self::from_held(self.down, held)
    }

    #[must_use]
    pub const fn with_move(mut self, move_axes: Vec3) -> Self {
        self.move_axes = move_axes;
        self
    }

    #[must_use]
    pub const fn with_look(mut self, look_delta: Vec2) -> Self {
        self.look_delta = look_delta;
        self
    }

    #[must_use]
    pub const fn with_scroll(mut self, scroll: f32) -> Self {
        self.scroll = scroll;
        self
    }

    #[must_use]
    pub const fn down(&self, action: Action) -> bool {
        self.down.contains(action)
    }

    #[must_use]
    pub const fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    #[must_use]
    pub const fn released(&self, action: Action) -> bool {
        self.released.contains(action)
    }

    #[must_use]
    pub const fn held(&self) -> ActionSet {
        self.down
    }
}

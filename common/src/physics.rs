//! Abstract rigid-body physics service consumed by locomotion and the grab tools.
//!
//! The core never integrates bodies itself. It reads poses and velocities, writes
//! velocities and body types, and asks the world for ray and hull sweeps.

use bevy_math::{Quat, Vec3};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

// ============================================================================
// Handles and Poses
// ============================================================================

/// Identifier of a physics body owned by the external world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct BodyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum BodyType {
    Dynamic,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[must_use]
    pub fn to_local(&self, world_point: Vec3) -> Vec3 {
        self.rotation.inverse() * (world_point - self.position)
    }

    #[must_use]
    pub fn to_world(&self, local_point: Vec3) -> Vec3 {
        self.rotation * local_point + self.position
    }
}

// ============================================================================
// Queries
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_distance: f32,
}

/// Which bodies a ray should pass through.
#[derive(Debug, Clone, Default)]
pub struct RayFilter {
    pub include_triggers: bool,
    pub ignore: Vec<BodyId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub body: BodyId,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    // The ray origin was already inside the hit solid.
    pub start_solid: bool,
}

/// Axis-aligned avatar collision hull; `position` in sweeps is the bottom centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hull {
    pub half_width: f32,
    pub height: f32,
}

impl Hull {
    #[must_use]
    pub const fn new(half_width: f32, height: f32) -> Self {
        Self { half_width, height }
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.half_width, self.height / 2.0, self.half_width)
    }

    #[must_use]
    pub fn center(&self, feet: Vec3) -> Vec3 {
        feet + Vec3::Y * (self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullTrace {
    pub end: Vec3,
    // Fraction of the requested sweep travelled, 1.0 when nothing was hit.
    pub fraction: f32,
    pub normal: Vec3,
    pub hit: Option<BodyId>,
    pub start_solid: bool,
}

impl HullTrace {
    #[must_use]
    pub const fn clear(end: Vec3) -> Self {
        Self {
            end,
            fraction: 1.0,
            normal: Vec3::ZERO,
            hit: None,
            start_solid: false,
        }
    }
}

// ============================================================================
// Physics World Facade
// ============================================================================

pub trait PhysicsWorld {
    fn raycast(&self, ray: &Ray, filter: &RayFilter) -> Option<RayHit>;

    // Sweeps an avatar hull from `from` to `to` (feet positions) against solid bodies.
    fn trace_hull(&self, hull: Hull, from: Vec3, to: Vec3) -> HullTrace;

    fn pose(&self, body: BodyId) -> Option<Pose>;

    fn velocity(&self, body: BodyId) -> Option<Vec3>;
    fn set_velocity(&mut self, body: BodyId, velocity: Vec3);

    fn angular_velocity(&self, body: BodyId) -> Option<Vec3>;
    fn set_angular_velocity(&mut self, body: BodyId, angular_velocity: Vec3);

    fn body_type(&self, body: BodyId) -> Option<BodyType>;
    fn set_body_type(&mut self, body: BodyId, body_type: BodyType);

    // Root of the articulated hierarchy `body` belongs to (itself for single bodies).
    fn root_of(&self, body: BodyId) -> Option<BodyId>;

    // Root first, then sub-bodies in a stable order.
    fn hierarchy(&self, root: BodyId) -> Vec<BodyId>;

    // Closest point on the body's bounds to `point`.
    fn closest_point(&self, body: BodyId, point: Vec3) -> Option<Vec3>;

    fn contains(&self, body: BodyId) -> bool {
        self.pose(body).is_some()
    }

    fn hull_blocked(&self, hull: Hull, feet: Vec3) -> bool {
        self.trace_hull(hull, feet, feet).start_solid
    }
}

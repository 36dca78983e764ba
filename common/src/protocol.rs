#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use bevy_ecs::component::Component;
use bevy_math::{Quat, Vec3};

use crate::{math::LookAngles, physics::BodyId};

// Macro to reduce boilerplate for replicated structs
macro_rules! message {
    ($(#[$meta:meta])* struct $name:ident $body:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "bincode", derive(Encode, Decode))]
        pub struct $name $body
    };
}

// ============================================================================
// Common Data Types
// ============================================================================

// Participant ID component - identifies which connected participant an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Component)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct ParticipantId(pub u32);

// Wire form of a vector (glam types carry no codec derives)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct WireVec3(pub [f32; 3]);

impl From<Vec3> for WireVec3 {
    fn from(v: Vec3) -> Self {
        Self(v.to_array())
    }
}

impl From<WireVec3> for Vec3 {
    fn from(v: WireVec3) -> Self {
        Self::from_array(v.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct WireQuat(pub [f32; 4]);

impl From<Quat> for WireQuat {
    fn from(q: Quat) -> Self {
        Self(q.to_array())
    }
}

impl From<WireQuat> for Quat {
    fn from(q: WireQuat) -> Self {
        Self::from_array(q.0)
    }
}

// ============================================================================
// Published State
// ============================================================================

message! {
// Avatar pose published every tick for animation, camera and remote participants.
struct AvatarPose {
    pub id: ParticipantId,
    pub position: WireVec3,
    pub rotation: WireQuat,
    pub velocity: WireVec3,
    pub look: LookAngles,
    pub grounded: bool,
    pub noclip: bool,
    // 0.0 standing, 1.0 fully crouched (eye height blend)
    pub crouch_level: f32,
    pub eye_height: f32,
}
}

message! {
// Active grab as seen by non-holders.
struct GrabState {
    pub holder: ParticipantId,
    pub target: BodyId,
    pub sub_body: u32,
    pub desired_position: WireVec3,
    pub desired_rotation: WireQuat,
    pub hold_distance: f32,
}
}

message! {
// Everything replicated for one simulation tick.
struct ReplicationFrame {
    pub tick: u64,
    pub avatars: Vec<AvatarPose>,
    pub grabs: Vec<GrabState>,
}
}

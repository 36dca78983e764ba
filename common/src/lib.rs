pub mod constants;
pub mod context;
pub mod events;
pub mod grab;
pub mod input;
#[cfg(any(feature = "json", feature = "bincode"))]
pub mod io;
pub mod locomotion;
pub mod math;
pub mod physics;
pub mod protocol;
pub mod replication;
pub mod sandbox;

#[cfg(test)]
mod test_support;

pub use context::SimContext;
pub use events::{EffectEvent, EffectQueue};
pub use grab::{GrabSession, GrabTool, GrabToolKind, ReleaseReason, ToolProfile};
pub use input::{Action, ActionSet, InputFrame};
pub use locomotion::{LocomotionController, LocomotionTuning};
